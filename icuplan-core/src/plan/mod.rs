//! Training plan model and loader.

pub mod duration;

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::error::Category;

use crate::error::UploadError;
pub use duration::{Quantity, normalize_duration};

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    // `Number` keeps the float form, so `1.0` stays `1.0` rather than `1`.
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "deserialize_text")] String);

    Ok(Option::<Wrap>::deserialize(deserializer)?.map(|Wrap(s)| s))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub distance: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub zone: String,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cadence: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pace: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub power: Option<String>,
}

impl Step {
    pub fn new(description: &str, distance: &str, zone: &str) -> Self {
        Self {
            description: description.to_string(),
            distance: distance.to_string(),
            zone: zone.to_string(),
            cadence: None,
            pace: None,
            power: None,
        }
    }
}

/// Day token of a training. Plans use either a calendar-ish label or a day
/// offset; it is forwarded to the service exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Day {
    Offset(i64),
    Label(String),
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Day::Offset(n) => write!(f, "{}", n),
            Day::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Day {
    fn from(s: &str) -> Self {
        Day::Label(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub day: Day,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub trainings: Vec<Training>,
}

impl Plan {
    /// Parse and validate a plan document.
    pub fn from_json(raw: &str) -> Result<Plan, UploadError> {
        let plan: Plan = serde_json::from_str(raw).map_err(|e| match e.classify() {
            Category::Data => UploadError::Validation(e.to_string()),
            _ => UploadError::Load(e.to_string()),
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Every step's distance token must resolve to a canonical quantity.
    pub fn validate(&self) -> Result<(), UploadError> {
        for training in &self.trainings {
            for (idx, step) in training.steps.iter().enumerate() {
                let quantity = normalize_duration(&step.distance).map_err(|e| {
                    UploadError::Validation(format!(
                        "training '{}', step {} ('{}'): {}",
                        training.name,
                        idx + 1,
                        step.description,
                        e
                    ))
                })?;
                debug!(
                    "training '{}' step {} distance {} -> {}",
                    training.name,
                    idx + 1,
                    step.distance,
                    quantity
                );
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.trainings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trainings.is_empty()
    }
}

pub fn load_plan(path: &Path) -> Result<Plan, UploadError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| UploadError::Load(format!("{}: {}", path.display(), e)))?;
    let plan = Plan::from_json(&raw)?;
    info!(
        "Loaded {} trainings from {}",
        plan.trainings.len(),
        path.display()
    );
    Ok(plan)
}
