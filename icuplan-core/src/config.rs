use std::path::PathBuf;

use crate::error::UploadError;

pub const DEFAULT_BASE_URL: &str = "https://intervals.icu/api/v1/athlete";
pub const DEFAULT_INPUT_PATH: &str = "trainings.json";

/// Everything one run needs. Built by the caller and handed to the client
/// and publisher explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub athlete_id: String,
    pub api_key: String,
    pub plan_name: String,
    pub input_path: PathBuf,
    pub base_url: String,
}

impl Config {
    pub fn new(athlete_id: &str, api_key: &str, plan_name: &str) -> Self {
        Self {
            athlete_id: athlete_id.to_string(),
            api_key: api_key.to_string(),
            plan_name: plan_name.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        let required = [
            ("athlete id", &self.athlete_id),
            ("api key", &self.api_key),
            ("plan name", &self.plan_name),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(UploadError::Config(format!("{} must not be empty", label)));
            }
        }
        if self.base_url.trim().is_empty() {
            return Err(UploadError::Config("base url must not be empty".into()));
        }
        Ok(())
    }
}
