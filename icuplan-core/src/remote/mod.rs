//! intervals.icu folder and workout endpoints.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Stage, UploadError};
use crate::transform::WorkoutRecord;

/// Username intervals.icu expects alongside an API key.
pub const API_KEY_USER: &str = "API_KEY";

/// Folder identifier as returned by the service, kept in its original JSON
/// form so it goes back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FolderId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderId::Number(n) => write!(f, "{}", n),
            FolderId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FolderId {
    fn from(n: i64) -> Self {
        FolderId::Number(n)
    }
}

impl From<&str> for FolderId {
    fn from(s: &str) -> Self {
        FolderId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_id: Option<FolderId>,
    pub description: String,
}

impl FolderRequest {
    /// Top-level plan folder named after the plan.
    pub fn plan(plan_name: &str) -> Self {
        Self {
            name: plan_name.to_string(),
            kind: "PLAN".to_string(),
            parent_id: None,
            description: format!("Folder for {}", plan_name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FolderResponse {
    id: FolderId,
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn create_folder(&self, request: &FolderRequest) -> Result<FolderId, UploadError>;
    async fn bulk_create_workouts(&self, records: &[WorkoutRecord]) -> Result<(), UploadError>;
}

/// Value of the `Authorization` header for an API key.
pub fn encode_auth(api_key: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", API_KEY_USER, api_key))
    )
}

pub struct IntervalsClient {
    client: reqwest::Client,
    base_url: String,
    athlete_id: String,
    api_key: String,
}

impl IntervalsClient {
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        config.validate()?;
        debug!(
            "IntervalsClient::new base_url={} athlete_id={}",
            config.base_url, config.athlete_id
        );
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            athlete_id: config.athlete_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn athlete_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.athlete_id, path)
    }

    async fn failure(stage: Stage, response: reqwest::Response) -> UploadError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!("{} returned status {}", stage, status);
        UploadError::Remote {
            stage,
            status,
            body,
        }
    }
}

impl WorkoutService for IntervalsClient {
    async fn create_folder(&self, request: &FolderRequest) -> Result<FolderId, UploadError> {
        let stage = Stage::CreateFolder;
        let url = self.athlete_url("folders/");
        debug!("POST {} name={}", url, request.name);

        let response = self
            .client
            .post(&url)
            .basic_auth(API_KEY_USER, Some(&self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| UploadError::transport(stage, e))?;

        if !response.status().is_success() {
            return Err(Self::failure(stage, response).await);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::transport(stage, e))?;
        let parsed: FolderResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Cannot parse folder response: {}", e);
            UploadError::Remote {
                stage,
                status,
                body: body.clone(),
            }
        })?;
        info!("Created folder {} ({})", parsed.id, request.name);
        Ok(parsed.id)
    }

    async fn bulk_create_workouts(&self, records: &[WorkoutRecord]) -> Result<(), UploadError> {
        let stage = Stage::BulkUpload;
        let url = self.athlete_url("workouts/bulk");
        debug!("POST {} records={}", url, records.len());

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, encode_auth(&self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(records)
            .send()
            .await
            .map_err(|e| UploadError::transport(stage, e))?;

        if !response.status().is_success() {
            return Err(Self::failure(stage, response).await);
        }
        info!("Uploaded {} workouts", records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_is_base64_of_key_pair() {
        assert_eq!(encode_auth("secret"), "Basic QVBJX0tFWTpzZWNyZXQ=");
    }

    #[test]
    fn folder_request_shape() {
        let value = serde_json::to_value(FolderRequest::plan("Marathon")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Marathon",
                "type": "PLAN",
                "parent_id": null,
                "description": "Folder for Marathon"
            })
        );
    }

    #[test]
    fn folder_id_keeps_json_form() {
        let numeric: FolderResponse = serde_json::from_str(r#"{"id": 981}"#).unwrap();
        assert_eq!(numeric.id, FolderId::Number(981));
        let text: FolderResponse = serde_json::from_str(r#"{"id": "f-1", "name": "x"}"#).unwrap();
        assert_eq!(text.id, FolderId::from("f-1"));
        assert_eq!(serde_json::to_string(&numeric.id).unwrap(), "981");
    }

    #[test]
    fn client_rejects_incomplete_config() {
        let config = Config::new("i1", "", "Plan");
        assert!(matches!(
            IntervalsClient::new(&config),
            Err(UploadError::Config(_))
        ));
    }
}
