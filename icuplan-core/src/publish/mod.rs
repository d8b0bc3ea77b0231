//! Folder-then-upload sequencing for one plan.

use std::cell::Cell;

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::UploadError;
use crate::plan::Plan;
use crate::remote::{FolderId, FolderRequest, WorkoutService};
use crate::transform::{WorkoutDraft, WorkoutRecord, render_plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    /// Claimed by a `publish` call; no folder yet.
    Publishing,
    FolderCreated,
    WorkoutsUploaded,
    UploadFailed,
    FolderCreateFailed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::WorkoutsUploaded | RunState::UploadFailed | RunState::FolderCreateFailed
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub folder_id: FolderId,
    pub uploaded: usize,
}

pub struct Publisher<S: WorkoutService> {
    service: S,
    plan_name: String,
    state: Cell<RunState>,
}

impl<S: WorkoutService> Publisher<S> {
    pub fn new(service: S, plan_name: &str) -> Self {
        Self {
            service,
            plan_name: plan_name.to_string(),
            state: Cell::new(RunState::Start),
        }
    }

    pub fn from_config(service: S, config: &Config) -> Self {
        Self::new(service, &config.plan_name)
    }

    pub fn state(&self) -> RunState {
        self.state.get()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn advance(&self, next: RunState) {
        debug!("publish state {:?} -> {:?}", self.state.get(), next);
        self.state.set(next);
    }

    /// Validate and render the plan, then create its folder and upload every
    /// workout into it. Nothing is sent if the plan does not validate.
    pub async fn publish(&self, plan: &Plan) -> Result<PublishReport, UploadError> {
        plan.validate()?;
        self.publish_drafts(render_plan(plan)).await
    }

    pub async fn publish_drafts(
        &self,
        drafts: Vec<WorkoutDraft>,
    ) -> Result<PublishReport, UploadError> {
        if self.state.get() != RunState::Start {
            return Err(UploadError::Config(
                "publisher already ran; create a new one per plan".into(),
            ));
        }
        // Claimed before the first await so a concurrent call sees it.
        self.advance(RunState::Publishing);
        if drafts.is_empty() {
            warn!("Plan '{}' has no trainings", self.plan_name);
        }

        let request = FolderRequest::plan(&self.plan_name);
        let folder_id = match self.service.create_folder(&request).await {
            Ok(id) => id,
            Err(e) => {
                self.advance(RunState::FolderCreateFailed);
                debug!("Failed to create training plan folder: {}", e);
                return Err(e);
            }
        };
        self.advance(RunState::FolderCreated);
        info!(
            "Training plan folder created successfully. Folder id: {}",
            folder_id
        );

        let records: Vec<WorkoutRecord> = drafts
            .into_iter()
            .map(|d| d.into_record(folder_id.clone()))
            .collect();

        match self.service.bulk_create_workouts(&records).await {
            Ok(()) => {
                self.advance(RunState::WorkoutsUploaded);
                info!("Trainings uploaded successfully ({})", records.len());
                Ok(PublishReport {
                    folder_id,
                    uploaded: records.len(),
                })
            }
            Err(e) => {
                self.advance(RunState::UploadFailed);
                debug!("Failed to upload trainings: {}", e);
                warn!("Folder {} was created but is left empty", folder_id);
                Err(e)
            }
        }
    }
}
