pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod publish;
pub mod remote;
pub mod transform;

pub use config::Config;
pub use error::{Stage, UploadError};
pub use plan::{Plan, load_plan};
pub use publish::{PublishReport, Publisher, RunState};
pub use remote::{FolderId, IntervalsClient, WorkoutService};
