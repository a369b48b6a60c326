pub mod error;
pub mod model;
pub mod store;
pub mod tracker;

pub use error::ProgressError;
pub use model::profile::{Course, LearnerProfile};
pub use model::style::LearningStyle;
pub use store::ProfileStore;
pub use tracker::{ProgressTracker, ProgressUpdate, StatusSummary, XpAwards};
