use thiserror::Error;

/// Rejections raised by the progress tracker. None of them mutate the profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error(
        "Unknown learning style `{0}`. Choose one of: Text-based, Example-based, Visual, Gamified."
    )]
    UnknownStyle(String),

    #[error("No course has been generated yet. Generate a course first.")]
    NoCourse,

    #[error("A weak topic must not be empty.")]
    EmptyTopic,
}
