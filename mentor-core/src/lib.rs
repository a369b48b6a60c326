pub mod session;

use std::sync::Arc;

use mentor_llm::LlmService;
use tokio::sync::Mutex;

pub use session::{CourseOutcome, LessonOutcome, TutorError, TutorSession};

pub type Error = anyhow::Error;

/// Shared bot state. The session mutex serializes tutor actions so each one
/// runs to completion before the next starts.
#[derive(Clone, Debug)]
pub struct Data {
    pub tutor: Arc<Mutex<TutorSession<LlmService>>>,
}

impl Data {
    pub fn new(session: TutorSession<LlmService>) -> Self {
        Self {
            tutor: Arc::new(Mutex::new(session)),
        }
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
