use serde::{Deserialize, Serialize};

use crate::model::style::LearningStyle;

pub const DEFAULT_LEARNER_NAME: &str = "Student";
pub const STARTING_LEVEL: u64 = 1;

/// Generated course text. The tracker stores it but never interprets it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub topic: String,
    pub raw: String,
}

/// The learner's persisted progress and preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub name: String,
    pub learning_style: LearningStyle,
    pub xp: u64,
    pub level: u64,
    pub course: Option<Course>,
    pub current_module_index: u32,
    pub current_lesson_index: u32,
    pub weak_topics: Vec<String>,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self::named(DEFAULT_LEARNER_NAME)
    }
}

impl LearnerProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            learning_style: LearningStyle::default(),
            xp: 0,
            level: STARTING_LEVEL,
            course: None,
            current_module_index: 0,
            current_lesson_index: 0,
            weak_topics: Vec::new(),
        }
    }

    /// Zero-based `(module, lesson)` of the next lesson to teach.
    pub fn position(&self) -> (u32, u32) {
        (self.current_module_index, self.current_lesson_index)
    }

    pub fn has_course(&self) -> bool {
        self.course.is_some()
    }

    /// Weak topics joined for display, or `none`.
    pub fn weak_topics_label(&self) -> String {
        if self.weak_topics.is_empty() {
            "none".to_owned()
        } else {
            self.weak_topics.join(", ")
        }
    }
}
