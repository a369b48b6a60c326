use serde_json::{Map, Value};

use crate::model::profile::{Course, LearnerProfile, STARTING_LEVEL};
use crate::model::style::LearningStyle;
use crate::tracker::{LESSONS_PER_MODULE, MODULES_PER_COURSE};

/// Result of rebuilding a profile from an untrusted persisted record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoredProfile {
    pub profile: LearnerProfile,
    /// Fields absent from the record, left at their defaults.
    pub missing: Vec<&'static str>,
    /// Fields present but unusable, reset to their defaults.
    pub invalid: Vec<&'static str>,
}

impl RestoredProfile {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Rebuild a profile field by field. Anything missing or malformed keeps the
/// value from `defaults`.
pub fn restore_profile(record: &Value, defaults: &LearnerProfile) -> RestoredProfile {
    let mut restored = RestoredProfile {
        profile: defaults.clone(),
        missing: Vec::new(),
        invalid: Vec::new(),
    };

    let Some(fields) = record.as_object() else {
        restored.invalid.push("record");
        return restored;
    };

    let mut reader = FieldReader {
        fields,
        restored: &mut restored,
    };

    if let Some(name) = reader.read("name", |value| {
        value
            .as_str()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
    }) {
        reader.restored.profile.name = name;
    }

    if let Some(style) = reader.read("learning_style", |value| {
        value.as_str().and_then(LearningStyle::parse)
    }) {
        reader.restored.profile.learning_style = style;
    }

    if let Some(xp) = reader.read("xp", Value::as_u64) {
        reader.restored.profile.xp = xp;
    }

    if let Some(level) = reader.read("level", |value| {
        value.as_u64().filter(|level| *level >= STARTING_LEVEL)
    }) {
        reader.restored.profile.level = level;
    }

    if let Some(course) = reader.read("course", parse_course) {
        reader.restored.profile.course = course;
    }

    let module = reader.read("current_module_index", parse_index);
    let lesson = reader.read("current_lesson_index", parse_index);
    let position = (
        module.unwrap_or(defaults.current_module_index),
        lesson.unwrap_or(defaults.current_lesson_index),
    );
    if is_course_position(position) {
        (
            reader.restored.profile.current_module_index,
            reader.restored.profile.current_lesson_index,
        ) = position;
    } else {
        reader.restored.profile.current_module_index = 0;
        reader.restored.profile.current_lesson_index = 0;
        if module.is_some() {
            reader.restored.invalid.push("current_module_index");
        }
        if lesson.is_some() {
            reader.restored.invalid.push("current_lesson_index");
        }
    }

    if let Some(topics) = reader.read("weak_topics", |value| {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|topic| !topic.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
    }) {
        reader.restored.profile.weak_topics = topics;
    }

    restored
}

struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    restored: &'a mut RestoredProfile,
}

impl FieldReader<'_> {
    fn read<T>(&mut self, key: &'static str, parse: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let Some(value) = self.fields.get(key) else {
            self.restored.missing.push(key);
            return None;
        };

        let parsed = parse(value);
        if parsed.is_none() {
            self.restored.invalid.push(key);
        }
        parsed
    }
}

/// Accepts `null`, a bare string, or an object carrying a `raw` string.
fn parse_course(value: &Value) -> Option<Option<Course>> {
    match value {
        Value::Null => Some(None),
        Value::String(raw) if raw.trim().is_empty() => Some(None),
        Value::String(raw) => Some(Some(Course {
            topic: String::new(),
            raw: raw.clone(),
        })),
        Value::Object(fields) => {
            let raw = fields.get("raw")?.as_str()?;
            if raw.trim().is_empty() {
                return Some(None);
            }

            let topic = fields
                .get("topic")
                .and_then(Value::as_str)
                .unwrap_or_default();

            Some(Some(Course {
                topic: topic.to_owned(),
                raw: raw.to_owned(),
            }))
        }
        _ => None,
    }
}

fn parse_index(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|index| u32::try_from(index).ok())
}

/// A lesson inside the course, or `(MODULES_PER_COURSE, 0)` once it is finished.
fn is_course_position((module, lesson): (u32, u32)) -> bool {
    (module < MODULES_PER_COURSE && lesson < LESSONS_PER_MODULE)
        || (module == MODULES_PER_COURSE && lesson == 0)
}
