use std::fmt;

use serde_json::Value;

use crate::error::ProgressError;
use crate::model::profile::{Course, LearnerProfile};
use crate::model::record::{RestoredProfile, restore_profile};
use crate::model::style::LearningStyle;

/// XP needed per level: level `n` is left once `xp >= n * LEVEL_XP_STEP`.
pub const LEVEL_XP_STEP: u64 = 100;
pub const MODULES_PER_COURSE: u32 = 4;
pub const LESSONS_PER_MODULE: u32 = 3;

/// XP granted per tracked event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpAwards {
    pub course: u64,
    pub lesson: u64,
}

impl XpAwards {
    /// Awards used by the local-model tutor.
    pub const LOCAL: Self = Self {
        course: 20,
        lesson: 30,
    };

    /// Awards used by the hosted-inference tutor.
    pub const HOSTED: Self = Self {
        course: 20,
        lesson: 20,
    };

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::LOCAL),
            "hosted" => Some(Self::HOSTED),
            _ => None,
        }
    }
}

impl Default for XpAwards {
    fn default() -> Self {
        Self::LOCAL
    }
}

/// Outcome of a single XP award.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub xp_gained: u64,
    pub xp: u64,
    pub level: u64,
    pub levels_gained: u64,
}

impl ProgressUpdate {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Read-only view backing the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSummary {
    pub level: u64,
    pub xp: u64,
    pub learning_style: LearningStyle,
}

impl StatusSummary {
    /// XP at which the current level is left.
    pub fn next_level_xp(&self) -> u64 {
        self.level.saturating_mul(LEVEL_XP_STEP)
    }

    pub fn xp_to_next_level(&self) -> u64 {
        self.next_level_xp().saturating_sub(self.xp)
    }

    /// XP earned inside the current level, out of `LEVEL_XP_STEP`.
    pub fn xp_into_level(&self) -> u64 {
        LEVEL_XP_STEP.saturating_sub(self.xp_to_next_level())
    }
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level: {} | XP: {} | Style: {}",
            self.level, self.xp, self.learning_style
        )
    }
}

/// Owns the learner profile and applies the reward and leveling rules.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    profile: LearnerProfile,
    defaults: LearnerProfile,
    awards: XpAwards,
}

impl ProgressTracker {
    pub fn new(awards: XpAwards) -> Self {
        Self::with_defaults(LearnerProfile::default(), awards)
    }

    pub fn with_defaults(defaults: LearnerProfile, awards: XpAwards) -> Self {
        Self {
            profile: defaults.clone(),
            defaults,
            awards,
        }
    }

    pub fn profile(&self) -> &LearnerProfile {
        &self.profile
    }

    pub fn awards(&self) -> XpAwards {
        self.awards
    }

    pub fn initialize(&mut self) {
        self.profile = self.defaults.clone();
    }

    /// Overwrite the profile from a persisted record, field by field.
    pub fn restore(&mut self, record: &Value) -> RestoredProfile {
        let restored = restore_profile(record, &self.defaults);
        self.profile = restored.profile.clone();
        restored
    }

    /// Put back a previously captured profile, e.g. after a failed save.
    pub fn reset_to(&mut self, snapshot: LearnerProfile) {
        self.profile = snapshot;
    }

    pub fn record_course_generated(&mut self, topic: &str, generated_text: &str) -> ProgressUpdate {
        self.profile.course = Some(Course {
            topic: topic.trim().to_owned(),
            raw: generated_text.to_owned(),
        });
        self.profile.current_module_index = 0;
        self.profile.current_lesson_index = 0;

        self.award(self.awards.course)
    }

    pub fn record_lesson_completed(&mut self) -> ProgressUpdate {
        let update = self.award(self.awards.lesson);
        self.advance_position();
        update
    }

    pub fn set_learning_style(&mut self, raw: &str) -> Result<LearningStyle, ProgressError> {
        let style = raw.parse::<LearningStyle>()?;
        self.profile.learning_style = style;
        Ok(style)
    }

    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary {
            level: self.profile.level,
            xp: self.profile.xp,
            learning_style: self.profile.learning_style,
        }
    }

    /// Returns `false` when the topic was already tracked.
    pub fn add_weak_topic(&mut self, topic: &str) -> Result<bool, ProgressError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ProgressError::EmptyTopic);
        }

        if self.weak_topic_index(topic).is_some() {
            return Ok(false);
        }

        self.profile.weak_topics.push(topic.to_owned());
        Ok(true)
    }

    /// Returns `false` when the topic was not tracked.
    pub fn remove_weak_topic(&mut self, topic: &str) -> bool {
        match self.weak_topic_index(topic.trim()) {
            Some(index) => {
                self.profile.weak_topics.remove(index);
                true
            }
            None => false,
        }
    }

    /// True once every lesson of the course has been taught.
    pub fn course_complete(&self) -> bool {
        self.profile.has_course() && self.profile.current_module_index >= MODULES_PER_COURSE
    }

    fn weak_topic_index(&self, topic: &str) -> Option<usize> {
        self.profile
            .weak_topics
            .iter()
            .position(|known| known.eq_ignore_ascii_case(topic))
    }

    fn award(&mut self, amount: u64) -> ProgressUpdate {
        let level_before = self.profile.level;

        self.profile.xp = self.profile.xp.saturating_add(amount);
        // Same result as `while xp >= level * 100 { level += 1 }`, without
        // iterating over huge restored xp values.
        let earned_level = self.profile.xp / LEVEL_XP_STEP + 1;
        self.profile.level = self.profile.level.max(earned_level);

        ProgressUpdate {
            xp_gained: amount,
            xp: self.profile.xp,
            level: self.profile.level,
            levels_gained: self.profile.level - level_before,
        }
    }

    fn advance_position(&mut self) {
        if !self.profile.has_course() || self.course_complete() {
            return;
        }

        self.profile.current_lesson_index = self.profile.current_lesson_index.saturating_add(1);
        if self.profile.current_lesson_index >= LESSONS_PER_MODULE {
            self.profile.current_lesson_index = 0;
            self.profile.current_module_index += 1;
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(XpAwards::default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{LESSONS_PER_MODULE, MODULES_PER_COURSE, ProgressTracker, XpAwards};
    use crate::error::ProgressError;
    use crate::model::profile::LearnerProfile;
    use crate::model::style::LearningStyle;

    fn tracker_at(xp: u64, level: u64) -> ProgressTracker {
        let mut tracker = ProgressTracker::new(XpAwards::LOCAL);
        tracker.restore(&json!({ "xp": xp, "level": level }));
        tracker
    }

    #[test]
    fn lesson_award_crosses_threshold_once() {
        let mut tracker = tracker_at(80, 1);

        let first = tracker.record_lesson_completed();
        assert_eq!((first.xp, first.level), (110, 2));
        assert!(first.leveled_up());

        let second = tracker.record_lesson_completed();
        assert_eq!((second.xp, second.level), (140, 2));
        assert!(!second.leveled_up());
    }

    #[test]
    fn level_up_fires_exactly_at_threshold() {
        let mut tracker = tracker_at(70, 1);
        let update = tracker.record_lesson_completed();
        assert_eq!((update.xp, update.level), (100, 2));

        let mut tracker = tracker_at(69, 1);
        let update = tracker.record_lesson_completed();
        assert_eq!((update.xp, update.level), (99, 1));
    }

    #[test]
    fn large_awards_cross_several_thresholds() {
        let mut tracker = ProgressTracker::new(XpAwards {
            course: 0,
            lesson: 250,
        });

        let update = tracker.record_lesson_completed();
        assert_eq!((update.xp, update.level), (250, 3));
        assert_eq!(update.levels_gained, 2);
    }

    #[test]
    fn xp_and_level_never_decrease() {
        let mut tracker = ProgressTracker::new(XpAwards::HOSTED);
        let mut last = tracker.status_summary();

        for _ in 0..50 {
            tracker.record_lesson_completed();
            let now = tracker.status_summary();
            assert!(now.xp >= last.xp);
            assert!(now.level >= last.level);
            assert!(now.level >= 1);
            assert!(now.xp < now.level * 100);
            last = now;
        }
    }

    #[test]
    fn restored_level_above_earned_level_is_kept() {
        let mut tracker = tracker_at(10, 5);
        let update = tracker.record_lesson_completed();
        assert_eq!((update.xp, update.level), (40, 5));
    }

    #[test]
    fn huge_restored_xp_does_not_overflow() {
        let mut tracker = tracker_at(u64::MAX - 5, 1);
        let update = tracker.record_lesson_completed();
        assert_eq!(update.xp, u64::MAX);
        assert_eq!(update.level, u64::MAX / 100 + 1);
    }

    #[test]
    fn course_generation_stores_text_and_resets_position() {
        let mut tracker = tracker_at(0, 1);
        tracker.record_course_generated("Old topic", "old text");
        tracker.record_lesson_completed();
        tracker.record_lesson_completed();
        assert_eq!(tracker.profile().position(), (0, 2));

        let update = tracker.record_course_generated("Topic X", "some text");

        let course = tracker.profile().course.as_ref().unwrap();
        assert!(course.raw.contains("some text"));
        assert_eq!(course.topic, "Topic X");
        assert_eq!(tracker.profile().position(), (0, 0));
        assert_eq!(update.xp_gained, XpAwards::LOCAL.course);
    }

    #[test]
    fn lessons_walk_through_modules_and_stop_at_the_end() {
        let mut tracker = ProgressTracker::default();
        tracker.record_course_generated("Rust", "course");

        tracker.record_lesson_completed();
        tracker.record_lesson_completed();
        tracker.record_lesson_completed();
        assert_eq!(tracker.profile().position(), (1, 0));

        let total = MODULES_PER_COURSE * LESSONS_PER_MODULE;
        for _ in 3..total {
            assert!(!tracker.course_complete());
            tracker.record_lesson_completed();
        }

        assert!(tracker.course_complete());
        assert_eq!(tracker.profile().position(), (MODULES_PER_COURSE, 0));

        let xp_before = tracker.profile().xp;
        tracker.record_lesson_completed();
        assert_eq!(tracker.profile().position(), (MODULES_PER_COURSE, 0));
        assert_eq!(tracker.profile().xp, xp_before + XpAwards::LOCAL.lesson);
    }

    #[test]
    fn lesson_after_out_of_range_restore_starts_the_course() {
        let mut tracker = ProgressTracker::default();
        let restored = tracker.restore(&json!({
            "course": { "raw": "text" },
            "current_module_index": 0,
            "current_lesson_index": u32::MAX
        }));
        assert!(!restored.invalid.is_empty());

        tracker.record_lesson_completed();
        assert_eq!(tracker.profile().position(), (0, 1));
    }

    #[test]
    fn lessons_without_course_keep_position() {
        let mut tracker = ProgressTracker::default();
        tracker.record_lesson_completed();

        assert_eq!(tracker.profile().position(), (0, 0));
        assert!(!tracker.course_complete());
    }

    #[test]
    fn style_changes_are_validated() {
        let mut tracker = ProgressTracker::default();

        assert_eq!(
            tracker.set_learning_style("Visual"),
            Ok(LearningStyle::Visual)
        );
        assert!(tracker.status_summary().to_string().contains("Visual"));

        let before = tracker.profile().clone();
        assert_eq!(
            tracker.set_learning_style("Bogus"),
            Err(ProgressError::UnknownStyle("Bogus".to_owned()))
        );
        assert_eq!(tracker.profile(), &before);
    }

    #[test]
    fn status_summary_formats_status_line() {
        let tracker = tracker_at(140, 2);
        let summary = tracker.status_summary();

        assert_eq!(
            summary.to_string(),
            "Level: 2 | XP: 140 | Style: Example-based"
        );
        assert_eq!(summary.next_level_xp(), 200);
        assert_eq!(summary.xp_to_next_level(), 60);
        assert_eq!(summary.xp_into_level(), 40);
    }

    #[test]
    fn weak_topics_are_deduplicated() {
        let mut tracker = ProgressTracker::default();

        assert_eq!(tracker.add_weak_topic(" Lifetimes "), Ok(true));
        assert_eq!(tracker.add_weak_topic("lifetimes"), Ok(false));
        assert_eq!(tracker.add_weak_topic("   "), Err(ProgressError::EmptyTopic));
        assert_eq!(tracker.profile().weak_topics, vec!["Lifetimes"]);

        assert!(tracker.remove_weak_topic("LIFETIMES"));
        assert!(!tracker.remove_weak_topic("lifetimes"));
        assert!(tracker.profile().weak_topics.is_empty());
    }

    #[test]
    fn initialize_and_reset_restore_known_states() {
        let mut tracker = ProgressTracker::with_defaults(LearnerProfile::named("Ada"), XpAwards::LOCAL);
        let snapshot = tracker.profile().clone();

        tracker.record_course_generated("Rust", "text");
        tracker.reset_to(snapshot.clone());
        assert_eq!(tracker.profile(), &snapshot);

        tracker.record_lesson_completed();
        tracker.initialize();
        assert_eq!(tracker.profile(), &LearnerProfile::named("Ada"));
    }

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(XpAwards::preset("local"), Some(XpAwards::LOCAL));
        assert_eq!(XpAwards::preset(" Hosted "), Some(XpAwards::HOSTED));
        assert_eq!(XpAwards::preset("cloud"), None);
    }
}
