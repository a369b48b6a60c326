use mentor_llm::prompt::{course_prompt, lesson_prompt, tutor_prompt};
use mentor_llm::{ContentGenerator, GenerationError};
use mentor_progress::{
    LearnerProfile, ProfileStore, ProgressError, ProgressTracker, ProgressUpdate, StatusSummary,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Everything that can stop a tutor action. Each variant leaves the stored
/// profile exactly as it was before the action.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("The tutor could not generate a reply: {0}")]
    Generation(#[from] GenerationError),

    #[error("Your progress could not be saved: {0:#}")]
    Persistence(anyhow::Error),

    #[error("Please provide a {0}.")]
    EmptyInput(&'static str),
}

#[derive(Clone, Debug)]
pub struct CourseOutcome {
    pub topic: String,
    pub text: String,
    pub update: ProgressUpdate,
    pub status: StatusSummary,
}

#[derive(Clone, Debug)]
pub struct LessonOutcome {
    /// One-based module number of the lesson just taught.
    pub module: u32,
    /// One-based lesson number within the module.
    pub lesson: u32,
    /// The course was already finished, so this was a review lesson.
    pub review: bool,
    pub course_complete: bool,
    pub text: String,
    pub update: ProgressUpdate,
    pub status: StatusSummary,
}

/// One learner's tutor: the tracker, where it is saved, and the generator.
///
/// Every mutating action follows the same order: generate (if needed), apply
/// the tracker rule, save. A generator failure happens before any mutation; a
/// save failure rolls the in-memory profile back to its previous state.
#[derive(Debug)]
pub struct TutorSession<G> {
    tracker: ProgressTracker,
    store: ProfileStore,
    generator: G,
}

impl<G: ContentGenerator> TutorSession<G> {
    /// Start from defaults, then restore the persisted record if one can be read.
    pub async fn open(store: ProfileStore, generator: G, mut tracker: ProgressTracker) -> Self {
        tracker.initialize();
        let location = store.location();

        match store.load().await {
            Ok(Some(record)) => {
                let restored = tracker.restore(&record);
                if !restored.invalid.is_empty() {
                    warn!(
                        fields = ?restored.invalid,
                        %location,
                        "profile record had invalid fields; defaults used for them"
                    );
                }
                if !restored.missing.is_empty() {
                    debug!(fields = ?restored.missing, %location, "profile record is missing fields");
                }

                let profile = tracker.profile();
                info!(
                    %location,
                    level = profile.level,
                    xp = profile.xp,
                    style = %profile.learning_style,
                    "learner profile restored"
                );
            }
            Ok(None) => info!(%location, "no saved learner profile; starting fresh"),
            Err(err) => warn!(?err, %location, "failed to load learner profile; starting from defaults"),
        }

        Self {
            tracker,
            store,
            generator,
        }
    }

    pub fn profile(&self) -> &LearnerProfile {
        self.tracker.profile()
    }

    pub fn status(&self) -> StatusSummary {
        self.tracker.status_summary()
    }

    pub fn course_complete(&self) -> bool {
        self.tracker.course_complete()
    }

    pub async fn apply_style(&mut self, raw_style: &str) -> Result<StatusSummary, TutorError> {
        let snapshot = self.tracker.profile().clone();
        let style = self.tracker.set_learning_style(raw_style)?;
        self.persist(snapshot).await?;

        info!(%style, "learning style updated");
        Ok(self.status())
    }

    pub async fn generate_course(&mut self, topic: &str) -> Result<CourseOutcome, TutorError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(TutorError::EmptyInput("course topic"));
        }

        let text = self.generator.generate(&course_prompt(topic)).await?;

        let snapshot = self.tracker.profile().clone();
        let update = self.tracker.record_course_generated(topic, &text);
        self.persist(snapshot).await?;

        info!(topic, xp = update.xp, level = update.level, "course generated");
        Ok(CourseOutcome {
            topic: topic.to_owned(),
            text,
            update,
            status: self.status(),
        })
    }

    pub async fn next_lesson(&mut self) -> Result<LessonOutcome, TutorError> {
        if !self.tracker.profile().has_course() {
            return Err(ProgressError::NoCourse.into());
        }

        let (module, lesson) = self.tracker.profile().position();
        let review = self.tracker.course_complete();
        let text = self
            .generator
            .generate(&lesson_prompt(self.tracker.profile()))
            .await?;

        let snapshot = self.tracker.profile().clone();
        let update = self.tracker.record_lesson_completed();
        self.persist(snapshot).await?;

        info!(
            module = module + 1,
            lesson = lesson + 1,
            review,
            xp = update.xp,
            level = update.level,
            "lesson taught"
        );
        Ok(LessonOutcome {
            module: module + 1,
            lesson: lesson + 1,
            review,
            course_complete: self.tracker.course_complete(),
            text,
            update,
            status: self.status(),
        })
    }

    /// Free-form question. Never touches the profile.
    pub async fn ask(&self, question: &str) -> Result<String, TutorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(TutorError::EmptyInput("question"));
        }

        let prompt = tutor_prompt(self.tracker.profile(), question);
        Ok(self.generator.generate(&prompt).await?)
    }

    /// Returns `false` when the topic was already tracked (nothing saved).
    pub async fn add_weak_topic(&mut self, topic: &str) -> Result<bool, TutorError> {
        let snapshot = self.tracker.profile().clone();
        if !self.tracker.add_weak_topic(topic)? {
            return Ok(false);
        }

        self.persist(snapshot).await?;
        Ok(true)
    }

    /// Returns `false` when the topic was not tracked (nothing saved).
    pub async fn remove_weak_topic(&mut self, topic: &str) -> Result<bool, TutorError> {
        let snapshot = self.tracker.profile().clone();
        if !self.tracker.remove_weak_topic(topic) {
            return Ok(false);
        }

        self.persist(snapshot).await?;
        Ok(true)
    }

    async fn persist(&mut self, snapshot: LearnerProfile) -> Result<(), TutorError> {
        if let Err(err) = self.store.save(self.tracker.profile()).await {
            warn!(?err, location = %self.store.location(), "failed to save learner profile; rolling back");
            self.tracker.reset_to(snapshot);
            return Err(TutorError::Persistence(err));
        }

        Ok(())
    }
}
