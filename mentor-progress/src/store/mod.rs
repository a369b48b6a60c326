mod json_store;
mod memory_store;

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use json_store::JsonFileStore;
use memory_store::MemoryProfileStore;

use crate::model::profile::LearnerProfile;

#[derive(Clone, Debug)]
enum StoreBackend {
    JsonFile(JsonFileStore),
    Memory(MemoryProfileStore),
}

/// Durable home of the learner profile: one JSON document, read whole at
/// startup and rewritten whole after every mutation.
#[derive(Clone, Debug)]
pub struct ProfileStore {
    backend: StoreBackend,
}

impl ProfileStore {
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StoreBackend::JsonFile(JsonFileStore::new(path)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory(MemoryProfileStore::default()),
        }
    }

    /// Human-readable location for logs.
    pub fn location(&self) -> String {
        match &self.backend {
            StoreBackend::JsonFile(store) => store.path().display().to_string(),
            StoreBackend::Memory(_) => "memory".to_owned(),
        }
    }

    /// Load the raw record. The record is untrusted; validate it with
    /// [`crate::ProgressTracker::restore`].
    pub async fn load(&self) -> anyhow::Result<Option<Value>> {
        let bytes = match &self.backend {
            StoreBackend::JsonFile(store) => store.read().await,
            StoreBackend::Memory(store) => store.read().await,
        }?;

        match bytes {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!(
                        "failed to parse profile record at `{}`: {e}",
                        self.location()
                    )
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, profile: &LearnerProfile) -> anyhow::Result<()> {
        let payload = serde_json::to_vec_pretty(profile)
            .map_err(|e| anyhow::anyhow!("failed to serialize learner profile: {e}"))?;

        let bytes = payload.len();
        match &self.backend {
            StoreBackend::JsonFile(store) => store.write(payload).await,
            StoreBackend::Memory(store) => store.write(payload).await,
        }?;

        debug!(location = %self.location(), bytes, "learner profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::ProfileStore;
    use crate::model::profile::{Course, LearnerProfile};
    use crate::model::record::restore_profile;
    use crate::model::style::LearningStyle;

    fn sample_profile() -> LearnerProfile {
        LearnerProfile {
            name: "Ada".to_owned(),
            learning_style: LearningStyle::Gamified,
            xp: 230,
            level: 3,
            course: Some(Course {
                topic: "Compilers".to_owned(),
                raw: "Module 1: Lexing".to_owned(),
            }),
            current_module_index: 2,
            current_lesson_index: 1,
            weak_topics: vec!["parsing".to_owned()],
        }
    }

    #[tokio::test]
    async fn json_file_round_trip_preserves_every_field() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::json_file(dir.path().join("student_data.json"));
        let profile = sample_profile();

        store.save(&profile).await.unwrap();
        let record = store.load().await.unwrap().expect("record saved");
        let restored = restore_profile(&record, &LearnerProfile::default());

        assert!(restored.is_clean());
        assert_eq!(restored.profile, profile);
    }

    #[tokio::test]
    async fn memory_round_trip_preserves_every_field() {
        let store = ProfileStore::in_memory();
        let profile = sample_profile();

        assert!(store.load().await.unwrap().is_none());
        store.save(&profile).await.unwrap();

        let record = store.load().await.unwrap().unwrap();
        assert_eq!(
            restore_profile(&record, &LearnerProfile::default()).profile,
            profile
        );
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::json_file(dir.path().join("absent.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_directories_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.json");
        let store = ProfileStore::json_file(&path);

        store.save(&LearnerProfile::default()).await.unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("profile.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = ProfileStore::json_file(&path);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn save_into_unusable_directory_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();

        let store = ProfileStore::json_file(blocker.join("profile.json"));
        assert!(store.save(&LearnerProfile::default()).await.is_err());
    }

    #[tokio::test]
    async fn save_replaces_previous_document() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::json_file(dir.path().join("profile.json"));

        store.save(&LearnerProfile::default()).await.unwrap();
        store.save(&sample_profile()).await.unwrap();

        let record = store.load().await.unwrap().unwrap();
        assert_eq!(record["name"], "Ada");
        assert_eq!(record["xp"], 230);
    }
}
