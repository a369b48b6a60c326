use std::sync::Arc;

use tokio::sync::Mutex;

/// Keeps the serialized profile in process memory. Used when no profile path
/// is configured and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryProfileStore {
    document: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryProfileStore {
    pub async fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.document.lock().await.clone())
    }

    pub async fn write(&self, payload: Vec<u8>) -> anyhow::Result<()> {
        *self.document.lock().await = Some(payload);
        Ok(())
    }
}
