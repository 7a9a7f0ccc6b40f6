use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::mock_behaviour::MockBehaviour;
use crate::traits::KeyValueStore;


/// A store that lives in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,

    /// How long every operation waits before it touches `values`
    latency: Option<Duration>,
    /// The maximum size of a single value, in bytes
    quota: Option<usize>,
    mock_behaviour: Mutex<Option<MockBehaviour>>,

    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation will be suspended for `latency` before it completes
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Values larger than `max_bytes` will be refused
    pub fn with_quota(mut self, max_bytes: usize) -> Self {
        self.quota = Some(max_bytes);
        self
    }

    pub fn with_mock_behaviour(mut self, behaviour: MockBehaviour) -> Self {
        self.mock_behaviour = Mutex::new(Some(behaviour));
        self
    }

    /// Change (or remove) the failures this store should simulate from now on
    pub async fn set_mock_behaviour(&self, behaviour: Option<MockBehaviour>) {
        *self.mock_behaviour.lock().await = behaviour;
    }

    /// How many `get` have been served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// How many `set` have succeeded so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(behaviour) = self.mock_behaviour.lock().await.as_mut() {
            behaviour.can_get()?;
        }
        self.simulate_latency().await;

        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        if let Some(behaviour) = self.mock_behaviour.lock().await.as_mut() {
            behaviour.can_set()?;
        }
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded { key: key.to_string(), size: value.len(), limit });
            }
        }
        self.simulate_latency().await;

        self.values.lock().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        if let Some(behaviour) = self.mock_behaviour.lock().await.as_mut() {
            behaviour.can_remove()?;
        }
        self.simulate_latency().await;

        self.values.lock().await.remove(key);
        Ok(())
    }
}
