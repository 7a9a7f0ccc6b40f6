//! The task repository, that owns the canonical task collection
//!
//! The whole collection is persisted as a single JSON array under a single key.
//! Every change is a read-modify-write of that whole array, so writers are serialized by a single lock.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::config::{Settings, DEFAULT_STORAGE_KEY};
use crate::error::{StoreError, TaskError, TaskResult, ValidationError};
use crate::task::{NewTask, Task};
use crate::traits::KeyValueStore;


/// A task collection backed by a [`KeyValueStore`].
///
/// The collection is cached in memory once it has been loaded. The store is only a durability sink: the cache is replaced
/// after the store has accepted a new collection, never before.
#[derive(Debug)]
pub struct TaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
    /// `None` until the collection has been read from the store.
    /// Holding the write half of this lock is what serializes writers.
    tasks: RwLock<Option<Vec<Task>>>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Create a repository that stores its tasks under the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a repository that stores its tasks under a custom key
    pub fn with_key<K: Into<String>>(store: S, key: K) -> Self {
        Self {
            store,
            key: key.into(),
            tasks: RwLock::new(None),
        }
    }

    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::with_key(store, settings.storage_key.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns every task, in insertion order.
    ///
    /// An empty collection is returned if nothing has ever been stored.
    pub async fn load_all(&self) -> TaskResult<Vec<Task>> {
        {
            let cache = self.tasks.read().await;
            if let Some(tasks) = cache.as_ref() {
                log::debug!("Serving {} cached tasks", tasks.len());
                return Ok(tasks.clone());
            }
        }

        let mut cache = self.tasks.write().await;
        Ok(self.loaded(&mut cache).await?.clone())
    }

    /// Forget the cached collection and read it again from the store.
    ///
    /// This is the way to observe changes that have been made to the store by someone else (e.g. a cleared collection)
    pub async fn reload(&self) -> TaskResult<Vec<Task>> {
        let mut cache = self.tasks.write().await;
        *cache = None;
        Ok(self.loaded(&mut cache).await?.clone())
    }

    /// Returns the tasks of a given `YYYY-MM-DD` day, in insertion order
    pub async fn find_by_date(&self, date: &str) -> TaskResult<Vec<Task>> {
        let tasks = self.load_all().await?;
        Ok(tasks.into_iter()
            .filter(|task| task.date().to_string() == date)
            .collect())
    }

    /// Validate, normalize and store a new task.
    ///
    /// The new collection is persisted as a whole. Concurrent calls are executed one after the other.
    /// In case of an error, the collection is left unchanged.
    pub async fn append(&self, new_task: NewTask) -> TaskResult<Task> {
        let task = new_task.into_task()?;

        let mut cache = self.tasks.write().await;
        let current = self.loaded(&mut cache).await?;

        if current.iter().any(|t| t.id() == task.id()) {
            return Err(ValidationError::DuplicateId(task.id().clone()).into());
        }

        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.extend(current.iter().cloned());
        updated.push(task.clone());

        let payload = serde_json::to_string(&updated)
            .map_err(|err| StoreError::Unavailable(format!("unable to serialize tasks: {}", err)))?;
        if let Err(err) = self.store.set(&self.key, payload).await {
            log::warn!("Unable to save task {}: {}", task.id(), err);
            return Err(err.into());
        }

        log::info!("Added task {} ({:?}) on {}", task.id(), task.title(), task.date());
        *cache = Some(updated);
        Ok(task)
    }

    /// Make sure the cache is filled, reading the store if needed
    async fn loaded<'a>(&self, cache: &'a mut Option<Vec<Task>>) -> TaskResult<&'a Vec<Task>> {
        if cache.is_none() {
            let tasks = self.read_store().await?;
            log::debug!("Loaded {} tasks from {:?}", tasks.len(), self.key);
            *cache = Some(tasks);
        }
        Ok(&*cache.get_or_insert_with(Vec::new))
    }

    async fn read_store(&self) -> TaskResult<Vec<Task>> {
        let payload = match self.store.get(&self.key).await? {
            None => return Ok(Vec::new()),
            Some(payload) => payload,
        };

        let tasks: Vec<Task> = serde_json::from_str(&payload)
            .map_err(|err| self.corruption(err.to_string()))?;

        let mut ids = HashSet::new();
        for task in &tasks {
            if ids.insert(task.id()) == false {
                return Err(self.corruption(format!("task id {} is used more than once", task.id())));
            }
            if task.title().trim().is_empty() {
                return Err(self.corruption(format!("task {} has no title", task.id())));
            }
        }
        Ok(tasks)
    }

    fn corruption(&self, reason: String) -> TaskError {
        log::warn!("Invalid task collection under {:?}: {}", self.key, reason);
        TaskError::Corruption { key: self.key.clone(), reason }
    }
}
