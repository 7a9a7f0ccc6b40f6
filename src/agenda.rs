//! Pairs a [`TaskRepository`] with a [`Projector`], for the screens to consume
//!
//! Marks are never pushed to anyone: the presentation layer calls [`Agenda::refresh`] whenever it needs up-to-date marks.

use crate::config::Settings;
use crate::error::TaskResult;
use crate::projector::{MarkedDates, Projector};
use crate::repository::TaskRepository;
use crate::task::{NewTask, Task};
use crate::traits::KeyValueStore;

#[derive(Debug)]
pub struct Agenda<S: KeyValueStore> {
    repository: TaskRepository<S>,
    projector: Projector,
}

impl<S: KeyValueStore> Agenda<S> {
    pub fn new(repository: TaskRepository<S>, projector: Projector) -> Self {
        Self { repository, projector }
    }

    /// Build an agenda over `store`, using its settings for both the storage key and the mark style
    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::new(
            TaskRepository::from_settings(store, settings),
            Projector::new(settings.style.clone()),
        )
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repository
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Read the task collection from the store again, and compute fresh marks from it
    pub async fn refresh(&self, selected: Option<&str>) -> TaskResult<MarkedDates> {
        let tasks = self.repository.reload().await?;
        Ok(self.projector.project(&tasks, selected))
    }

    /// Compute the marks of the current collection, without forcing a read from the store
    pub async fn marks(&self, selected: Option<&str>) -> TaskResult<MarkedDates> {
        let tasks = self.repository.load_all().await?;
        Ok(self.projector.project(&tasks, selected))
    }

    /// The tasks of a given `YYYY-MM-DD` day
    pub async fn day(&self, date: &str) -> TaskResult<Vec<Task>> {
        self.repository.find_by_date(date).await
    }

    /// Store a new task
    pub async fn add(&self, new_task: NewTask) -> TaskResult<Task> {
        self.repository.append(new_task).await
    }
}
