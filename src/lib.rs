//! This crate provides a personal task scheduler core.
//!
//! Tasks are bound to a calendar day. They are stored by a [`TaskRepository`](repository::TaskRepository), that persists
//! the whole collection under a single key of any asynchronous key/value medium (see [`traits::KeyValueStore`] and the [`store`] module).
//!
//! Month views do not store anything: they display [`MarkedDates`](projector::MarkedDates), that the [`projector`] module derives from the tasks. \
//! An [`Agenda`] pairs both, and exposes the `refresh` operation screens call whenever they need fresh data.

pub mod traits;
pub mod error;
pub use error::{StoreError, TaskError, ValidationError};

mod task;
pub use task::{NewTask, Task, TaskDate, TaskId, TaskTime};
pub mod repository;
pub use repository::TaskRepository;
pub mod projector;
pub use projector::{project, Mark, MarkedDates, Projector};
pub mod agenda;
pub use agenda::Agenda;

pub mod store;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
