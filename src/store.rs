use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ApiError;
use crate::routes::todos::dto::{NewTodo, UpdateTodo};
use crate::routes::todos::model::Todo;

/// In-memory todo collection, shared across handlers via axum state.
///
/// Clones are cheap handles onto the same list. The mutex keeps list
/// mutation and iteration atomic under tokio's multithreaded runtime;
/// nothing here survives a restart.
#[derive(Clone, Default)]
pub struct TodoStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    next_id: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All todos in insertion order.
    pub fn list_all(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    pub fn list_completed(&self) -> Vec<Todo> {
        self.filtered(true)
    }

    pub fn list_active(&self) -> Vec<Todo> {
        self.filtered(false)
    }

    /// Assigns the next id from a monotonic counter and appends the record.
    pub fn create(&self, new: NewTodo) -> Todo {
        let mut inner = self.lock();
        inner.next_id += 1;
        let todo = Todo {
            id: inner.next_id,
            task: new.task,
            completed: new.completed,
            extra: new.extra,
        };
        inner.todos.push(todo.clone());
        todo
    }

    /// Merges the given fields into the record with that id.
    pub fn update(&self, id: u64, changes: UpdateTodo) -> Result<Todo, ApiError> {
        let mut inner = self.lock();
        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)?;

        if let Some(task) = changes.task {
            todo.task = task;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        for (key, value) in changes.extra {
            todo.extra.insert(key, value);
        }

        Ok(todo.clone())
    }

    fn filtered(&self, completed: bool) -> Vec<Todo> {
        self.lock()
            .todos
            .iter()
            .filter(|t| t.completed == completed)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
