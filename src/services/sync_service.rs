use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::api::TodoApi;
use crate::error::SyncError;
use crate::models::{NewSubTodoRequest, NewTodoRequest, SubTodo, SubTodoPatch, Todo, TodoPatch};
use crate::session::{Session, SessionStore};
use crate::store::TodoStore;

/// Bridges user intents to the remote store and keeps the local cache
/// consistent. Every mutation follows the same two-phase protocol:
/// commit remotely, then patch the cache and mark the cached list stale
/// so the next read re-pulls from the source of truth. A failed call
/// leaves the cache exactly as it was.
pub struct SyncService {
    api: Arc<dyn TodoApi>,
    store: Arc<TodoStore>,
    sessions: Arc<SessionStore>,
    loaded: AtomicBool,
    stale: AtomicBool,
}

impl SyncService {
    pub fn new(api: Arc<dyn TodoApi>, store: Arc<TodoStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            sessions,
            loaded: AtomicBool::new(false),
            stale: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    fn session(&self) -> Result<Session, SyncError> {
        self.sessions.current().ok_or(SyncError::AuthRequired)
    }

    fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Full fetch; replaces the cache and clears the stale flag.
    pub async fn load_all(&self) -> Result<Vec<Todo>, SyncError> {
        let session = self.session()?;
        let todos = self.api.fetch_todos(&session).await?;
        self.store.replace_all(todos.clone());
        self.loaded.store(true, Ordering::Release);
        self.stale.store(false, Ordering::Release);
        info!("Loaded {} todos from the server", todos.len());
        Ok(todos)
    }

    /// Snapshot for rendering. Re-pulls when the cache was invalidated by
    /// a mutation or has never been filled; skipping or delaying that
    /// reconciliation is safe, it just serves the optimistic state longer.
    pub async fn todos(&self) -> Result<Vec<Todo>, SyncError> {
        if !self.loaded.load(Ordering::Acquire) || self.stale.load(Ordering::Acquire) {
            return self.load_all().await;
        }
        Ok(self.store.snapshot())
    }

    pub async fn create_todo(&self, req: NewTodoRequest) -> Result<Todo, SyncError> {
        let session = self.session()?;
        let mut todo = self.api.create_todo(&session, &req).await?;
        todo.sub_todos = Vec::new();
        self.store.insert(todo.clone());
        self.invalidate();
        Ok(todo)
    }

    pub async fn update_todo(&self, id: i64, patch: TodoPatch) -> Result<Todo, SyncError> {
        let session = self.session()?;
        let todo = self.api.update_todo(&session, id, &patch).await?;
        self.store.patch(id, &patch);
        self.invalidate();
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), SyncError> {
        let session = self.session()?;
        self.api.delete_todo(&session, id).await?;
        self.store.remove(id);
        self.invalidate();
        Ok(())
    }

    pub async fn create_sub_todo(&self, req: NewSubTodoRequest) -> Result<SubTodo, SyncError> {
        let session = self.session()?;
        let sub = self.api.create_sub_todo(&session, &req).await?;
        self.store.insert_sub(sub.todo_id, sub.clone());
        self.invalidate();
        Ok(sub)
    }

    pub async fn update_sub_todo(
        &self,
        todo_id: i64,
        sub_id: i64,
        patch: SubTodoPatch,
    ) -> Result<SubTodo, SyncError> {
        let session = self.session()?;
        let sub = self.api.update_sub_todo(&session, sub_id, &patch).await?;
        self.store.patch_sub(todo_id, sub_id, &patch);
        self.invalidate();
        Ok(sub)
    }

    pub async fn delete_sub_todo(&self, todo_id: i64, sub_id: i64) -> Result<(), SyncError> {
        let session = self.session()?;
        self.api.delete_sub_todo(&session, sub_id).await?;
        self.store.remove_sub(todo_id, sub_id);
        self.invalidate();
        Ok(())
    }

    /// Flips `completed` on a cached todo. No-op when the id is not cached.
    pub async fn toggle_todo(&self, id: i64) -> Result<(), SyncError> {
        let Some(todo) = self.store.get(id) else {
            return Ok(());
        };
        let patch = TodoPatch {
            completed: Some(!todo.completed),
            ..TodoPatch::default()
        };
        self.update_todo(id, patch).await?;
        Ok(())
    }

    /// Same as `toggle_todo`, scoped under the parent todo.
    pub async fn toggle_sub_todo(&self, todo_id: i64, sub_id: i64) -> Result<(), SyncError> {
        let Some(sub) = self.store.get_sub(todo_id, sub_id) else {
            return Ok(());
        };
        let patch = SubTodoPatch {
            completed: Some(!sub.completed),
            ..SubTodoPatch::default()
        };
        self.update_sub_todo(todo_id, sub_id, patch).await?;
        Ok(())
    }
}
