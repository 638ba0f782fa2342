use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::models::{SubTodo, SubTodoPatch, Todo, TodoPatch};

/// In-memory mirror of the remote todo list. All reads are snapshots,
/// all mutations run under one write lock so concurrent patches on
/// different todos cannot interleave. Mutations targeting an id that is
/// not cached are silent no-ops and leave every other entry untouched.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: i64) -> Option<Todo> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub fn get_sub(&self, todo_id: i64, sub_id: i64) -> Option<SubTodo> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.id == todo_id)
            .and_then(|t| t.sub_todos.iter().find(|s| s.id == sub_id))
            .cloned()
    }

    /// Wholesale replacement after a successful full fetch.
    pub fn replace_all(&self, todos: Vec<Todo>) {
        *self.write() = todos;
    }

    /// Prepends, so a freshly created todo is at the head of iteration.
    pub fn insert(&self, todo: Todo) {
        self.write().insert(0, todo);
    }

    pub fn patch(&self, id: i64, patch: &TodoPatch) {
        let mut todos = self.write();
        if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
            apply_todo_patch(todo, patch);
        }
    }

    /// Removes the todo and, with it, every sub todo it owns.
    pub fn remove(&self, id: i64) {
        self.write().retain(|t| t.id != id);
    }

    pub fn insert_sub(&self, todo_id: i64, sub: SubTodo) {
        let mut todos = self.write();
        if let Some(todo) = todos.iter_mut().find(|t| t.id == todo_id) {
            todo.sub_todos.push(sub);
        }
    }

    pub fn patch_sub(&self, todo_id: i64, sub_id: i64, patch: &SubTodoPatch) {
        let mut todos = self.write();
        if let Some(todo) = todos.iter_mut().find(|t| t.id == todo_id)
            && let Some(sub) = todo.sub_todos.iter_mut().find(|s| s.id == sub_id)
        {
            apply_sub_todo_patch(sub, patch);
        }
    }

    pub fn remove_sub(&self, todo_id: i64, sub_id: i64) {
        let mut todos = self.write();
        if let Some(todo) = todos.iter_mut().find(|t| t.id == todo_id) {
            todo.sub_todos.retain(|s| s.id != sub_id);
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Todo>> {
        self.todos.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_todo_patch(todo: &mut Todo, patch: &TodoPatch) {
    if let Some(title) = &patch.title {
        todo.title = title.clone();
    }
    if let Some(content) = &patch.content {
        todo.content = content.clone();
    }
    if let Some(completed) = patch.completed {
        todo.completed = completed;
    }
    if let Some(due_date) = patch.due_date {
        todo.due_date = Some(due_date);
    }
    if let Some(start_date) = patch.start_date {
        todo.start_date = Some(start_date);
    }
    if let Some(has_start_date) = patch.has_start_date {
        todo.has_start_date = has_start_date;
    }
}

fn apply_sub_todo_patch(sub: &mut SubTodo, patch: &SubTodoPatch) {
    if let Some(title) = &patch.title {
        sub.title = title.clone();
    }
    if let Some(content) = &patch.content {
        sub.content = content.clone();
    }
    if let Some(completed) = patch.completed {
        sub.completed = completed;
    }
}
