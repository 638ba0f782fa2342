use chrono::{Local, NaiveDate};

use crate::models::Todo;

/// Todos due on the current local day.
pub fn today_todos(todos: &[Todo]) -> Vec<Todo> {
    todos_due_on(todos, Local::now().date_naive())
}

pub fn todos_due_on(todos: &[Todo], day: NaiveDate) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| due_day(todo) == Some(day))
        .cloned()
        .collect()
}

/// Incomplete todos whose due date has already passed, oldest first.
pub fn overdue_todos(todos: &[Todo]) -> Vec<Todo> {
    todos_overdue_before(todos, Local::now().date_naive())
}

pub fn todos_overdue_before(todos: &[Todo], day: NaiveDate) -> Vec<Todo> {
    let mut overdue: Vec<Todo> = todos
        .iter()
        .filter(|todo| !todo.completed)
        .filter(|todo| due_day(todo).map(|due| due < day).unwrap_or(false))
        .cloned()
        .collect();
    overdue.sort_by_key(|todo| todo.due_date);
    overdue
}

fn due_day(todo: &Todo) -> Option<NaiveDate> {
    todo.due_date.map(|due| due.with_timezone(&Local).date_naive())
}
