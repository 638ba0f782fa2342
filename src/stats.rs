use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::Todo;

#[derive(Debug, Clone, PartialEq)]
pub struct DayStat {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthStat {
    pub year: i32,
    pub month: u32,
    pub completed: usize,
    pub total: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoStats {
    pub total_todos: usize,
    pub completed_todos: usize,
    pub completion_rate: f64,
    /// Seven days starting from the current week's Sunday.
    pub weekly: Vec<DayStat>,
    /// Twelve months of the current year.
    pub monthly: Vec<MonthStat>,
}

pub fn calculate_stats(todos: &[Todo]) -> TodoStats {
    calculate_stats_for(todos, Local::now().date_naive())
}

pub fn calculate_stats_for(todos: &[Todo], today: NaiveDate) -> TodoStats {
    let total_todos = todos.len();
    let completed_todos = todos.iter().filter(|t| t.completed).count();

    let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let weekly = (0..7)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            let day_todos: Vec<&Todo> = todos
                .iter()
                .filter(|t| due_day(t) == Some(date))
                .collect();
            let total = day_todos.len();
            let completed = day_todos.iter().filter(|t| t.completed).count();
            DayStat {
                date,
                completed,
                total,
                rate: percent(completed, total),
            }
        })
        .collect();

    let monthly = (1..=12)
        .map(|month| {
            let month_todos: Vec<&Todo> = todos
                .iter()
                .filter(|t| {
                    due_day(t)
                        .map(|d| d.year() == today.year() && d.month() == month)
                        .unwrap_or(false)
                })
                .collect();
            let total = month_todos.len();
            let completed = month_todos.iter().filter(|t| t.completed).count();
            MonthStat {
                year: today.year(),
                month,
                completed,
                total,
                rate: percent(completed, total),
            }
        })
        .collect();

    TodoStats {
        total_todos,
        completed_todos,
        completion_rate: percent(completed_todos, total_todos),
        weekly,
        monthly,
    }
}

fn due_day(todo: &Todo) -> Option<NaiveDate> {
    todo.due_date.map(|due| due.with_timezone(&Local).date_naive())
}

fn percent(completed: usize, total: usize) -> f64 {
    if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}
