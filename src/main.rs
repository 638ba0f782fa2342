use std::env;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use haeya_sync::api::{ApiConfig, HttpTodoApi};
use haeya_sync::error::SyncError;
use haeya_sync::models::{NewSubTodoRequest, NewTodoRequest, Todo};
use haeya_sync::services::{RefreshScheduler, SyncService};
use haeya_sync::session::SessionStore;
use haeya_sync::stats::calculate_stats;
use haeya_sync::store::TodoStore;
use haeya_sync::theme::{self, Theme};
use haeya_sync::views::{overdue_todos, today_todos};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const WEEKDAYS_KO: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "haeya_sync=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args).await {
        match &e {
            SyncError::AuthRequired => {
                eprintln!("{}", e.message());
                eprintln!("HAEYA_ACCESS_TOKEN 환경 변수를 설정한 뒤 다시 시도해주세요.");
            }
            _ => eprintln!("[{}] {}", e.status(), e.message()),
        }
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), SyncError> {
    let command = args.first().map(String::as_str).unwrap_or("list");

    // Theme is purely local state; no service needed.
    if command == "theme" {
        return run_theme(args.get(1).map(String::as_str));
    }
    if command == "help" {
        print_usage();
        return Ok(());
    }

    let api = Arc::new(HttpTodoApi::new(ApiConfig::new_from_env())?);
    let store = Arc::new(TodoStore::new());
    let sessions = Arc::new(SessionStore::from_env());
    let service = Arc::new(SyncService::new(api, store, sessions));

    match command {
        "list" => print_todos(&service.todos().await?),
        "today" => {
            let todos = today_todos(&service.todos().await?);
            if todos.is_empty() {
                println!("오늘은 할 일이 없습니다.");
            } else {
                print_todos(&todos);
            }
        }
        "overdue" => print_todos(&overdue_todos(&service.todos().await?)),
        "stats" => print_stats(&service.todos().await?),
        "add" => {
            let Some(title) = args.get(1) else {
                print_usage();
                return Ok(());
            };
            let content = args.get(2).cloned().unwrap_or_default();
            let due_date = args.get(3).and_then(|raw| parse_due_date(raw));
            let todo = service
                .create_todo(NewTodoRequest {
                    title: title.clone(),
                    content,
                    completed: false,
                    due_date,
                    start_date: None,
                    has_start_date: false,
                })
                .await?;
            println!("추가했습니다: #{} {}", todo.id, todo.title);
        }
        "done" => {
            let Some(id) = parse_id(args.get(1)) else {
                print_usage();
                return Ok(());
            };
            service.todos().await?;
            service.toggle_todo(id).await?;
            println!("완료 상태를 변경했습니다: #{}", id);
        }
        "rm" => {
            let Some(id) = parse_id(args.get(1)) else {
                print_usage();
                return Ok(());
            };
            service.delete_todo(id).await?;
            println!("삭제했습니다: #{}", id);
        }
        "sub-add" => {
            let (Some(todo_id), Some(title)) = (parse_id(args.get(1)), args.get(2)) else {
                print_usage();
                return Ok(());
            };
            let sub = service
                .create_sub_todo(NewSubTodoRequest {
                    todo_id,
                    title: title.clone(),
                    content: args.get(3).cloned().unwrap_or_default(),
                    completed: false,
                })
                .await?;
            println!("추가했습니다: #{} > #{} {}", todo_id, sub.id, sub.title);
        }
        "sub-done" => {
            let (Some(todo_id), Some(sub_id)) = (parse_id(args.get(1)), parse_id(args.get(2)))
            else {
                print_usage();
                return Ok(());
            };
            service.todos().await?;
            service.toggle_sub_todo(todo_id, sub_id).await?;
            println!("완료 상태를 변경했습니다: #{} > #{}", todo_id, sub_id);
        }
        "sub-rm" => {
            let (Some(todo_id), Some(sub_id)) = (parse_id(args.get(1)), parse_id(args.get(2)))
            else {
                print_usage();
                return Ok(());
            };
            service.delete_sub_todo(todo_id, sub_id).await?;
            println!("삭제했습니다: #{} > #{}", todo_id, sub_id);
        }
        "watch" => {
            service.load_all().await?;
            let interval = env::var("HAEYA_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            RefreshScheduler::new(service.clone(), interval).start().await;
        }
        _ => print_usage(),
    }

    Ok(())
}

fn run_theme(value: Option<&str>) -> Result<(), SyncError> {
    let dir = theme::config_dir();
    match value {
        None => println!("{}", theme::load_theme(&dir).as_str()),
        Some("light") => save_theme(&dir, Theme::Light)?,
        Some("dark") => save_theme(&dir, Theme::Dark)?,
        Some(_) => print_usage(),
    }
    Ok(())
}

fn save_theme(dir: &std::path::Path, theme_value: Theme) -> Result<(), SyncError> {
    theme::save_theme(dir, theme_value)
        .map_err(|e| SyncError::Transport(format!("테마 저장에 실패했습니다: {}", e)))
}

fn parse_id(arg: Option<&String>) -> Option<i64> {
    arg.and_then(|raw| raw.parse().ok())
}

/// `YYYY-MM-DD`, taken as local midnight.
fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|dt| Local.from_local_datetime(&dt).single())
        .map(|dt| dt.with_timezone(&Utc))
}

fn print_todos(todos: &[Todo]) {
    for todo in todos {
        let mark = if todo.completed { "x" } else { " " };
        let due = todo
            .due_date
            .map(|d| format!(" (마감 {})", d.with_timezone(&Local).format("%Y-%m-%d")))
            .unwrap_or_default();
        println!("[{}] #{} {}{}", mark, todo.id, todo.title, due);
        for sub in &todo.sub_todos {
            let sub_mark = if sub.completed { "x" } else { " " };
            println!("    [{}] #{} {}", sub_mark, sub.id, sub.title);
        }
    }
}

fn print_stats(todos: &[Todo]) {
    let stats = calculate_stats(todos);
    println!("전체 할 일: {}개", stats.total_todos);
    println!("완료된 할 일: {}개", stats.completed_todos);
    println!("완료율: {:.1}%", stats.completion_rate);

    println!("\n주간 통계");
    for day in &stats.weekly {
        let label = WEEKDAYS_KO[day.date.weekday().num_days_from_sunday() as usize];
        println!("  {}: {}/{} ({:.1}%)", label, day.completed, day.total, day.rate);
    }

    println!("\n월간 통계");
    for month in &stats.monthly {
        println!(
            "  {}월: {}/{} ({:.1}%)",
            month.month, month.completed, month.total, month.rate
        );
    }
}

fn print_usage() {
    println!("사용법: haeya <command>");
    println!("  list                         전체 할 일");
    println!("  today                        오늘의 할 일");
    println!("  overdue                      지난 할 일");
    println!("  stats                        통계 및 회고");
    println!("  add <제목> [내용] [YYYY-MM-DD]  할 일 추가");
    println!("  done <id>                    완료 상태 토글");
    println!("  rm <id>                      할 일 삭제");
    println!("  sub-add <todo id> <제목> [내용]  서브 할 일 추가");
    println!("  sub-done <todo id> <sub id>  서브 할 일 토글");
    println!("  sub-rm <todo id> <sub id>    서브 할 일 삭제");
    println!("  watch                        주기적으로 캐시 새로고침");
    println!("  theme [light|dark]           테마 조회/설정");
}
