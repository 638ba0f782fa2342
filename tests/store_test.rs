use chrono::{TimeZone, Utc};
use haeya_sync::models::{SubTodo, SubTodoPatch, Todo, TodoPatch};
use haeya_sync::store::TodoStore;

fn todo(id: i64, title: &str) -> Todo {
    Todo {
        id,
        title: title.to_string(),
        content: String::new(),
        completed: false,
        due_date: None,
        start_date: None,
        has_start_date: false,
        sub_todos: Vec::new(),
    }
}

fn sub(id: i64, todo_id: i64, title: &str) -> SubTodo {
    SubTodo {
        id,
        todo_id,
        title: title.to_string(),
        content: String::new(),
        completed: false,
    }
}

#[test]
fn replace_all_round_trips() {
    let store = TodoStore::new();
    let todos = vec![todo(1, "first"), todo(2, "second")];

    store.replace_all(todos.clone());

    assert_eq!(store.snapshot(), todos);
}

#[test]
fn insert_prepends_new_todo() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(1, "old")]);

    let due = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let mut milk = todo(2, "Buy milk");
    milk.due_date = Some(due);
    store.insert(milk);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].title, "Buy milk");
    assert_eq!(snapshot[0].due_date, Some(due));
    assert!(snapshot[0].sub_todos.is_empty());
}

#[test]
fn patch_merges_only_given_fields() {
    let store = TodoStore::new();
    let mut original = todo(1, "write report");
    original.content = "quarterly numbers".to_string();
    store.replace_all(vec![original]);

    store.patch(
        1,
        &TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        },
    );

    let patched = store.get(1).expect("todo 1 should exist");
    assert!(patched.completed);
    assert_eq!(patched.title, "write report");
    assert_eq!(patched.content, "quarterly numbers");
}

#[test]
fn patch_missing_id_is_a_noop() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(1, "a"), todo(2, "b")]);
    let before = store.snapshot();

    store.patch(
        99,
        &TodoPatch {
            title: Some("ghost".to_string()),
            completed: Some(true),
            ..TodoPatch::default()
        },
    );

    assert_eq!(store.snapshot(), before);
}

#[test]
fn double_toggle_restores_completion_state() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(7, "call dentist")]);
    let before = store.snapshot();

    store.patch(
        7,
        &TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        },
    );
    store.patch(
        7,
        &TodoPatch {
            completed: Some(false),
            ..TodoPatch::default()
        },
    );

    assert_eq!(store.snapshot(), before);
}

#[test]
fn patch_does_not_touch_sub_todos() {
    let store = TodoStore::new();
    let mut parent = todo(1, "parent");
    parent.sub_todos = vec![sub(10, 1, "child")];
    store.replace_all(vec![parent]);

    store.patch(
        1,
        &TodoPatch {
            title: Some("renamed".to_string()),
            ..TodoPatch::default()
        },
    );

    let patched = store.get(1).expect("todo 1 should exist");
    assert_eq!(patched.title, "renamed");
    assert_eq!(patched.sub_todos, vec![sub(10, 1, "child")]);
}

#[test]
fn remove_missing_id_is_a_noop() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(1, "a")]);
    let before = store.snapshot();

    store.remove(99);

    assert_eq!(store.snapshot(), before);
}

#[test]
fn remove_takes_owned_sub_todos_with_it() {
    let store = TodoStore::new();
    let mut parent = todo(1, "parent");
    parent.sub_todos = vec![sub(10, 1, "child"), sub(11, 1, "other child")];
    store.replace_all(vec![parent, todo(2, "keep")]);

    store.remove(1);

    assert_eq!(store.len(), 1);
    assert!(store.get(1).is_none());
    assert!(store.get_sub(1, 10).is_none());
    assert!(store.get_sub(1, 11).is_none());
}

#[test]
fn insert_sub_appends_only_under_parent() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(5, "groceries"), todo(6, "chores")]);

    store.insert_sub(5, sub(1, 5, "2% milk"));

    let snapshot = store.snapshot();
    assert_eq!(snapshot[0].sub_todos.len(), 1);
    assert_eq!(snapshot[0].sub_todos[0].title, "2% milk");
    assert!(snapshot[1].sub_todos.is_empty());
}

#[test]
fn insert_sub_missing_parent_is_a_noop() {
    let store = TodoStore::new();
    store.replace_all(vec![todo(1, "a")]);
    let before = store.snapshot();

    store.insert_sub(99, sub(1, 99, "orphan"));

    assert_eq!(store.snapshot(), before);
}

#[test]
fn patch_sub_merges_fields() {
    let store = TodoStore::new();
    let mut parent = todo(1, "parent");
    parent.sub_todos = vec![sub(10, 1, "child")];
    store.replace_all(vec![parent]);

    store.patch_sub(
        1,
        10,
        &SubTodoPatch {
            completed: Some(true),
            ..SubTodoPatch::default()
        },
    );

    let patched = store.get_sub(1, 10).expect("sub 10 should exist");
    assert!(patched.completed);
    assert_eq!(patched.title, "child");
}

#[test]
fn patch_sub_missing_ids_are_noops() {
    let store = TodoStore::new();
    let mut parent = todo(1, "parent");
    parent.sub_todos = vec![sub(10, 1, "child")];
    store.replace_all(vec![parent]);
    let before = store.snapshot();

    let rename = SubTodoPatch {
        title: Some("ghost".to_string()),
        ..SubTodoPatch::default()
    };
    store.patch_sub(99, 10, &rename);
    store.patch_sub(1, 99, &rename);

    assert_eq!(store.snapshot(), before);
}

#[test]
fn remove_sub_only_affects_named_sub() {
    let store = TodoStore::new();
    let mut parent = todo(1, "parent");
    parent.sub_todos = vec![sub(10, 1, "first"), sub(11, 1, "second")];
    store.replace_all(vec![parent]);

    store.remove_sub(1, 10);
    store.remove_sub(1, 99);

    let remaining = store.get(1).expect("todo 1 should exist").sub_todos;
    assert_eq!(remaining, vec![sub(11, 1, "second")]);
}
