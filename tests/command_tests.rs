use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tudu::commands::*;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut data_dir = env::temp_dir();
    data_dir.push(format!("tudu_test_{}", test_name));

    // Set env var
    env::set_var("TUDU_DATA", data_dir.to_str().unwrap());

    // Clean up before test
    if data_dir.exists() {
        fs::remove_dir_all(&data_dir).unwrap();
    }

    // Run test
    f(data_dir.clone());

    // Clean up after test
    if data_dir.exists() {
        fs::remove_dir_all(&data_dir).unwrap();
    }
    env::remove_var("TUDU_DATA");
    env::remove_var("TUDU_PERSIST_EMPTY");
}

#[test]
fn test_add_persists_a_full_record() {
    with_test_db("add", |_dir| {
        cmd_add(
            "Test Task".into(),
            Some("With a description".into()),
            Some("2025-12-01".into()),
            true,
        );

        let todos = load_persisted();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test Task");
        assert_eq!(todos[0].description.as_deref(), Some("With a description"));
        assert_eq!(todos[0].due_date, Some("2025-12-01".parse().unwrap()));
        assert!(!todos[0].completed);
        assert!(!todos[0].creation_date.is_empty());
    });
}

#[test]
fn test_add_rejects_a_blank_title() {
    with_test_db("add_blank", |_dir| {
        cmd_add("   ".into(), None, None, true);
        assert!(load_persisted().is_empty());
    });
}

#[test]
fn test_add_rejects_a_malformed_due_date() {
    with_test_db("add_bad_due", |_dir| {
        cmd_add("Task".into(), None, Some("12/01/2025".into()), true);
        assert!(load_persisted().is_empty());
    });
}

#[test]
fn test_toggle_flips_and_flips_back() {
    with_test_db("toggle", |_dir| {
        cmd_add("Task".into(), None, None, true);
        let id = load_persisted()[0].id;

        cmd_toggle(id, true);
        assert!(load_persisted()[0].completed);

        cmd_toggle(id, true);
        assert!(!load_persisted()[0].completed);
    });
}

#[test]
fn test_toggle_unknown_id_changes_nothing() {
    with_test_db("toggle_unknown", |_dir| {
        cmd_add("Task".into(), None, None, true);
        let before = load_persisted();
        cmd_toggle(999, true);
        assert_eq!(load_persisted(), before);
    });
}

#[test]
fn test_remove_deletes_only_the_matching_task() {
    with_test_db("remove", |_dir| {
        cmd_add("Keep me".into(), None, None, true);
        cmd_add("Remove me".into(), None, None, true);
        let todos = load_persisted();
        let remove_id = todos.iter().find(|t| t.title == "Remove me").unwrap().id;

        cmd_remove(remove_id, true);

        let todos = load_persisted();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Keep me");
    });
}

#[test]
fn test_edit_updates_fields_but_not_identity() {
    with_test_db("edit", |_dir| {
        cmd_add("Original".into(), None, None, true);
        let before = load_persisted()[0].clone();

        cmd_edit(
            before.id,
            Some("Renamed".into()),
            Some("Now with notes".into()),
            Some("2026-01-01".into()),
            true,
        );

        let after = load_persisted()[0].clone();
        assert_eq!(after.id, before.id);
        assert_eq!(after.creation_date, before.creation_date);
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.description.as_deref(), Some("Now with notes"));
        assert_eq!(after.due_date, Some("2026-01-01".parse().unwrap()));
    });
}

#[test]
fn test_edit_rejects_a_blank_title() {
    with_test_db("edit_blank", |_dir| {
        cmd_add("Original".into(), None, None, true);
        let id = load_persisted()[0].id;
        cmd_edit(id, Some("  ".into()), None, None, true);
        assert_eq!(load_persisted()[0].title, "Original");
    });
}

#[test]
fn test_deleting_the_last_task_resurrects_on_restore_by_default() {
    with_test_db("empty_guard", |_dir| {
        cmd_add("Last one".into(), None, None, true);
        let id = load_persisted()[0].id;

        cmd_remove(id, true);

        // the skip-empty guard kept the old record on disk
        let todos = load_persisted();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Last one");
    });
}

#[test]
fn test_persist_empty_env_var_disables_the_guard() {
    with_test_db("empty_guard_off", |_dir| {
        env::set_var("TUDU_PERSIST_EMPTY", "1");
        cmd_add("Last one".into(), None, None, true);
        let id = load_persisted()[0].id;

        cmd_remove(id, true);

        assert!(load_persisted().is_empty());
    });
}

#[test]
fn test_login_then_logout_round_trip() {
    use tudu::auth::AuthStatus;

    with_test_db("login", |_dir| {
        assert_eq!(open_auth().status(), AuthStatus::LoggedOut);

        cmd_login("user".into(), "password".into(), true);
        assert_eq!(open_auth().status(), AuthStatus::LoggedIn);

        cmd_logout(true);
        assert_eq!(open_auth().status(), AuthStatus::LoggedOut);

        // bad credentials leave the state alone
        cmd_login("user".into(), "wrong".into(), true);
        assert_eq!(open_auth().status(), AuthStatus::LoggedOut);
    });
}

#[test]
fn test_reset_deletes_tasks_but_not_the_session() {
    with_test_db("reset", |_dir| {
        use tudu::auth::AuthStatus;

        cmd_login("user".into(), "password".into(), true);
        cmd_add("Doomed".into(), None, None, true);

        cmd_reset(true);

        assert!(load_persisted().is_empty());
        assert_eq!(open_auth().status(), AuthStatus::LoggedIn);
    });
}
