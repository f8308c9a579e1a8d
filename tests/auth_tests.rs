use tudu::auth::{AuthError, AuthGate, AuthStatus, MOCK_TOKEN, TOKEN_KEY};
use tudu::storage::{KeyValue, MemoryStore};

#[test]
fn starts_unknown_and_resolves_to_logged_out_without_a_token() {
    let mut gate = AuthGate::new(MemoryStore::new());
    assert_eq!(gate.status(), AuthStatus::Unknown);
    assert_eq!(gate.resolve(), AuthStatus::LoggedOut);
}

#[test]
fn login_writes_the_token_and_survives_a_restart() {
    let storage = MemoryStore::new();
    let mut gate = AuthGate::new(storage.clone());
    gate.login("user", "password").unwrap();
    assert_eq!(gate.status(), AuthStatus::LoggedIn);
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(MOCK_TOKEN));

    // fresh gate over the same storage, as after an app restart
    let mut restarted = AuthGate::new(storage);
    assert_eq!(restarted.resolve(), AuthStatus::LoggedIn);
}

#[test]
fn bad_credentials_change_nothing() {
    let storage = MemoryStore::new();
    let mut gate = AuthGate::new(storage.clone());
    gate.resolve();
    let err = gate.login("user", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    let err = gate.login("admin", "password").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(gate.status(), AuthStatus::LoggedOut);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn an_unexpected_token_value_means_logged_out() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, "stale-or-forged").unwrap();
    let mut gate = AuthGate::new(storage);
    assert_eq!(gate.resolve(), AuthStatus::LoggedOut);
}

#[test]
fn logout_clears_the_token() {
    let storage = MemoryStore::new();
    let mut gate = AuthGate::new(storage.clone());
    gate.login("user", "password").unwrap();
    gate.logout().unwrap();
    assert_eq!(gate.status(), AuthStatus::LoggedOut);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

    // logging out twice is harmless
    gate.logout().unwrap();
    assert_eq!(gate.status(), AuthStatus::LoggedOut);
}

#[test]
fn token_state_is_independent_of_the_task_collection() {
    use tudu::models::TodoDraft;
    use tudu::store::{TodoStore, TODOS_KEY};

    let storage = MemoryStore::new();
    let mut gate = AuthGate::new(storage.clone());
    gate.login("user", "password").unwrap();

    let mut store = TodoStore::new(storage.clone());
    store.restore();
    store.add(TodoDraft::new("task"));

    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(MOCK_TOKEN));
    gate.logout().unwrap();
    assert!(storage.get(TODOS_KEY).unwrap().is_some());
}
