use tracing::warn;

use crate::storage::KeyValue;

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "userToken";

/// The only token value this build ever issues. The whole credential check is
/// a mock: it gates which UI is shown and is not a security boundary.
pub const MOCK_TOKEN: &str = "mockToken";

const MOCK_USERNAME: &str = "user";
const MOCK_PASSWORD: &str = "password";

/// Login state as seen by the UI. `Unknown` covers the window between cold
/// start and the first token lookup; UIs show a loading indicator for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    LoggedIn,
    LoggedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("failed to update stored token: {0}")]
    Storage(#[from] std::io::Error),
}

/// Gate over the stored session token. Independent of the task store: the
/// token lives under its own key and nothing else reads it.
pub struct AuthGate<S: KeyValue> {
    storage: S,
    status: AuthStatus,
}

impl<S: KeyValue> AuthGate<S> {
    pub fn new(storage: S) -> Self {
        AuthGate {
            storage,
            status: AuthStatus::Unknown,
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    /// Resolves `Unknown` by looking up the stored token. Logged in only on
    /// an exact token match; a read failure means logged out.
    pub fn resolve(&mut self) -> AuthStatus {
        self.status = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if token == MOCK_TOKEN => AuthStatus::LoggedIn,
            Ok(_) => AuthStatus::LoggedOut,
            Err(e) => {
                warn!("failed to read stored token, treating as logged out: {e}");
                AuthStatus::LoggedOut
            }
        };
        self.status
    }

    /// Mock credential check: both literals must match exactly. On success
    /// the token is written and the gate transitions to logged in. A
    /// mismatch changes nothing.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username != MOCK_USERNAME || password != MOCK_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        self.storage.set(TOKEN_KEY, MOCK_TOKEN)?;
        self.status = AuthStatus::LoggedIn;
        Ok(())
    }

    /// Clears the stored token and transitions to logged out.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove(TOKEN_KEY)?;
        self.status = AuthStatus::LoggedOut;
        Ok(())
    }
}
