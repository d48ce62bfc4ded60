//! # Access Gate
//!
//! A session-scoped flag standing in front of the quote. The gate compares supplied
//! credentials with a pair configured outside the program (config file or environment)
//! and, on a match, stores `quote_auth = "1"` in the session's [`SessionStorage`].
//! Any other value, or no value, means the gate is locked.
//!
//! A mismatch leaves the flag untouched and may be retried any number of times. With no
//! credentials configured the gate stays locked and says so on every attempt, unless
//! it was built with [`AccessGate::open`].

use std::collections::HashMap;
use subtle::ConstantTimeEq;
use tracing::info;

pub const AUTH_KEY: &str = "quote_auth";
pub const AUTH_GRANTED: &str = "1";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NOT_CONFIGURED: &str =
    "No credentials configured; set gate-username and gate-password (or gate-open on)";

/// Key/value storage that lives exactly as long as one session.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    items: HashMap<String, String>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    /// Carries the message to show inline.
    Denied(String),
}

/// Locked unless credentials match, or explicitly built open.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    expected: Option<Credentials>,
    open: bool,
}

impl AccessGate {
    /// A gate checking against `expected`. `None` locks it for good.
    pub fn new(expected: Option<Credentials>) -> Self {
        Self {
            expected,
            open: false,
        }
    }

    /// A gate that never asks; only built when the configuration opts in.
    pub fn open() -> Self {
        Self {
            expected: None,
            open: true,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_unlocked(&self, session: &SessionStorage) -> bool {
        self.open || (self.is_configured() && session.get(AUTH_KEY) == Some(AUTH_GRANTED))
    }

    /// Checks `supplied` and records success in the session.
    pub fn attempt(&self, session: &mut SessionStorage, supplied: &Credentials) -> GateOutcome {
        if self.open {
            session.set(AUTH_KEY, AUTH_GRANTED);
            return GateOutcome::Granted;
        }
        let Some(expected) = &self.expected else {
            info!(user = %supplied.username, "access denied, no credentials configured");
            return GateOutcome::Denied(NOT_CONFIGURED.to_string());
        };

        // Both halves are compared unconditionally.
        let user_ok = constant_time_compare(
            expected.username.as_bytes(),
            supplied.username.as_bytes(),
        );
        let pass_ok = constant_time_compare(
            expected.password.as_bytes(),
            supplied.password.as_bytes(),
        );

        if user_ok & pass_ok {
            session.set(AUTH_KEY, AUTH_GRANTED);
            info!(user = %supplied.username, "access granted");
            GateOutcome::Granted
        } else {
            info!(user = %supplied.username, "access denied");
            GateOutcome::Denied(INVALID_CREDENTIALS.to_string())
        }
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
