// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Shown for any failed attempt; never says which half was wrong.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// The configured username/password pair. Compared with exact string
/// equality; this gate is a boundary check, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
