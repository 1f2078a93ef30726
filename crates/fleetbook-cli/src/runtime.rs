// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use fleetbook_app::{Credentials, Record};
use fleetbook_store::Store;
use fleetbook_tui::{AppRuntime, RowsSnapshot};
use std::time::Duration;

/// Wires the TUI's storage seam to the on-disk store and the configured
/// credentials.
pub struct StoreRuntime {
    store: Store,
    credentials: Credentials,
    search_debounce: Duration,
}

impl StoreRuntime {
    pub fn new(store: Store, credentials: Credentials, search_debounce: Duration) -> Self {
        Self {
            store,
            credentials,
            search_debounce,
        }
    }
}

impl AppRuntime for StoreRuntime {
    fn load_rows(&mut self) -> Result<RowsSnapshot> {
        let outcome = self.store.load_rows()?;
        Ok(RowsSnapshot {
            records: outcome.records,
            recovered: outcome.recovered,
        })
    }

    fn save_rows(&mut self, records: &[Record]) -> Result<()> {
        self.store.save_rows(records)
    }

    fn login_flag(&mut self) -> Result<bool> {
        self.store.login_flag()
    }

    fn set_login_flag(&mut self, logged_in: bool) -> Result<()> {
        self.store.set_login_flag(logged_in)
    }

    fn check_credentials(&mut self, username: &str, password: &str) -> bool {
        self.credentials.matches(username, password)
    }

    fn search_debounce(&self) -> Duration {
        self.search_debounce
    }
}
