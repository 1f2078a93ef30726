// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use fleetbook_app::{Record, RecordId};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "fleetbook";

/// Slot keys. The names are the persisted wire format and must not change.
pub const LOGIN_FLAG_KEY: &str = "loggedIn";
pub const TABLE_ROWS_KEY: &str = "tableRows";

/// A single JSON file holding a flat string-keyed object. Every read loads
/// the whole object and every write rewrites the whole file; the data is a
/// few kilobytes, so there is no point doing anything cleverer.
pub struct KvSlot {
    path: PathBuf,
}

/// What a slot read produced. `recovered` is set when the stored bytes were
/// unreadable and the slot fell back to empty; the caller should tell the
/// user their data was reset rather than silently moving on.
struct SlotState {
    map: Map<String, Value>,
    recovered: bool,
}

impl KvSlot {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_data_path(&printable)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SlotState> {
        if !self.path.exists() {
            return Ok(SlotState {
                map: Map::new(),
                recovered: false,
            });
        }

        let bytes = fs::read(&self.path)
            .with_context(|| format!("read data file {}", self.path.display()))?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(SlotState {
                map,
                recovered: false,
            }),
            Ok(_) | Err(_) => Ok(SlotState {
                map: Map::new(),
                recovered: true,
            }),
        }
    }

    fn write(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data directory {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&Value::Object(map.clone()))
            .context("serialize data file")?;
        fs::write(&self.path, body)
            .with_context(|| format!("write data file {}", self.path.display()))
    }

    /// Reads one key. A malformed file reads as absent for every key.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.map.get(key).cloned())
    }

    pub fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut state = self.read()?;
        state.map.insert(key.to_owned(), value);
        self.write(&state.map)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.read()?;
        if state.map.remove(key).is_none() && !state.recovered {
            return Ok(());
        }
        self.write(&state.map)
    }
}

/// Result of loading the persisted table. `recovered` means the stored rows
/// could not be decoded and the table starts empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub recovered: bool,
}

/// Typed persistence for the record table and the login flag, layered over
/// a [`KvSlot`].
pub struct Store {
    slot: KvSlot,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            slot: KvSlot::open(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.slot.path()
    }

    /// Loads the persisted rows. Unreadable stored data never blocks
    /// startup: the outcome is an empty table with `recovered` set, and the
    /// next save overwrites the bad bytes.
    pub fn load_rows(&self) -> Result<LoadOutcome> {
        let state = self.slot.read()?;
        let Some(value) = state.map.get(TABLE_ROWS_KEY) else {
            return Ok(LoadOutcome {
                records: Vec::new(),
                recovered: state.recovered,
            });
        };

        match serde_json::from_value::<Vec<Record>>(value.clone()) {
            Ok(records) => Ok(LoadOutcome {
                records,
                recovered: state.recovered,
            }),
            Err(_) => Ok(LoadOutcome {
                records: Vec::new(),
                recovered: true,
            }),
        }
    }

    pub fn save_rows(&self, records: &[Record]) -> Result<()> {
        let value = serde_json::to_value(records).context("serialize table rows")?;
        self.slot.put(TABLE_ROWS_KEY, value)
    }

    /// The login flag is the string `"true"` when set; anything else reads
    /// as logged out.
    pub fn login_flag(&self) -> Result<bool> {
        Ok(matches!(
            self.slot.get(LOGIN_FLAG_KEY)?,
            Some(Value::String(flag)) if flag == "true"
        ))
    }

    pub fn set_login_flag(&self, logged_in: bool) -> Result<()> {
        if logged_in {
            self.slot
                .put(LOGIN_FLAG_KEY, Value::String("true".to_owned()))
        } else {
            self.slot.remove(LOGIN_FLAG_KEY)
        }
    }

    /// Seeds the demo fleet and marks the session logged in, replacing
    /// whatever the slot held.
    pub fn seed_demo_data(&self) -> Result<Vec<Record>> {
        let rows = demo_rows();
        self.save_rows(&rows)?;
        self.set_login_flag(true)?;
        Ok(rows)
    }
}

pub fn demo_rows() -> Vec<Record> {
    let seed: [(&str, &str, &str, &str, &str, &str); 6] = [
        ("Maria Santos", "maria.santos@example.com", "0917 555 0101", "VIOS", "NAB 1234", "Silver"),
        ("Jose Ramirez", "jose.ramirez@example.com", "0918 555 0102", "INNOVA", "UVW 5678", "White"),
        ("Ana Dela Cruz", "ana.delacruz@example.com", "0919 555 0103", "MIRAGE", "DEF 2468", "Red"),
        ("Carlo Reyes", "carlo.reyes@example.com", "0920 555 0104", "EXPANDER", "GHI 1357", "Gray"),
        ("Liza Navarro", "liza.navarro@example.com", "0921 555 0105", "RUSH", "JKL 8642", "Black"),
        ("Ramon Aquino", "ramon.aquino@example.com", "0922 555 0106", "AVANZA", "MNO 9753", "Blue"),
    ];
    seed.iter()
        .enumerate()
        .map(|(index, (name, email, phone, variation, plate_no, color))| Record {
            id: RecordId::new(index as i64 + 1),
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            phone: (*phone).to_owned(),
            variation: (*variation).to_owned(),
            plate_no: (*plate_no).to_owned(),
            color: (*color).to_owned(),
        })
        .collect()
}

pub fn default_data_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("FLEETBOOK_DATA_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set FLEETBOOK_DATA_PATH to a writable file path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("fleetbook.json"))
}

pub fn validate_data_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("data path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!("data path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead");
        }
    }

    if path.starts_with("file:") {
        bail!("data path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!("data path {path:?} contains '?'; remove query parameters and use a plain file path");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{demo_rows, validate_data_path};
    use std::collections::BTreeSet;

    #[test]
    fn uri_like_paths_are_rejected() {
        assert!(validate_data_path("").is_err());
        assert!(validate_data_path("https://example.com/data.json").is_err());
        assert!(validate_data_path("file:data.json").is_err());
        assert!(validate_data_path("data.json?mode=ro").is_err());
        assert!(validate_data_path("/tmp/fleetbook.json").is_ok());
        assert!(validate_data_path("C:\\fleetbook\\data.json").is_ok());
    }

    #[test]
    fn demo_rows_have_unique_sequential_ids() {
        let rows = demo_rows();
        let ids: BTreeSet<i64> = rows.iter().map(|row| row.id.get()).collect();
        assert_eq!(ids.len(), rows.len());
        assert_eq!(ids.first(), Some(&1));
    }
}
