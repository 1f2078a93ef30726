// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::model::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Max-based allocation: `max(0, max existing id) + 1`. Freed ids below the
/// maximum are never reused; deleting the highest row frees its id for the
/// next allocation.
pub fn next_record_id(records: &[Record]) -> RecordId {
    let max = records.iter().map(|record| record.id.get()).max().unwrap_or(0);
    RecordId::new(max.max(0) + 1)
}
