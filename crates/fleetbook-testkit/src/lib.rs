// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use fleetbook_app::{Record, RecordDraft, RecordId, Variation};
use std::path::PathBuf;

const FIRST_NAMES: [&str; 16] = [
    "Maria", "Jose", "Ana", "Carlo", "Liza", "Ramon", "Grace", "Paolo", "Bea", "Miguel", "Celia",
    "Dante", "Ines", "Marco", "Tala", "Victor",
];
const LAST_NAMES: [&str; 14] = [
    "Santos",
    "Reyes",
    "Cruz",
    "Bautista",
    "Garcia",
    "Mendoza",
    "Torres",
    "Flores",
    "Ramos",
    "Aquino",
    "Navarro",
    "Villanueva",
    "Domingo",
    "Salazar",
];

const EMAIL_DOMAINS: [&str; 4] = [
    "example.com",
    "mail.example.net",
    "fleetmail.test",
    "inbox.example.org",
];

const COLORS: [&str; 8] = [
    "White", "Silver", "Black", "Gray", "Red", "Blue", "Beige", "Green",
];

const PLATE_LETTERS: [&str; 10] = [
    "NAB", "UVW", "DEF", "GHI", "JKL", "MNO", "PQR", "STU", "XYZ", "CAB",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator of plausible owner records. The same seed always
/// produces the same sequence.
#[derive(Debug, Clone)]
pub struct OwnerFaker {
    rng: DeterministicRng,
}

impl OwnerFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(if seed == 0 { 1 } else { seed }),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn record(&mut self, id: i64) -> Record {
        self.draft().into_record(RecordId::new(id))
    }

    pub fn draft(&mut self) -> RecordDraft {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        let variation = Variation::ALL[self.rng.int_n(Variation::ALL.len())];
        RecordDraft {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@{domain}",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            phone: format!(
                "09{:02} {:03} {:04}",
                17 + self.rng.int_n(10),
                self.rng.int_n(1_000),
                self.rng.int_n(10_000),
            ),
            variation,
            plate_no: format!("{} {:04}", self.pick(&PLATE_LETTERS), self.rng.int_n(10_000)),
            color: self.pick(&COLORS).to_owned(),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// `count` records with ids 1..=count, cycling the variation set so every
/// variation shows up in any batch of seven or more.
pub fn sample_records(count: usize) -> Vec<Record> {
    let mut faker = OwnerFaker::new(count as u64 + 1);
    (0..count)
        .map(|index| {
            let mut draft = faker.draft();
            draft.variation = Variation::ALL[index % Variation::ALL.len()];
            draft.into_record(RecordId::new(index as i64 + 1))
        })
        .collect()
}

pub fn temp_data_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let data_path = dir.path().join("fleetbook.json");
    Ok((dir, data_path))
}
