// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variation {
    Vios,
    Innova,
    Mirage,
    Expander,
    Reina,
    Rush,
    Avanza,
}

impl Variation {
    pub const ALL: [Self; 7] = [
        Self::Vios,
        Self::Innova,
        Self::Mirage,
        Self::Expander,
        Self::Reina,
        Self::Rush,
        Self::Avanza,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vios => "VIOS",
            Self::Innova => "INNOVA",
            Self::Mirage => "MIRAGE",
            Self::Expander => "EXPANDER",
            Self::Reina => "REINA",
            Self::Rush => "RUSH",
            Self::Avanza => "AVANZA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "VIOS" => Some(Self::Vios),
            "INNOVA" => Some(Self::Innova),
            "MIRAGE" => Some(Self::Mirage),
            "EXPANDER" => Some(Self::Expander),
            "REINA" => Some(Self::Reina),
            "RUSH" => Some(Self::Rush),
            "AVANZA" => Some(Self::Avanza),
            _ => None,
        }
    }
}

/// One table row. The serialized shape is the persisted wire format:
/// `{ id, name, email, phone, variation, plateNo, color }`. `variation`
/// stays a raw string on the record so structurally compatible stored data
/// loads without validation; the typed [`Variation`] set is only the closed
/// vocabulary for drafts and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub variation: String,
    #[serde(default)]
    pub plate_no: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Id,
    Name,
    Email,
    Phone,
    Variation,
    PlateNo,
    Color,
}

impl SortKey {
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Variation,
        Self::PlateNo,
        Self::Color,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Variation => "variation",
            Self::PlateNo => "plate no",
            Self::Color => "color",
        }
    }
}

impl Record {
    /// String rendering of the field a sort key names. The id sorts by its
    /// decimal rendering, matching the original table's string comparison.
    pub fn field_text(&self, key: SortKey) -> String {
        match key {
            SortKey::Id => self.id.get().to_string(),
            SortKey::Name => self.name.clone(),
            SortKey::Email => self.email.clone(),
            SortKey::Phone => self.phone.clone(),
            SortKey::Variation => self.variation.clone(),
            SortKey::PlateNo => self.plate_no.clone(),
            SortKey::Color => self.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationFilter {
    All,
    Only(Variation),
}

impl VariationFilter {
    pub fn matches(self, variation: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => variation == wanted.as_str(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(variation) => variation.as_str(),
        }
    }

    /// Cycle order for the filter dropdown: All, then the closed set.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Variation::ALL[0]),
            Self::Only(current) => {
                let position = Variation::ALL
                    .iter()
                    .position(|variation| *variation == current)
                    .unwrap_or(0);
                match Variation::ALL.get(position + 1) {
                    Some(next) => Self::Only(*next),
                    None => Self::All,
                }
            }
        }
    }
}
