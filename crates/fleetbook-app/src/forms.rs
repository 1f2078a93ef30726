// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::ids::RecordId;
use crate::model::{Record, Variation};

/// Which text field of the add/edit form the cursor is on. Variation is a
/// closed choice, not free text, so it is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Phone,
    PlateNo,
    Color,
}

impl DraftField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::PlateNo,
        Self::Color,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PlateNo => "plate no",
            Self::Color => "color",
        }
    }
}

/// Transient add/edit form state. Becomes a [`Record`] only on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub variation: Variation,
    pub plate_no: String,
    pub color: String,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            variation: Variation::Vios,
            plate_no: String::new(),
            color: String::new(),
        }
    }
}

impl RecordDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("name is required -- enter a name and retry");
        }
        if self.email.trim().is_empty() {
            bail!("email is required -- enter an email and retry");
        }
        if self.phone.trim().is_empty() {
            bail!("phone is required -- enter a phone number and retry");
        }
        Ok(())
    }

    /// Builds the committed record. Plate and color fall back to empty
    /// strings; the caller supplies the allocated id.
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            variation: self.variation.as_str().to_owned(),
            plate_no: self.plate_no,
            color: self.color,
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            variation: Variation::parse(&record.variation).unwrap_or(Variation::Vios),
            plate_no: record.plate_no.clone(),
            color: record.color.clone(),
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Email => &mut self.email,
            DraftField::Phone => &mut self.phone,
            DraftField::PlateNo => &mut self.plate_no,
            DraftField::Color => &mut self.color,
        }
    }

    pub fn field_text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
            DraftField::PlateNo => &self.plate_no,
            DraftField::Color => &self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftField, RecordDraft};
    use crate::ids::RecordId;
    use crate::model::Variation;

    fn filled_draft() -> RecordDraft {
        RecordDraft {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            phone: "0917 555 0100".to_owned(),
            variation: Variation::Rush,
            plate_no: String::new(),
            color: String::new(),
        }
    }

    #[test]
    fn default_draft_starts_on_vios() {
        let draft = RecordDraft::default();
        assert_eq!(draft.variation, Variation::Vios);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in [DraftField::Name, DraftField::Email, DraftField::Phone] {
            let mut draft = filled_draft();
            draft.field_mut(field).clear();
            assert!(draft.validate().is_err(), "missing {} should fail", field.label());
        }

        let mut draft = filled_draft();
        draft.plate_no.clear();
        draft.color.clear();
        assert!(draft.validate().is_ok(), "plate/color are optional");
    }

    #[test]
    fn whitespace_only_required_fields_are_rejected() {
        let mut draft = filled_draft();
        draft.name = "   ".to_owned();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn commit_fills_optional_fields_with_empty_strings() {
        let record = filled_draft().into_record(RecordId::new(4));
        assert_eq!(record.id, RecordId::new(4));
        assert_eq!(record.variation, "RUSH");
        assert_eq!(record.plate_no, "");
        assert_eq!(record.color, "");
    }

    #[test]
    fn draft_from_record_with_unknown_variation_falls_back_to_vios() {
        let mut record = filled_draft().into_record(RecordId::new(1));
        record.variation = "stray value".to_owned();
        let draft = RecordDraft::from_record(&record);
        assert_eq!(draft.variation, Variation::Vios);
    }
}
