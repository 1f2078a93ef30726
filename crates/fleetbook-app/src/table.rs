// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::forms::RecordDraft;
use crate::ids::{RecordId, next_record_id};
use crate::model::{Record, SortDirection, SortKey, VariationFilter};

/// Which destructive action is waiting on the confirmation gate. At most one
/// variant is ever active; setting one replaces the other by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingDelete {
    #[default]
    Idle,
    Single(RecordId),
    Bulk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    Hydrate(Vec<Record>),
    SetSearchTerm(String),
    ApplyDebouncedSearch { token: u64 },
    SetVariationFilter(VariationFilter),
    ToggleSort(SortKey),
    ToggleSelect(RecordId),
    ToggleSelectAll,
    SubmitDraft,
    OpenEdit(RecordId),
    CancelEdit,
    SubmitEdit,
    RequestDelete(RecordId),
    RequestBulkDelete,
    ConfirmPending,
    CancelPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Hydrated,
    /// The record collection changed; the owner must persist it. Never
    /// emitted before hydration completes.
    RowsChanged,
    SelectionChanged,
    ViewChanged,
    /// A keystroke landed in the search box; the owner should (re)start the
    /// single-slot debounce timer carrying this token. Earlier tokens are
    /// stale and ignored on arrival.
    SearchScheduled { token: u64 },
    DraftCommitted(RecordId),
    DraftRejected(String),
    EditOpened(RecordId),
    EditCommitted(RecordId),
    PendingDeleteChanged(PendingDelete),
}

/// The filter/sort/CRUD state machine behind the records table. Owns the
/// record collection, the selection set, the transient filter/sort inputs,
/// and the add/edit drafts. Persistence is the caller's concern: every
/// mutation of the collection surfaces as [`TableEvent::RowsChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableEngine {
    rows: Vec<Record>,
    hydrated: bool,
    selected: BTreeSet<RecordId>,
    search_term: String,
    debounced_search: String,
    search_token: u64,
    filter_variation: Option<VariationFilter>,
    sort_by: Option<SortKey>,
    sort_dir: Option<SortDirection>,
    pending_delete: PendingDelete,
    draft: RecordDraft,
    editing: Option<(RecordId, RecordDraft)>,
}

impl TableEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, command: TableCommand) -> Vec<TableEvent> {
        match command {
            TableCommand::Hydrate(records) => {
                self.rows = records;
                self.hydrated = true;
                vec![TableEvent::Hydrated]
            }
            TableCommand::SetSearchTerm(text) => {
                self.search_term = text;
                self.search_token = self.search_token.wrapping_add(1);
                vec![TableEvent::SearchScheduled {
                    token: self.search_token,
                }]
            }
            TableCommand::ApplyDebouncedSearch { token } => {
                if token != self.search_token {
                    return Vec::new();
                }
                self.debounced_search = self.search_term.trim().to_owned();
                vec![TableEvent::ViewChanged]
            }
            TableCommand::SetVariationFilter(filter) => {
                self.filter_variation = Some(filter);
                vec![TableEvent::ViewChanged]
            }
            TableCommand::ToggleSort(key) => {
                if self.sort_by == Some(key) {
                    self.sort_dir = Some(match self.sort_dir() {
                        SortDirection::Asc => SortDirection::Desc,
                        SortDirection::Desc => SortDirection::Asc,
                    });
                } else {
                    self.sort_by = Some(key);
                    self.sort_dir = Some(SortDirection::Asc);
                }
                vec![TableEvent::ViewChanged]
            }
            TableCommand::ToggleSelect(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                vec![TableEvent::SelectionChanged]
            }
            TableCommand::ToggleSelectAll => self.toggle_select_all(),
            TableCommand::SubmitDraft => self.submit_draft(),
            TableCommand::OpenEdit(id) => {
                let Some(record) = self.rows.iter().find(|record| record.id == id) else {
                    return Vec::new();
                };
                self.editing = Some((id, RecordDraft::from_record(record)));
                vec![TableEvent::EditOpened(id)]
            }
            TableCommand::CancelEdit => {
                self.editing = None;
                Vec::new()
            }
            TableCommand::SubmitEdit => self.submit_edit(),
            TableCommand::RequestDelete(id) => {
                self.pending_delete = PendingDelete::Single(id);
                vec![TableEvent::PendingDeleteChanged(self.pending_delete)]
            }
            TableCommand::RequestBulkDelete => {
                if self.selected.is_empty() {
                    return Vec::new();
                }
                self.pending_delete = PendingDelete::Bulk;
                vec![TableEvent::PendingDeleteChanged(self.pending_delete)]
            }
            TableCommand::ConfirmPending => self.confirm_pending(),
            TableCommand::CancelPending => {
                self.pending_delete = PendingDelete::Idle;
                vec![TableEvent::PendingDeleteChanged(PendingDelete::Idle)]
            }
        }
    }

    fn submit_draft(&mut self) -> Vec<TableEvent> {
        if let Err(error) = self.draft.validate() {
            return vec![TableEvent::DraftRejected(error.to_string())];
        }

        let id = next_record_id(&self.rows);
        let draft = std::mem::take(&mut self.draft);
        self.rows.push(draft.into_record(id));

        let mut events = vec![TableEvent::DraftCommitted(id)];
        events.extend(self.rows_changed());
        events
    }

    fn submit_edit(&mut self) -> Vec<TableEvent> {
        let Some((id, draft)) = self.editing.take() else {
            return Vec::new();
        };
        let Some(position) = self.rows.iter().position(|record| record.id == id) else {
            return Vec::new();
        };

        self.rows[position] = draft.into_record(id);
        let mut events = vec![TableEvent::EditCommitted(id)];
        events.extend(self.rows_changed());
        events
    }

    fn toggle_select_all(&mut self) -> Vec<TableEvent> {
        let displayed: Vec<RecordId> = self
            .visible_rows()
            .into_iter()
            .map(|record| record.id)
            .collect();
        let all_selected = displayed.iter().all(|id| self.selected.contains(id));

        let next = if all_selected {
            BTreeSet::new()
        } else {
            displayed.into_iter().collect()
        };
        if next == self.selected {
            return Vec::new();
        }
        self.selected = next;
        vec![TableEvent::SelectionChanged]
    }

    fn confirm_pending(&mut self) -> Vec<TableEvent> {
        let pending = std::mem::take(&mut self.pending_delete);
        match pending {
            PendingDelete::Idle => Vec::new(),
            PendingDelete::Single(id) => {
                self.rows.retain(|record| record.id != id);
                let selection_changed = self.selected.remove(&id);

                let mut events = Vec::new();
                events.extend(self.rows_changed());
                if selection_changed {
                    events.push(TableEvent::SelectionChanged);
                }
                events.push(TableEvent::PendingDeleteChanged(PendingDelete::Idle));
                events
            }
            PendingDelete::Bulk => {
                self.rows.retain(|record| !self.selected.contains(&record.id));
                // Every selection goes, including ids the removal never
                // touched (stale entries for already-deleted rows).
                self.selected.clear();

                let mut events = Vec::new();
                events.extend(self.rows_changed());
                events.push(TableEvent::SelectionChanged);
                events.push(TableEvent::PendingDeleteChanged(PendingDelete::Idle));
                events
            }
        }
    }

    fn rows_changed(&self) -> Option<TableEvent> {
        self.hydrated.then_some(TableEvent::RowsChanged)
    }

    /// The filtered, sorted, display-ready view of the store.
    pub fn visible_rows(&self) -> Vec<Record> {
        derive_view(
            &self.rows,
            &self.debounced_search,
            self.filter_variation(),
            self.sort_by,
            self.sort_dir(),
        )
    }

    /// Header checkbox state: every displayed row selected and at least one
    /// row displayed.
    pub fn all_visible_selected(&self) -> bool {
        let displayed = self.visible_rows();
        !displayed.is_empty()
            && displayed
                .iter()
                .all(|record| self.selected.contains(&record.id))
    }

    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn selected(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn filter_variation(&self) -> VariationFilter {
        self.filter_variation.unwrap_or(VariationFilter::All)
    }

    pub fn sort_by(&self) -> Option<SortKey> {
        self.sort_by
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.sort_dir.unwrap_or(SortDirection::Asc)
    }

    pub fn pending_delete(&self) -> PendingDelete {
        self.pending_delete
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RecordDraft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<(RecordId, &RecordDraft)> {
        self.editing.as_ref().map(|(id, draft)| (*id, draft))
    }

    pub fn editing_draft_mut(&mut self) -> Option<&mut RecordDraft> {
        self.editing.as_mut().map(|(_, draft)| draft)
    }
}

/// Pure view derivation: search filter, then variation filter, then an
/// optional stable case-insensitive sort. The underlying store order is
/// never touched; ties keep their relative store order.
pub fn derive_view(
    records: &[Record],
    debounced_search: &str,
    filter: VariationFilter,
    sort_by: Option<SortKey>,
    sort_dir: SortDirection,
) -> Vec<Record> {
    let needle = debounced_search.trim().to_lowercase();
    let mut view: Vec<Record> = records
        .iter()
        .filter(|record| matches_search(record, &needle) && filter.matches(&record.variation))
        .cloned()
        .collect();

    if let Some(key) = sort_by {
        view.sort_by(|left, right| {
            let left_value = left.field_text(key).to_lowercase();
            let right_value = right.field_text(key).to_lowercase();
            match sort_dir {
                SortDirection::Asc => left_value.cmp(&right_value),
                SortDirection::Desc => right_value.cmp(&left_value),
            }
        });
    }

    view
}

fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    // Phone is matched as typed (digits); the other fields fold case.
    record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
        || record.phone.contains(needle)
        || record.plate_no.to_lowercase().contains(needle)
        || record.color.to_lowercase().contains(needle)
        || record.variation.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{PendingDelete, TableCommand, TableEngine, TableEvent, derive_view};
    use crate::forms::RecordDraft;
    use crate::ids::RecordId;
    use crate::model::{Record, SortDirection, SortKey, Variation, VariationFilter};
    use std::collections::BTreeSet;

    fn record(id: i64, name: &str, variation: Variation) -> Record {
        Record {
            id: RecordId::new(id),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: format!("0917 {id:04}"),
            variation: variation.as_str().to_owned(),
            plate_no: format!("PLT {id}"),
            color: "White".to_owned(),
        }
    }

    fn hydrated_engine(records: Vec<Record>) -> TableEngine {
        let mut engine = TableEngine::new();
        let events = engine.dispatch(TableCommand::Hydrate(records));
        assert_eq!(events, vec![TableEvent::Hydrated]);
        engine
    }

    fn fill_draft(engine: &mut TableEngine, name: &str, variation: Variation) {
        *engine.draft_mut() = RecordDraft {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "0917 555 0100".to_owned(),
            variation,
            plate_no: String::new(),
            color: String::new(),
        };
    }

    fn apply_search(engine: &mut TableEngine, term: &str) {
        let events = engine.dispatch(TableCommand::SetSearchTerm(term.to_owned()));
        let [TableEvent::SearchScheduled { token }] = events[..] else {
            panic!("expected a scheduled search, got {events:?}");
        };
        engine.dispatch(TableCommand::ApplyDebouncedSearch { token });
    }

    #[test]
    fn ids_stay_unique_across_add_remove_sequences() {
        let mut engine = hydrated_engine(Vec::new());
        for round in 0..4 {
            fill_draft(&mut engine, &format!("Owner{round}"), Variation::Vios);
            engine.dispatch(TableCommand::SubmitDraft);
        }
        let second_id = engine.records()[1].id;
        engine.dispatch(TableCommand::RequestDelete(second_id));
        engine.dispatch(TableCommand::ConfirmPending);

        fill_draft(&mut engine, "Late", Variation::Rush);
        engine.dispatch(TableCommand::SubmitDraft);

        let ids: BTreeSet<i64> = engine.records().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids.len(), engine.records().len());
        // Max-based allocation: highest surviving id was 4, so the next is 5.
        assert_eq!(engine.records().last().map(|r| r.id.get()), Some(5));
    }

    #[test]
    fn allocation_follows_the_max_rule_with_gaps() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(3, "Ben", Variation::Rush),
        ]);
        fill_draft(&mut engine, "Cara", Variation::Mirage);
        let events = engine.dispatch(TableCommand::SubmitDraft);
        assert!(events.contains(&TableEvent::DraftCommitted(RecordId::new(4))));
        assert!(events.contains(&TableEvent::RowsChanged));
    }

    #[test]
    fn empty_store_allocates_id_one_and_resets_the_draft() {
        let mut engine = hydrated_engine(Vec::new());
        fill_draft(&mut engine, "X", Variation::Vios);
        engine.draft_mut().email = "x@x.com".to_owned();
        engine.draft_mut().phone = "123".to_owned();

        let events = engine.dispatch(TableCommand::SubmitDraft);
        assert!(events.contains(&TableEvent::DraftCommitted(RecordId::new(1))));
        assert_eq!(engine.records().len(), 1);
        assert_eq!(engine.records()[0].id, RecordId::new(1));
        assert_eq!(engine.draft(), &RecordDraft::default());
        assert_eq!(engine.draft().variation, Variation::Vios);
    }

    #[test]
    fn incomplete_draft_leaves_the_store_unchanged() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);
        let before = engine.records().to_vec();

        engine.draft_mut().name = "No Email".to_owned();
        engine.draft_mut().phone = "123".to_owned();
        let events = engine.dispatch(TableCommand::SubmitDraft);

        assert!(matches!(events[..], [TableEvent::DraftRejected(_)]));
        assert_eq!(engine.records(), &before[..]);
    }

    #[test]
    fn no_rows_changed_event_before_hydration() {
        let mut engine = TableEngine::new();
        fill_draft(&mut engine, "Early", Variation::Vios);
        let events = engine.dispatch(TableCommand::SubmitDraft);
        assert!(!events.contains(&TableEvent::RowsChanged));
    }

    #[test]
    fn edit_replaces_the_matching_record_only() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
        ]);

        let events = engine.dispatch(TableCommand::OpenEdit(RecordId::new(2)));
        assert_eq!(events, vec![TableEvent::EditOpened(RecordId::new(2))]);
        engine
            .editing_draft_mut()
            .expect("edit draft open")
            .name = "Benjamin".to_owned();
        let events = engine.dispatch(TableCommand::SubmitEdit);
        assert!(events.contains(&TableEvent::EditCommitted(RecordId::new(2))));

        assert_eq!(engine.records()[0].name, "Ana");
        assert_eq!(engine.records()[1].name, "Benjamin");
        assert_eq!(engine.records()[1].id, RecordId::new(2));
    }

    #[test]
    fn edit_of_a_missing_id_is_a_noop() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);
        assert!(engine.dispatch(TableCommand::OpenEdit(RecordId::new(9))).is_empty());
        assert!(engine.dispatch(TableCommand::SubmitEdit).is_empty());
        assert_eq!(engine.records().len(), 1);
    }

    #[test]
    fn single_delete_drops_the_row_and_its_selection_entry() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
        ]);
        engine.dispatch(TableCommand::ToggleSelect(RecordId::new(2)));

        engine.dispatch(TableCommand::RequestDelete(RecordId::new(2)));
        assert_eq!(engine.pending_delete(), PendingDelete::Single(RecordId::new(2)));
        let events = engine.dispatch(TableCommand::ConfirmPending);

        assert!(events.contains(&TableEvent::RowsChanged));
        assert!(events.contains(&TableEvent::SelectionChanged));
        assert_eq!(engine.pending_delete(), PendingDelete::Idle);
        assert_eq!(engine.records().len(), 1);
        assert!(engine.selected().is_empty());
    }

    #[test]
    fn bulk_delete_clears_the_entire_selection() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
            record(3, "Cara", Variation::Mirage),
        ]);
        engine.dispatch(TableCommand::ToggleSelect(RecordId::new(2)));
        // Stale entry for a row that no longer exists.
        engine.dispatch(TableCommand::ToggleSelect(RecordId::new(99)));

        engine.dispatch(TableCommand::RequestBulkDelete);
        assert_eq!(engine.pending_delete(), PendingDelete::Bulk);
        engine.dispatch(TableCommand::ConfirmPending);

        let names: Vec<&str> = engine.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Cara"]);
        assert!(engine.selected().is_empty());
    }

    #[test]
    fn bulk_delete_request_requires_a_selection() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);
        assert!(engine.dispatch(TableCommand::RequestBulkDelete).is_empty());
        assert_eq!(engine.pending_delete(), PendingDelete::Idle);
    }

    #[test]
    fn pending_variants_replace_each_other() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);
        engine.dispatch(TableCommand::ToggleSelect(RecordId::new(1)));

        engine.dispatch(TableCommand::RequestDelete(RecordId::new(1)));
        engine.dispatch(TableCommand::RequestBulkDelete);
        assert_eq!(engine.pending_delete(), PendingDelete::Bulk);

        engine.dispatch(TableCommand::RequestDelete(RecordId::new(1)));
        assert_eq!(engine.pending_delete(), PendingDelete::Single(RecordId::new(1)));

        engine.dispatch(TableCommand::CancelPending);
        assert_eq!(engine.pending_delete(), PendingDelete::Idle);
        assert_eq!(engine.records().len(), 1);
    }

    #[test]
    fn stale_debounce_tokens_are_ignored() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);

        let first = engine.dispatch(TableCommand::SetSearchTerm("an".to_owned()));
        let [TableEvent::SearchScheduled { token: stale }] = first[..] else {
            panic!("expected a scheduled search");
        };
        let second = engine.dispatch(TableCommand::SetSearchTerm("ana ".to_owned()));
        let [TableEvent::SearchScheduled { token: current }] = second[..] else {
            panic!("expected a scheduled search");
        };

        assert!(engine
            .dispatch(TableCommand::ApplyDebouncedSearch { token: stale })
            .is_empty());
        assert_eq!(engine.debounced_search(), "");

        let events = engine.dispatch(TableCommand::ApplyDebouncedSearch { token: current });
        assert_eq!(events, vec![TableEvent::ViewChanged]);
        assert_eq!(engine.debounced_search(), "ana");
    }

    #[test]
    fn search_is_case_insensitive_across_all_text_fields() {
        let rows = vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
        ];
        let hits = |needle: &str| {
            derive_view(
                &rows,
                needle,
                VariationFilter::All,
                None,
                SortDirection::Asc,
            )
            .len()
        };

        assert_eq!(hits("vios"), 1);
        assert_eq!(hits("ANA"), 1);
        assert_eq!(hits("ben@EXAMPLE"), 1);
        assert_eq!(hits("plt"), 2);
        assert_eq!(hits("white"), 2);
        assert_eq!(hits("0917 0002"), 1);
        assert_eq!(hits(""), 2);
        assert_eq!(hits("no such"), 0);
    }

    #[test]
    fn view_derivation_is_pure() {
        let rows = vec![
            record(2, "Ben", Variation::Rush),
            record(1, "Ana", Variation::Vios),
        ];
        let first = derive_view(
            &rows,
            "a",
            VariationFilter::All,
            Some(SortKey::Name),
            SortDirection::Asc,
        );
        let second = derive_view(
            &rows,
            "a",
            VariationFilter::All,
            Some(SortKey::Name),
            SortDirection::Asc,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut left = record(1, "Ana", Variation::Vios);
        left.color = "red".to_owned();
        let mut right = record(2, "Ben", Variation::Rush);
        right.color = "RED".to_owned();
        let third = record(3, "Cara", Variation::Mirage);
        let rows = vec![left, right, third];

        let view = derive_view(
            &rows,
            "",
            VariationFilter::All,
            Some(SortKey::Color),
            SortDirection::Asc,
        );
        // "red" and "RED" compare equal case-insensitively; store order holds.
        let ids: Vec<i64> = view.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sort_toggle_flips_direction_then_resets_on_a_new_column() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ben", Variation::Vios),
            record(2, "Ana", Variation::Rush),
        ]);

        engine.dispatch(TableCommand::ToggleSort(SortKey::Name));
        assert_eq!(engine.sort_by(), Some(SortKey::Name));
        assert_eq!(engine.sort_dir(), SortDirection::Asc);
        let names: Vec<String> = engine
            .visible_rows()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Ben"]);

        engine.dispatch(TableCommand::ToggleSort(SortKey::Name));
        assert_eq!(engine.sort_dir(), SortDirection::Desc);

        engine.dispatch(TableCommand::ToggleSort(SortKey::Email));
        assert_eq!(engine.sort_by(), Some(SortKey::Email));
        assert_eq!(engine.sort_dir(), SortDirection::Asc);
    }

    #[test]
    fn sorting_never_reorders_the_underlying_store() {
        let mut engine = hydrated_engine(vec![
            record(2, "Ben", Variation::Vios),
            record(1, "Ana", Variation::Rush),
        ]);
        engine.dispatch(TableCommand::ToggleSort(SortKey::Id));
        let store_ids: Vec<i64> = engine.records().iter().map(|r| r.id.get()).collect();
        assert_eq!(store_ids, vec![2, 1]);
        let view_ids: Vec<i64> = engine.visible_rows().iter().map(|r| r.id.get()).collect();
        assert_eq!(view_ids, vec![1, 2]);
    }

    #[test]
    fn toggle_all_selects_exactly_the_filtered_view() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
            record(3, "Cara", Variation::Rush),
        ]);
        engine.dispatch(TableCommand::ToggleSelect(RecordId::new(1)));
        engine.dispatch(TableCommand::SetVariationFilter(VariationFilter::Only(
            Variation::Rush,
        )));

        // Not all displayed rows are selected: replace the selection with
        // exactly the displayed ids, dropping the hidden id 1.
        engine.dispatch(TableCommand::ToggleSelectAll);
        let selected: Vec<i64> = engine.selected().iter().map(|id| id.get()).collect();
        assert_eq!(selected, vec![2, 3]);
        assert!(engine.all_visible_selected());

        // All displayed rows already selected: clear everything.
        engine.dispatch(TableCommand::ToggleSelectAll);
        assert!(engine.selected().is_empty());
        assert!(!engine.all_visible_selected());
    }

    #[test]
    fn select_all_checkbox_requires_a_nonempty_view() {
        let mut engine = hydrated_engine(vec![record(1, "Ana", Variation::Vios)]);
        engine.dispatch(TableCommand::SetVariationFilter(VariationFilter::Only(
            Variation::Rush,
        )));
        assert!(engine.visible_rows().is_empty());
        assert!(!engine.all_visible_selected());
    }

    #[test]
    fn filtered_bulk_delete_scenario() {
        let mut engine = hydrated_engine(vec![
            record(1, "Ana", Variation::Vios),
            record(2, "Ben", Variation::Rush),
        ]);

        engine.dispatch(TableCommand::SetVariationFilter(VariationFilter::Only(
            Variation::Rush,
        )));
        let view = engine.visible_rows();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, RecordId::new(2));

        engine.dispatch(TableCommand::ToggleSelectAll);
        engine.dispatch(TableCommand::RequestBulkDelete);
        engine.dispatch(TableCommand::ConfirmPending);

        assert_eq!(engine.records().len(), 1);
        assert_eq!(engine.records()[0].id, RecordId::new(1));
        assert!(engine.selected().is_empty());
    }

    #[test]
    fn add_form_scenario_from_an_empty_store() {
        let mut engine = hydrated_engine(Vec::new());
        engine.draft_mut().name = "X".to_owned();
        engine.draft_mut().email = "x@x.com".to_owned();
        engine.draft_mut().phone = "123".to_owned();
        engine.draft_mut().variation = Variation::Vios;

        let events = engine.dispatch(TableCommand::SubmitDraft);
        assert!(events.contains(&TableEvent::DraftCommitted(RecordId::new(1))));
        assert!(events.contains(&TableEvent::RowsChanged));
        assert_eq!(engine.records().len(), 1);
        assert_eq!(engine.records()[0].name, "X");
        assert_eq!(engine.draft(), &RecordDraft::default());
    }
}
