//! Column sort state for record tables.
//!
//! Clicking a header cycles that column through ascending, descending and
//! unsorted. The source collection is never reordered; [`SortState::sorted_view`]
//! returns a projection of references.

use std::cmp::{Ordering, Reverse};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crm_model::{FieldValue, Record};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active sort column and direction of one table.
///
/// `sort_key` is `None` exactly when `direction` is [`SortDirection::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    sort_key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// No active sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `key` sorted ascending, as if its header had been clicked once.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            sort_key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    /// Header click on `key`.
    ///
    /// A different key becomes active ascending; the active key goes
    /// ascending -> descending -> cleared.
    pub fn set_sort(&mut self, key: &str) {
        let is_active = self.sort_key.as_deref() == Some(key);
        match (is_active, self.direction) {
            (true, SortDirection::Ascending) => {
                self.direction = SortDirection::Descending;
            }
            (true, SortDirection::Descending) => {
                self.clear();
            }
            _ => {
                self.sort_key = Some(key.to_string());
                self.direction = SortDirection::Ascending;
            }
        }
        debug!(key, direction = %self.direction, "sort changed");
    }

    pub fn clear(&mut self) {
        self.sort_key = None;
        self.direction = SortDirection::None;
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Header arrow for `key`, if it is the active column.
    pub fn indicator_for(&self, key: &str) -> Option<&'static str> {
        if self.sort_key.as_deref() != Some(key) {
            return None;
        }
        match self.direction {
            SortDirection::Ascending => Some("▲"),
            SortDirection::Descending => Some("▼"),
            SortDirection::None => None,
        }
    }

    /// Records in display order. Equal rows keep their original order.
    pub fn sorted_view<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut rows: Vec<&R> = records.iter().collect();
        self.sort_rows(&mut rows);
        rows
    }

    /// Sort an existing projection in place (e.g. after filtering).
    pub fn sort_rows<R: Record>(&self, rows: &mut [&R]) {
        let Some(key) = self.sort_key.as_deref() else {
            return;
        };
        match self.direction {
            SortDirection::Ascending => {
                rows.sort_by_cached_key(|record| sort_text(&record.field(key)));
            }
            SortDirection::Descending => {
                rows.sort_by_cached_key(|record| Reverse(sort_text(&record.field(key))));
            }
            SortDirection::None => {}
        }
    }
}

/// Compare two cells the way a table column is ordered.
///
/// Cells compare as lowercased text, numbers included, so `"100"` sorts
/// before `"9"`. A missing cell is empty text: equal to every other missing
/// cell and ahead of any present one.
pub fn compare_fields(a: &FieldValue, b: &FieldValue) -> Ordering {
    sort_text(a).cmp(&sort_text(b))
}

fn sort_text(value: &FieldValue) -> String {
    value.as_text().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::DynamicRecord;

    fn rows(values: &[(&str, FieldValue)]) -> Vec<DynamicRecord> {
        values
            .iter()
            .map(|(id, value)| DynamicRecord::new(*id).with("v", value.clone()))
            .collect()
    }

    fn ids<'a>(view: &[&'a DynamicRecord]) -> Vec<&'a str> {
        view.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn three_clicks_cycle_back_to_unsorted() {
        let mut state = SortState::new();
        state.set_sort("score");
        assert_eq!(state.direction(), SortDirection::Ascending);
        state.set_sort("score");
        assert_eq!(state.direction(), SortDirection::Descending);
        state.set_sort("score");
        assert_eq!(state, SortState::new());
    }

    #[test]
    fn switching_key_restarts_ascending() {
        let mut state = SortState::new();
        state.set_sort("score");
        state.set_sort("score");
        state.set_sort("name");
        assert_eq!(state.sort_key(), Some("name"));
        assert_eq!(state.direction(), SortDirection::Ascending);
        assert_eq!(state.indicator_for("name"), Some("▲"));
        assert_eq!(state.indicator_for("score"), None);
    }

    #[test]
    fn text_compares_case_insensitively() {
        let records = rows(&[
            ("a", "beta".into()),
            ("b", "Alpha".into()),
            ("c", "ALPHA".into()),
        ]);
        let state = SortState::ascending("v");
        assert_eq!(ids(&state.sorted_view(&records)), vec!["b", "c", "a"]);
    }

    #[test]
    fn numbers_compare_as_text() {
        let records = rows(&[("a", 100.0.into()), ("b", 9.0.into()), ("c", 45.0.into())]);
        let state = SortState::ascending("v");
        assert_eq!(ids(&state.sorted_view(&records)), vec!["a", "c", "b"]);
    }

    #[test]
    fn descending_text_order_of_numbers() {
        let records = rows(&[("a", 100.0.into()), ("b", 9.0.into()), ("c", 45.0.into())]);
        let mut state = SortState::ascending("v");
        state.set_sort("v");
        assert_eq!(ids(&state.sorted_view(&records)), vec!["b", "c", "a"]);
    }

    #[test]
    fn descending_keeps_ties_in_original_order() {
        let records = rows(&[
            ("a", 1.0.into()),
            ("b", 2.0.into()),
            ("c", 1.0.into()),
            ("d", 2.0.into()),
        ]);
        let mut state = SortState::new();
        state.set_sort("v");
        state.set_sort("v");
        assert_eq!(ids(&state.sorted_view(&records)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn missing_field_is_a_stable_no_op() {
        let records = rows(&[("c", "x".into()), ("a", "y".into()), ("b", "z".into())]);
        let state = SortState::ascending("not_a_column");
        assert_eq!(ids(&state.sorted_view(&records)), vec!["c", "a", "b"]);
    }

    #[test]
    fn missing_values_compare_as_empty_text() {
        assert_eq!(
            compare_fields(&FieldValue::Missing, &FieldValue::Missing),
            Ordering::Equal
        );
        assert_eq!(
            compare_fields(&FieldValue::Missing, &FieldValue::Number(-5.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_fields(&FieldValue::Number(5.0), &FieldValue::Text("5".into())),
            Ordering::Equal
        );
        assert_eq!(
            compare_fields(&"Acme".into(), &"acme".into()),
            Ordering::Equal
        );
    }
}
