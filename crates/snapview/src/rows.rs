//! Per-property change tracking between consecutive steps.
//!
//! The diff itself is a pure function ([`compute_rows`]); [`RowSet`] is the
//! thin stateful wrapper that sits at the renderer boundary, carrying the
//! user's expand/collapse toggles across recomputes.

use crate::record::PropertyPair;

/// A property's value, with its change status relative to the previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    Same(String),
    Updated { old: String, new: String },
}

impl RowValue {
    /// Compare two versions of a value and classify the result.
    pub fn diff(old: &str, new: &str) -> Self {
        if old == new {
            RowValue::Same(new.to_string())
        } else {
            RowValue::Updated {
                old: old.to_string(),
                new: new.to_string(),
            }
        }
    }

    /// The current (newest) text.
    pub fn latest(&self) -> &str {
        match self {
            RowValue::Same(value) => value,
            RowValue::Updated { new, .. } => new,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, RowValue::Updated { .. })
    }

    /// The `(old, new)` pair, for updated values only.
    pub fn change(&self) -> Option<(&str, &str)> {
        match self {
            RowValue::Same(_) => None,
            RowValue::Updated { old, new } => Some((old, new)),
        }
    }
}

/// One row of the property view. Row identity is the property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub name: String,
    pub value: RowValue,
    pub is_expanded: bool,
}

impl PropertyRow {
    /// A freshly built row: current value, no change status, collapsed.
    fn fresh(pair: &PropertyPair) -> Self {
        Self {
            name: pair.name.clone(),
            value: RowValue::Same(pair.value.clone()),
            is_expanded: false,
        }
    }

    pub fn is_updated(&self) -> bool {
        self.value.is_updated()
    }

    pub fn change(&self) -> Option<(&str, &str)> {
        self.value.change()
    }
}

/// True when the two lists describe the same object shape: equal length and
/// positionally matching names.
fn shapes_match(current: &[PropertyPair], previous: &[PropertyPair]) -> bool {
    current.len() == previous.len()
        && current
            .iter()
            .zip(previous)
            .all(|(c, p)| c.name == p.name)
}

/// Diff a property list against the one from the previous step.
///
/// `previous = None` means there is no semantically adjacent previous step
/// (session start, or the cursor just jumped): every row comes back
/// not-updated. The same happens when the shapes disagree — a changed
/// property schema means the trace switched to an unrelated object, and a
/// positional diff would be nonsense, so the rows are rebuilt from scratch
/// instead of asserting.
pub fn compute_rows(
    current: &[PropertyPair],
    previous: Option<&[PropertyPair]>,
) -> Vec<PropertyRow> {
    match previous {
        Some(prev) if shapes_match(current, prev) => current
            .iter()
            .zip(prev)
            .map(|(c, p)| PropertyRow {
                name: c.name.clone(),
                value: RowValue::diff(&p.value, &c.value),
                is_expanded: false,
            })
            .collect(),
        _ => current.iter().map(PropertyRow::fresh).collect(),
    }
}

/// The stateful row list shown to the renderer.
///
/// Holds the rows from the last [`update`](Self::update) and keeps
/// `is_expanded` toggles alive across recomputes as long as the property
/// names still line up; a shape change resets everything to collapsed.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<PropertyRow>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    pub fn get(&self, name: &str) -> Option<&PropertyRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Recompute the rows for a new step.
    ///
    /// Pass the property list the cursor held immediately before the move as
    /// `previous` after a single step, or `None` after a jump so every
    /// updated flag is cleared.
    pub fn update(&mut self, current: &[PropertyPair], previous: Option<&[PropertyPair]>) {
        let carry_expansion = self.rows.len() == current.len()
            && self
                .rows
                .iter()
                .zip(current)
                .all(|(row, pair)| row.name == pair.name);

        let mut rows = compute_rows(current, previous);
        if carry_expansion {
            for (row, old) in rows.iter_mut().zip(&self.rows) {
                row.is_expanded = old.is_expanded;
            }
        }
        self.rows = rows;
    }

    /// Flip a row's expanded flag. An unknown name is a stale reference from
    /// the caller; it is reported as `false`, never a failure.
    pub fn toggle_expanded(&mut self, name: &str) -> bool {
        match self.rows.iter_mut().find(|r| r.name == name) {
            Some(row) => {
                row.is_expanded = !row.is_expanded;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Vec<PropertyPair> {
        pairs.iter().map(|(n, v)| PropertyPair::new(*n, *v)).collect()
    }

    #[test]
    fn test_row_value_diff() {
        assert_eq!(RowValue::diff("a", "a"), RowValue::Same("a".into()));
        assert_eq!(
            RowValue::diff("a", "b"),
            RowValue::Updated {
                old: "a".into(),
                new: "b".into()
            }
        );
        assert_eq!(RowValue::diff("a", "b").latest(), "b");
        assert_eq!(RowValue::diff("a", "a").latest(), "a");
        assert_eq!(RowValue::diff("a", "b").change(), Some(("a", "b")));
        assert_eq!(RowValue::diff("a", "a").change(), None);
    }

    #[test]
    fn test_single_changed_value() {
        let prev = props(&[("x", "1"), ("y", "2"), ("z", "3")]);
        let current = props(&[("x", "1"), ("y", "5"), ("z", "3")]);

        let rows = compute_rows(&current, Some(&prev));
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].is_updated());
        assert!(rows[1].is_updated());
        assert_eq!(rows[1].change(), Some(("2", "5")));
        assert!(!rows[2].is_updated());
    }

    #[test]
    fn test_no_previous_builds_fresh_rows() {
        let current = props(&[("x", "1"), ("y", "2")]);
        let rows = compute_rows(&current, None);
        assert!(rows.iter().all(|r| !r.is_updated() && !r.is_expanded));
        assert_eq!(rows[0].value.latest(), "1");
    }

    #[test]
    fn test_length_mismatch_rebuilds() {
        let prev = props(&[("x", "1")]);
        let current = props(&[("x", "9"), ("y", "2")]);
        let rows = compute_rows(&current, Some(&prev));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_updated()));
    }

    #[test]
    fn test_name_mismatch_rebuilds_instead_of_panicking() {
        let prev = props(&[("x", "1"), ("y", "2")]);
        let current = props(&[("x", "9"), ("w", "2")]);
        let rows = compute_rows(&current, Some(&prev));
        assert!(rows.iter().all(|r| !r.is_updated()));
        assert_eq!(rows[1].name, "w");
    }

    #[test]
    fn test_row_set_update_and_reset() {
        let mut set = RowSet::new();
        set.update(&props(&[("x", "1")]), None);
        assert!(!set.rows()[0].is_updated());

        set.update(&props(&[("x", "2")]), Some(&props(&[("x", "1")])));
        assert!(set.rows()[0].is_updated());

        // A jump passes no previous list: flags clear even though the value
        // differs from what was on screen.
        set.update(&props(&[("x", "7")]), None);
        assert!(!set.rows()[0].is_updated());
    }

    #[test]
    fn test_expansion_persists_across_update() {
        let mut set = RowSet::new();
        set.update(&props(&[("x", "1"), ("y", "2")]), None);
        assert!(set.toggle_expanded("y"));
        assert!(set.get("y").unwrap().is_expanded);

        set.update(
            &props(&[("x", "1"), ("y", "3")]),
            Some(&props(&[("x", "1"), ("y", "2")])),
        );
        assert!(set.get("y").unwrap().is_expanded);
        assert!(!set.get("x").unwrap().is_expanded);
    }

    #[test]
    fn test_expansion_resets_on_shape_change() {
        let mut set = RowSet::new();
        set.update(&props(&[("x", "1"), ("y", "2")]), None);
        set.toggle_expanded("x");

        set.update(&props(&[("a", "1")]), None);
        assert!(set.rows().iter().all(|r| !r.is_expanded));
    }

    #[test]
    fn test_toggle_unknown_name_is_noop() {
        let mut set = RowSet::new();
        set.update(&props(&[("x", "1")]), None);
        assert!(!set.toggle_expanded("nope"));
        assert!(!set.get("x").unwrap().is_expanded);
    }

    #[test]
    fn test_toggle_twice_restores_collapsed() {
        let mut set = RowSet::new();
        set.update(&props(&[("x", "1")]), None);
        assert!(set.toggle_expanded("x"));
        assert!(set.toggle_expanded("x"));
        assert!(!set.get("x").unwrap().is_expanded);
    }
}
