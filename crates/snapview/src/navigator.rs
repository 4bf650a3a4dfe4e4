use crate::error::{Result, SnapshotError};
use crate::record::{PropertyPair, SnapshotCollection, SnapshotRecord, UserActionFilter};

/// The result of a navigation command.
///
/// Boundary conditions are not errors: a command that cannot move leaves the
/// cursor untouched and says why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The cursor moved; derived views should recompute.
    Moved,
    /// Already at the first position.
    AtStart,
    /// Already at the last position.
    AtEnd,
    /// No record satisfied the scan predicate.
    NoMatch,
    /// The requested step number is outside `1..=count`.
    OutOfRange,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// A cursor over an immutable record sequence — the flat-index navigator.
///
/// The cursor always points at an existing record: construction rejects an
/// empty collection, and every move is boundary-guarded. Out-of-range moves
/// are no-ops reported through [`MoveOutcome`].
///
/// # Example
///
/// ```
/// use snapview::{MoveOutcome, PropertyPair, SnapshotCollection, SnapshotRecord, StepNavigator};
///
/// let collection = SnapshotCollection::new(
///     "demo",
///     vec![
///         SnapshotRecord::input(".user(tap)", vec![PropertyPair::new("x", "1")]),
///         SnapshotRecord::state_change(vec![PropertyPair::new("x", "2")]),
///     ],
/// );
/// let mut nav = StepNavigator::new(collection)?;
///
/// assert_eq!(nav.move_forward(), MoveOutcome::Moved);
/// assert_eq!(nav.step_number(), 2);
/// assert_eq!(nav.move_forward(), MoveOutcome::AtEnd);
/// # Ok::<(), snapview::SnapshotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StepNavigator {
    collection: SnapshotCollection,
    index: usize,
    filter: UserActionFilter,
}

impl StepNavigator {
    pub fn new(collection: SnapshotCollection) -> Result<Self> {
        if collection.is_empty() {
            return Err(SnapshotError::EmptyCollection);
        }
        Ok(Self {
            collection,
            index: 0,
            filter: UserActionFilter::default(),
        })
    }

    /// Replace the user-action classifier (defaults to the `".user("` prefix).
    pub fn with_filter(mut self, filter: UserActionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn collection(&self) -> &SnapshotCollection {
        &self.collection
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based step number, for display.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    pub fn step_count(&self) -> usize {
        self.collection.len()
    }

    /// Fraction of the trace covered so far, for a progress bar.
    pub fn progress(&self) -> f64 {
        let count = self.collection.len();
        if count == 0 {
            return 1.0;
        }
        (self.index + 1) as f64 / count as f64
    }

    pub fn current(&self) -> &SnapshotRecord {
        &self.collection.snapshots[self.index]
    }

    pub fn current_state(&self) -> &[PropertyPair] {
        self.current().state()
    }

    /// The previous record's property list, or `None` at the first record.
    pub fn previous_state(&self) -> Option<&[PropertyPair]> {
        self.index
            .checked_sub(1)
            .map(|i| self.collection.snapshots[i].state())
    }

    pub fn input_action(&self) -> Option<&str> {
        self.current().input_action()
    }

    pub fn output_effect(&self) -> Option<&str> {
        self.current().output_effect()
    }

    pub fn nested_level(&self) -> u32 {
        self.current().nested_level()
    }

    pub fn is_user_action(&self) -> bool {
        self.filter.is_user_action(self.current())
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.collection.len()
    }

    pub fn move_forward(&mut self) -> MoveOutcome {
        if self.is_at_end() {
            return MoveOutcome::AtEnd;
        }
        self.index += 1;
        MoveOutcome::Moved
    }

    pub fn move_backward(&mut self) -> MoveOutcome {
        if self.is_at_start() {
            return MoveOutcome::AtStart;
        }
        self.index -= 1;
        MoveOutcome::Moved
    }

    /// Unconditional jump to the first record. Always reports `Moved`, even
    /// when the cursor is already there.
    pub fn move_to_first(&mut self) -> MoveOutcome {
        self.index = 0;
        MoveOutcome::Moved
    }

    /// Unconditional jump to the last record.
    pub fn move_to_last(&mut self) -> MoveOutcome {
        self.index = self.collection.len() - 1;
        MoveOutcome::Moved
    }

    /// Scan forward for the next user-initiated input action. If none exists
    /// past the cursor, the cursor stays put.
    pub fn move_forward_user(&mut self) -> MoveOutcome {
        let found = self.collection.snapshots[self.index + 1..]
            .iter()
            .position(|r| self.filter.is_user_action(r));
        match found {
            Some(offset) => {
                self.index += 1 + offset;
                MoveOutcome::Moved
            }
            None => MoveOutcome::NoMatch,
        }
    }

    /// Scan backward for the nearest preceding user-initiated input action.
    pub fn move_backward_user(&mut self) -> MoveOutcome {
        let found = self.collection.snapshots[..self.index]
            .iter()
            .rposition(|r| self.filter.is_user_action(r));
        match found {
            Some(index) => {
                self.index = index;
                MoveOutcome::Moved
            }
            None => MoveOutcome::NoMatch,
        }
    }

    /// Jump to a 1-based step number. Out-of-range steps leave the cursor
    /// unchanged; the caller surfaces a validation message, not a crash.
    pub fn jump_to(&mut self, step: usize) -> MoveOutcome {
        if step < 1 || step > self.collection.len() {
            return MoveOutcome::OutOfRange;
        }
        self.index = step - 1;
        MoveOutcome::Moved
    }
}
