use crate::error::Result;
use crate::navigator::{MoveOutcome, StepNavigator};
use crate::record::{PropertyPair, RecordKind, SnapshotCollection, UserActionFilter};
use crate::rows::{PropertyRow, RowSet};
use crate::strdiff::{StringDiff, diff_strings};

/// Everything the renderer needs to draw one navigation step.
#[derive(Debug, Clone)]
pub struct StepView {
    pub title: String,
    pub kind: RecordKind,
    /// Input action text or output effect text, depending on `kind`;
    /// `None` for state changes.
    pub action: Option<String>,
    pub nested_level: u32,
    pub is_user_action: bool,
    pub is_at_start: bool,
    pub is_at_end: bool,
    /// 1-based step number as a display string.
    pub step: String,
    pub step_count: usize,
    pub progress: f64,
    pub rows: Vec<PropertyRow>,
}

/// The renderer-facing viewer session: a [`StepNavigator`] plus the
/// [`RowSet`] it feeds.
///
/// Each command is a synchronous call-and-return on the event thread; the
/// session owns the cursor and the rows, and the collection is never
/// mutated. The diff for the step arrived at always uses exactly the
/// property list the cursor held immediately before the move — captured
/// here, before the cursor mutates — and jumps feed no previous list at
/// all, so their updated flags come back cleared.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    navigator: StepNavigator,
    rows: RowSet,
}

impl ViewerSession {
    pub fn new(collection: SnapshotCollection) -> Result<Self> {
        Self::with_filter(collection, UserActionFilter::default())
    }

    pub fn with_filter(collection: SnapshotCollection, filter: UserActionFilter) -> Result<Self> {
        let navigator = StepNavigator::new(collection)?.with_filter(filter);
        let mut rows = RowSet::new();
        rows.update(navigator.current_state(), None);
        Ok(Self { navigator, rows })
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn rows(&self) -> &[PropertyRow] {
        self.rows.rows()
    }

    fn step(&mut self, go: impl FnOnce(&mut StepNavigator) -> MoveOutcome) -> MoveOutcome {
        let before: Vec<PropertyPair> = self.navigator.current_state().to_vec();
        let outcome = go(&mut self.navigator);
        if outcome.moved() {
            self.rows.update(self.navigator.current_state(), Some(&before));
        }
        outcome
    }

    fn jump(&mut self, go: impl FnOnce(&mut StepNavigator) -> MoveOutcome) -> MoveOutcome {
        let outcome = go(&mut self.navigator);
        if outcome.moved() {
            self.rows.update(self.navigator.current_state(), None);
        }
        outcome
    }

    pub fn move_forward(&mut self) -> MoveOutcome {
        self.step(StepNavigator::move_forward)
    }

    pub fn move_backward(&mut self) -> MoveOutcome {
        self.step(StepNavigator::move_backward)
    }

    pub fn move_forward_user(&mut self) -> MoveOutcome {
        self.step(StepNavigator::move_forward_user)
    }

    pub fn move_backward_user(&mut self) -> MoveOutcome {
        self.step(StepNavigator::move_backward_user)
    }

    pub fn move_to_first(&mut self) -> MoveOutcome {
        self.jump(StepNavigator::move_to_first)
    }

    pub fn move_to_last(&mut self) -> MoveOutcome {
        self.jump(StepNavigator::move_to_last)
    }

    pub fn jump_to_step(&mut self, step: usize) -> MoveOutcome {
        self.jump(|nav| nav.jump_to(step))
    }

    /// Flip a row's expanded flag; `false` for a stale name.
    pub fn toggle_row_expanded(&mut self, name: &str) -> bool {
        self.rows.toggle_expanded(name)
    }

    /// Character diff of one updated property's old/new text.
    ///
    /// Answers only for rows currently marked updated; unknown names and
    /// unchanged rows yield `None`.
    pub fn request_string_diff(&self, name: &str) -> Option<StringDiff> {
        let (old, new) = self.rows.get(name)?.change()?;
        Some(diff_strings(old, new))
    }

    /// Snapshot of the current step for the renderer.
    pub fn view(&self) -> StepView {
        let nav = &self.navigator;
        let action = nav
            .input_action()
            .or_else(|| nav.output_effect())
            .map(str::to_string);
        StepView {
            title: nav.collection().title.clone(),
            kind: nav.current().kind(),
            action,
            nested_level: nav.nested_level(),
            is_user_action: nav.is_user_action(),
            is_at_start: nav.is_at_start(),
            is_at_end: nav.is_at_end(),
            step: nav.step_number().to_string(),
            step_count: nav.step_count(),
            progress: nav.progress(),
            rows: self.rows.rows().to_vec(),
        }
    }
}
