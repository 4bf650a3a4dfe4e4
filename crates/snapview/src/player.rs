use crate::error::{Result, SnapshotError};
use crate::navigator::MoveOutcome;
use crate::record::{PropertyPair, StepGroup};

/// The sub-phase of a logical step the player cursor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Input,
    StateChange,
    Output,
}

/// The phased two-axis cursor over grouped steps: `(index, phase)`.
///
/// Advancing cycles input → stateChange → output and then rolls over to the
/// next group's input phase. The phase distinguishes before-state from
/// after-state within one logical step, which the flat
/// [`StepNavigator`](crate::StepNavigator) cannot do.
///
/// Jump moves (`move_to_first`, `move_to_last`) have no semantically
/// adjacent previous step; callers feeding a
/// [`RowSet`](crate::RowSet) should pass `previous = None` after them so no
/// misleading diff is shown.
#[derive(Debug, Clone)]
pub struct SnapshotPlayer {
    steps: Vec<StepGroup>,
    index: usize,
    phase: Phase,
}

impl SnapshotPlayer {
    pub fn new(steps: Vec<StepGroup>) -> Result<Self> {
        if steps.is_empty() {
            return Err(SnapshotError::EmptyCollection);
        }
        Ok(Self {
            steps,
            index: 0,
            phase: Phase::Input,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn current(&self) -> &StepGroup {
        &self.steps[self.index]
    }

    /// The action text — only while showing the input phase.
    pub fn input_action(&self) -> Option<&str> {
        match self.phase {
            Phase::Input => Some(&self.current().action),
            Phase::StateChange | Phase::Output => None,
        }
    }

    /// The effect text — only while showing the output phase.
    pub fn output_effect(&self) -> Option<&str> {
        match self.phase {
            Phase::Input | Phase::StateChange => None,
            Phase::Output => self.current().effect.as_deref(),
        }
    }

    /// Before-state in the input phase, after-state otherwise.
    pub fn current_state(&self) -> &[PropertyPair] {
        let group = self.current();
        match self.phase {
            Phase::Input => &group.input_state,
            Phase::StateChange | Phase::Output => &group.output_state,
        }
    }

    pub fn nested_level(&self) -> u32 {
        self.current().nested_level
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0 && self.phase == Phase::Input
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 == self.steps.len() && self.phase == Phase::Output
    }

    pub fn move_forward(&mut self) -> MoveOutcome {
        if self.is_at_end() {
            return MoveOutcome::AtEnd;
        }
        match self.phase {
            Phase::Input => self.phase = Phase::StateChange,
            Phase::StateChange => self.phase = Phase::Output,
            Phase::Output => {
                self.index += 1;
                self.phase = Phase::Input;
            }
        }
        MoveOutcome::Moved
    }

    pub fn move_backward(&mut self) -> MoveOutcome {
        if self.is_at_start() {
            return MoveOutcome::AtStart;
        }
        match self.phase {
            Phase::Output => self.phase = Phase::StateChange,
            Phase::StateChange => self.phase = Phase::Input,
            Phase::Input => {
                self.index -= 1;
                self.phase = Phase::Output;
            }
        }
        MoveOutcome::Moved
    }

    /// Jump to the very first phase. Downstream diffs should be reset.
    pub fn move_to_first(&mut self) -> MoveOutcome {
        self.index = 0;
        self.phase = Phase::Input;
        MoveOutcome::Moved
    }

    /// Jump to the terminal phase of the last group.
    pub fn move_to_last(&mut self) -> MoveOutcome {
        self.index = self.steps.len() - 1;
        self.phase = Phase::Output;
        MoveOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Vec<PropertyPair> {
        pairs.iter().map(|(n, v)| PropertyPair::new(*n, *v)).collect()
    }

    fn group(action: &str, before: &str, after: &str, effect: Option<&str>) -> StepGroup {
        StepGroup {
            action: action.into(),
            input_state: props(&[("x", before)]),
            output_state: props(&[("x", after)]),
            effect: effect.map(Into::into),
            nested_level: 0,
        }
    }

    fn player() -> SnapshotPlayer {
        SnapshotPlayer::new(vec![
            group(".user(tap)", "1", "2", Some("save")),
            group(".timer(tick)", "2", "3", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            SnapshotPlayer::new(vec![]),
            Err(SnapshotError::EmptyCollection)
        ));
    }

    #[test]
    fn test_phase_cycle_forward() {
        let mut player = player();
        assert_eq!(player.phase(), Phase::Input);
        assert_eq!(player.move_forward(), MoveOutcome::Moved);
        assert_eq!(player.phase(), Phase::StateChange);
        assert_eq!(player.move_forward(), MoveOutcome::Moved);
        assert_eq!(player.phase(), Phase::Output);
        assert_eq!(player.move_forward(), MoveOutcome::Moved);
        assert_eq!((player.index(), player.phase()), (1, Phase::Input));
    }

    #[test]
    fn test_forward_stops_at_terminal_phase() {
        let mut player = player();
        player.move_to_last();
        assert!(player.is_at_end());
        assert_eq!(player.move_forward(), MoveOutcome::AtEnd);
        assert_eq!((player.index(), player.phase()), (1, Phase::Output));
    }

    #[test]
    fn test_backward_mirrors_forward() {
        let mut player = player();
        player.move_forward();
        player.move_forward();
        player.move_forward();
        player.move_backward();
        assert_eq!((player.index(), player.phase()), (0, Phase::Output));
        player.move_backward();
        player.move_backward();
        assert!(player.is_at_start());
        assert_eq!(player.move_backward(), MoveOutcome::AtStart);
    }

    #[test]
    fn test_backward_from_terminal_is_legal() {
        let mut player = player();
        player.move_to_last();
        assert_eq!(player.move_backward(), MoveOutcome::Moved);
        assert_eq!((player.index(), player.phase()), (1, Phase::StateChange));
    }

    #[test]
    fn test_action_only_in_input_phase() {
        let mut player = player();
        assert_eq!(player.input_action(), Some(".user(tap)"));
        assert_eq!(player.output_effect(), None);
        player.move_forward();
        assert_eq!(player.input_action(), None);
        assert_eq!(player.output_effect(), None);
        player.move_forward();
        assert_eq!(player.input_action(), None);
        assert_eq!(player.output_effect(), Some("save"));
    }

    #[test]
    fn test_state_selection_per_phase() {
        let mut player = player();
        assert_eq!(player.current_state()[0].value, "1");
        player.move_forward();
        assert_eq!(player.current_state()[0].value, "2");
        player.move_forward();
        assert_eq!(player.current_state()[0].value, "2");
    }

    #[test]
    fn test_missing_effect_is_none_in_output_phase() {
        let mut player = player();
        player.move_to_last();
        assert_eq!(player.output_effect(), None);
    }

    #[test]
    fn test_move_to_first_resets_cursor() {
        let mut player = player();
        player.move_to_last();
        assert_eq!(player.move_to_first(), MoveOutcome::Moved);
        assert!(player.is_at_start());
    }
}
