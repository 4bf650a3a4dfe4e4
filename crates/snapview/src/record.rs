use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named field of a serialized state object at a point in time.
///
/// A snapshot's state is an ordered list of these pairs with unique names;
/// the order is the declaration order of the traced object's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPair {
    pub name: String,
    pub value: String,
}

impl PropertyPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The direction tag of a record, for display alongside the action text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Input,
    StateChange,
    Output,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Input => write!(f, "input"),
            RecordKind::StateChange => write!(f, "stateChange"),
            RecordKind::Output => write!(f, "output"),
        }
    }
}

/// One captured step of a reducer's execution.
///
/// `SnapshotRecord` is externally tagged: the JSON object has a single key
/// (`"Input"`, `"StateChange"`, or `"Output"`) whose value is the record
/// content. A trace is an ordered sequence of these in whatever order the
/// reducer actually ran — consumers must not assume one of each per cycle.
///
/// - [`InputSnapshot`] carries the state *before* the action ran.
/// - [`StateChangeSnapshot`] carries the state after an internal mutation.
/// - [`OutputSnapshot`] carries the state after an effect was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotRecord {
    Input(InputSnapshot),
    StateChange(StateChangeSnapshot),
    Output(OutputSnapshot),
}

/// An action arriving at the reducer, with the state it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Description of the action (e.g. `".user(buttonTap)"`).
    pub action: String,
    pub state: Vec<PropertyPair>,
    #[serde(default)]
    pub nested_level: u32,
}

/// An internal state mutation with no externally visible action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangeSnapshot {
    pub state: Vec<PropertyPair>,
    #[serde(default)]
    pub nested_level: u32,
}

/// An effect emitted by the reducer, with the state after emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSnapshot {
    /// Description of the produced effect.
    pub effect: String,
    pub state: Vec<PropertyPair>,
    #[serde(default)]
    pub nested_level: u32,
}

impl SnapshotRecord {
    pub fn input(action: impl Into<String>, state: Vec<PropertyPair>) -> Self {
        Self::Input(InputSnapshot {
            action: action.into(),
            state,
            nested_level: 0,
        })
    }

    pub fn state_change(state: Vec<PropertyPair>) -> Self {
        Self::StateChange(StateChangeSnapshot {
            state,
            nested_level: 0,
        })
    }

    pub fn output(effect: impl Into<String>, state: Vec<PropertyPair>) -> Self {
        Self::Output(OutputSnapshot {
            effect: effect.into(),
            state,
            nested_level: 0,
        })
    }

    pub fn with_nested_level(mut self, level: u32) -> Self {
        match &mut self {
            SnapshotRecord::Input(s) => s.nested_level = level,
            SnapshotRecord::StateChange(s) => s.nested_level = level,
            SnapshotRecord::Output(s) => s.nested_level = level,
        }
        self
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            SnapshotRecord::Input(_) => RecordKind::Input,
            SnapshotRecord::StateChange(_) => RecordKind::StateChange,
            SnapshotRecord::Output(_) => RecordKind::Output,
        }
    }

    /// The property list captured by this record.
    pub fn state(&self) -> &[PropertyPair] {
        match self {
            SnapshotRecord::Input(s) => &s.state,
            SnapshotRecord::StateChange(s) => &s.state,
            SnapshotRecord::Output(s) => &s.state,
        }
    }

    pub fn nested_level(&self) -> u32 {
        match self {
            SnapshotRecord::Input(s) => s.nested_level,
            SnapshotRecord::StateChange(s) => s.nested_level,
            SnapshotRecord::Output(s) => s.nested_level,
        }
    }

    /// The action text, for `Input` records only.
    pub fn input_action(&self) -> Option<&str> {
        match self {
            SnapshotRecord::Input(s) => Some(&s.action),
            _ => None,
        }
    }

    /// The effect text, for `Output` records only.
    pub fn output_effect(&self) -> Option<&str> {
        match self {
            SnapshotRecord::Output(s) => Some(&s.effect),
            _ => None,
        }
    }
}

/// A complete recorded trace: a title plus an ordered record sequence.
///
/// Immutable once loaded; the viewer session only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCollection {
    pub title: String,
    pub snapshots: Vec<SnapshotRecord>,
    /// When the trace was captured, if the container recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl SnapshotCollection {
    pub fn new(title: impl Into<String>, snapshots: Vec<SnapshotRecord>) -> Self {
        Self {
            title: title.into(),
            snapshots,
            recorded_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One logical step in the grouped trace schema: the input that arrived,
/// the state on both sides of it, and the effect it produced (if any).
///
/// This is the richer of the two schemas a recorder can emit; the flat
/// [`SnapshotRecord`] sequence interleaves the same information as separate
/// records. Driven by [`SnapshotPlayer`](crate::SnapshotPlayer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepGroup {
    pub action: String,
    /// State before the action ran.
    pub input_state: Vec<PropertyPair>,
    /// State after the reducer finished with the action.
    pub output_state: Vec<PropertyPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default)]
    pub nested_level: u32,
}

/// Classifier for user-initiated input actions.
///
/// Traces encode externally-triggered actions with a marker prefix on the
/// action text; the usual convention is `".user("`. The prefix is
/// configurable so the navigator works with other encoding conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActionFilter {
    prefix: String,
}

impl UserActionFilter {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn matches(&self, action: &str) -> bool {
        action.starts_with(&self.prefix)
    }

    /// True for `Input` records whose action carries the user marker.
    pub fn is_user_action(&self, record: &SnapshotRecord) -> bool {
        record
            .input_action()
            .is_some_and(|action| self.matches(action))
    }
}

impl Default for UserActionFilter {
    fn default() -> Self {
        Self::with_prefix(".user(")
    }
}
