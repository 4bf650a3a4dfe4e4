#![doc = include_str!("../README.md")]

pub mod error;
pub mod navigator;
pub mod player;
pub mod record;
pub mod rows;
pub mod session;
pub mod strdiff;

pub use error::{Result, SnapshotError};
pub use navigator::{MoveOutcome, StepNavigator};
pub use player::{Phase, SnapshotPlayer};
pub use record::{
    InputSnapshot, OutputSnapshot, PropertyPair, RecordKind, SnapshotCollection, SnapshotRecord,
    StateChangeSnapshot, StepGroup, UserActionFilter,
};
pub use rows::{PropertyRow, RowSet, RowValue, compute_rows};
pub use session::{StepView, ViewerSession};
pub use strdiff::{DiffSpan, SpanKind, StringDiff, diff_strings};
