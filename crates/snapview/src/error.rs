use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A navigator needs at least one record to point at.
    #[error("snapshot collection contains no records")]
    EmptyCollection,
}
