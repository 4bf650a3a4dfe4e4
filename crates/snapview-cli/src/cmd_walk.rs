use anyhow::{Context, Result};
use snapview::{RecordKind, SnapshotCollection, UserActionFilter};
use snapview_io::TraceContainer;
use std::path::PathBuf;

pub fn run(input: PathBuf, user_only: bool, marker: String) -> Result<()> {
    let collection = read_trace(&input)?;
    let filter = UserActionFilter::with_prefix(marker);

    for (index, record) in collection.snapshots.iter().enumerate() {
        let is_user = filter.is_user_action(record);
        if user_only && !is_user {
            continue;
        }
        println!("{}", format_record_line(index, record, is_user));
    }

    Ok(())
}

fn format_record_line(index: usize, record: &snapview::SnapshotRecord, is_user: bool) -> String {
    let text = match record.kind() {
        RecordKind::Input => record.input_action().unwrap_or_default(),
        RecordKind::StateChange => "-",
        RecordKind::Output => record.output_effect().unwrap_or_default(),
    };
    let indent = "  ".repeat(record.nested_level() as usize);
    let user = if is_user { " [user]" } else { "" };
    format!(
        "{:>5}  {:<11}  {}{}{}",
        index + 1,
        record.kind().to_string(),
        indent,
        text,
        user
    )
}

fn read_trace(path: &PathBuf) -> Result<SnapshotCollection> {
    TraceContainer::load(path).with_context(|| format!("Failed to read trace {:?}", path))
}
