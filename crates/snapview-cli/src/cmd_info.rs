use anyhow::{Context, Result};
use snapview::{RecordKind, SnapshotCollection, UserActionFilter};
use snapview_io::TraceContainer;
use std::path::PathBuf;

pub fn run(input: PathBuf, json: bool) -> Result<()> {
    let collection = read_trace(&input)?;
    let filter = UserActionFilter::default();

    let mut inputs = 0;
    let mut state_changes = 0;
    let mut outputs = 0;
    let mut user_actions = 0;
    for record in &collection.snapshots {
        match record.kind() {
            RecordKind::Input => inputs += 1,
            RecordKind::StateChange => state_changes += 1,
            RecordKind::Output => outputs += 1,
        }
        if filter.is_user_action(record) {
            user_actions += 1;
        }
    }

    if json {
        let value = serde_json::json!({
            "title": collection.title,
            "recorded_at": collection.recorded_at,
            "records": collection.len(),
            "inputs": inputs,
            "state_changes": state_changes,
            "outputs": outputs,
            "user_actions": user_actions,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Title:         {}", collection.title);
        if let Some(recorded_at) = collection.recorded_at {
            println!("Recorded at:   {}", recorded_at.to_rfc3339());
        }
        println!("Records:       {}", collection.len());
        println!("  input:       {}", inputs);
        println!("  stateChange: {}", state_changes);
        println!("  output:      {}", outputs);
        println!("User actions:  {}", user_actions);
    }

    Ok(())
}

fn read_trace(path: &PathBuf) -> Result<SnapshotCollection> {
    TraceContainer::load(path).with_context(|| format!("Failed to read trace {:?}", path))
}
