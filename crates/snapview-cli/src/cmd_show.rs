use anyhow::{Context, Result, bail};
use snapview::{SnapshotCollection, StepNavigator, compute_rows};
use snapview_io::TraceContainer;
use std::path::PathBuf;

pub fn run(input: PathBuf, step: usize, diff: bool) -> Result<()> {
    let collection = read_trace(&input)?;
    let mut nav = StepNavigator::new(collection).context("trace has no records")?;

    if !nav.jump_to(step).moved() {
        bail!("step {} is out of range (1..={})", step, nav.step_count());
    }

    println!(
        "Step {}/{} — {}",
        nav.step_number(),
        nav.step_count(),
        nav.current().kind()
    );
    if let Some(action) = nav.input_action() {
        let marker = if nav.is_user_action() { " (user)" } else { "" };
        println!("Action: {}{}", action, marker);
    }
    if let Some(effect) = nav.output_effect() {
        println!("Effect: {}", effect);
    }
    if nav.nested_level() > 0 {
        println!("Nested: {}", nav.nested_level());
    }

    let previous = if diff { nav.previous_state() } else { None };
    let rows = compute_rows(nav.current_state(), previous);
    println!();
    for row in &rows {
        if let Some((old, new)) = row.change() {
            println!("* {} = {} (was {})", row.name, new, old);
        } else {
            println!("  {} = {}", row.name, row.value.latest());
        }
    }

    Ok(())
}

fn read_trace(path: &PathBuf) -> Result<SnapshotCollection> {
    TraceContainer::load(path).with_context(|| format!("Failed to read trace {:?}", path))
}
