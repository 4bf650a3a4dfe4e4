use anyhow::{Context, Result, bail};
use snapview::{DiffSpan, SnapshotCollection, SpanKind, StepNavigator, diff_strings};
use snapview_io::TraceContainer;
use std::path::PathBuf;

pub fn run(input: PathBuf, step: usize, property: String) -> Result<()> {
    let collection = read_trace(&input)?;
    let mut nav = StepNavigator::new(collection).context("trace has no records")?;

    if !nav.jump_to(step).moved() {
        bail!("step {} is out of range (1..={})", step, nav.step_count());
    }
    let Some(previous) = nav.previous_state() else {
        bail!("step 1 has no previous step to diff against");
    };

    let old = lookup(previous, &property)
        .with_context(|| format!("property {:?} not found in step {}", property, step - 1))?;
    let new = lookup(nav.current_state(), &property)
        .with_context(|| format!("property {:?} not found in step {}", property, step))?;

    if old == new {
        println!("{}: no change", property);
        return Ok(());
    }

    let diff = diff_strings(old, new);
    println!("- {}", render_side(&diff.left));
    println!("+ {}", render_side(&diff.right));

    Ok(())
}

fn lookup<'a>(state: &'a [snapview::PropertyPair], name: &str) -> Option<&'a str> {
    state
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.value.as_str())
}

/// Inline marker rendering: removed runs as `[-…-]`, inserted as `{+…+}`.
fn render_side(spans: &[DiffSpan]) -> String {
    spans
        .iter()
        .map(|span| match span.kind {
            SpanKind::Same => span.text.clone(),
            SpanKind::Removed => format!("[-{}-]", span.text),
            SpanKind::Inserted => format!("{{+{}+}}", span.text),
        })
        .collect()
}

fn read_trace(path: &PathBuf) -> Result<SnapshotCollection> {
    TraceContainer::load(path).with_context(|| format!("Failed to read trace {:?}", path))
}
