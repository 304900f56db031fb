//! Record command - build the output snapshot to persist after a task ran

use super::{load_previous, task_label};
use crate::cli::args::RecordArgs;
use crate::error::OutguardResult;
use crate::outputs::{build_task_outputs, OutputSnapshot};
use crate::snapshot::{PropertySnapshots, TaskSnapshots};
use crate::ui::{self, UiContext};
use std::collections::BTreeMap;

/// Execute the record command
pub fn execute(args: RecordArgs) -> OutguardResult<()> {
    let previous = load_previous(args.previous.as_deref())?;
    let before = TaskSnapshots::load(&args.before)?;
    let after = TaskSnapshots::load(&args.after)?;

    let outputs = build_task_outputs(
        previous.as_ref().map(|doc| &doc.properties),
        &before.properties,
        &after.properties,
    );

    let recorded: PropertySnapshots = outputs
        .iter()
        .map(|(property, output)| (property.clone(), output.snapshot.clone()))
        .collect();
    let document = TaskSnapshots::new(after.task.clone(), recorded);

    match args.output {
        Some(path) => {
            document.save(&path)?;
            let ctx = UiContext::detect();
            print_summary(&ctx, task_label(&[&after, &before]), &outputs);
            ui::outro_success(&ctx, &format!("Recorded outputs to {}", path.display()));
        }
        // The document itself is the only thing written to stdout
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }

    Ok(())
}

fn print_summary(ctx: &UiContext, task: &str, outputs: &BTreeMap<String, OutputSnapshot>) {
    ui::intro(ctx, &format!("Recorded outputs for {}", task));

    for (property, output) in outputs {
        if output.filtered {
            ui::step_warn(
                ctx,
                &format!(
                    "{}: {} outputs, {} foreign entries excluded",
                    property,
                    output.snapshot.len(),
                    output.excluded.len()
                ),
            );
        } else {
            ui::step_ok(
                ctx,
                &format!("{}: {} outputs", property, output.snapshot.len()),
            );
        }
    }
}
