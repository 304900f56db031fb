//! Detect command - check for overlapping outputs before a task runs

use super::{load_previous, task_label};
use crate::cli::args::{DetectArgs, OutputFormat};
use crate::config::Config;
use crate::error::{OutguardError, OutguardResult};
use crate::outputs::{detect_task_overlap, OverlappingOutputs};
use crate::snapshot::TaskSnapshots;
use crate::ui::{self, UiContext};

/// Execute the detect command
pub fn execute(args: DetectArgs, config: &Config) -> OutguardResult<()> {
    let format = OutputFormat::resolve(args.format, config)?;
    let previous = load_previous(args.previous.as_deref())?;
    let before = TaskSnapshots::load(&args.before)?;

    let overlap = if config.detection.enabled {
        detect_task_overlap(
            previous.as_ref().map(|doc| &doc.properties),
            &before.properties,
        )
    } else {
        None
    };

    match format {
        OutputFormat::Json => print_json(overlap.as_ref())?,
        OutputFormat::Text => print_text(
            task_label(&[&before]),
            overlap.as_ref(),
            config.detection.enabled,
        ),
    }

    match overlap {
        Some(overlap) if args.strict => Err(OutguardError::OverlapDetected {
            property: overlap.property_name,
            path: overlap.path,
        }),
        _ => Ok(()),
    }
}

fn print_json(overlap: Option<&OverlappingOutputs>) -> OutguardResult<()> {
    let report = serde_json::json!({
        "overlapping": overlap,
        "cacheable": overlap.is_none(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(task: &str, overlap: Option<&OverlappingOutputs>, enabled: bool) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("Overlap check for {}", task));

    if !enabled {
        ui::step_info(&ctx, "Overlap detection disabled in configuration");
        return;
    }

    match overlap {
        Some(overlap) => {
            ui::step_warn_hint(
                &ctx,
                &format!("Overlapping outputs: {}", overlap),
                "output caching disabled",
            );
            ui::remark(&ctx, &overlap.caching_disabled_reason());
        }
        None => ui::step_ok(&ctx, "No overlapping outputs"),
    }
}
