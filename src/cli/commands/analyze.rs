//! Analyze command - overlap detection and output assembly for one execution

use super::{load_previous, task_label};
use crate::cli::args::{AnalyzeArgs, OutputFormat};
use crate::config::Config;
use crate::error::{OutguardError, OutguardResult};
use crate::outputs::{
    analyze_execution_with, AnalysisOptions, ExecutionAnalysis, OverlappingOutputs,
};
use crate::snapshot::TaskSnapshots;
use crate::ui::{self, UiContext};
use serde::Serialize;
use std::collections::BTreeMap;

/// Machine-readable analysis report
#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    task: Option<&'a str>,
    cacheable: bool,
    caching_disabled_reason: Option<String>,
    overlapping: Option<&'a OverlappingOutputs>,
    properties: BTreeMap<&'a str, PropertyReport<'a>>,
}

#[derive(Debug, Serialize)]
struct PropertyReport<'a> {
    outputs: usize,
    filtered: bool,
    excluded: &'a [String],
    fingerprint: Option<&'a str>,
}

impl<'a> AnalysisReport<'a> {
    fn new(task: Option<&'a str>, analysis: &'a ExecutionAnalysis) -> Self {
        let properties = analysis
            .outputs
            .iter()
            .map(|(property, output)| {
                let report = PropertyReport {
                    outputs: output.snapshot.len(),
                    filtered: output.filtered,
                    excluded: &output.excluded,
                    fingerprint: output.snapshot.fingerprint(),
                };
                (property.as_str(), report)
            })
            .collect();

        Self {
            task,
            cacheable: analysis.is_cacheable(),
            caching_disabled_reason: analysis.caching_disabled_reason(),
            overlapping: analysis.overlapping.as_ref(),
            properties,
        }
    }
}

/// Execute the analyze command
pub fn execute(args: AnalyzeArgs, config: &Config) -> OutguardResult<()> {
    let format = OutputFormat::resolve(args.format, config)?;
    let previous = load_previous(args.previous.as_deref())?;
    let before = TaskSnapshots::load(&args.before)?;
    let after = TaskSnapshots::load(&args.after)?;

    let options = AnalysisOptions {
        detect_overlaps: config.detection.enabled,
    };
    let analysis = analyze_execution_with(
        previous.as_ref().map(|doc| &doc.properties),
        &before.properties,
        &after.properties,
        options,
    );

    if let Some(path) = &args.output {
        TaskSnapshots::new(after.task.clone(), analysis.recorded_outputs()).save(path)?;
    }

    match format {
        OutputFormat::Json => {
            let task = after.task.as_deref().or(before.task.as_deref());
            let report = AnalysisReport::new(task, &analysis);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_text(task_label(&[&after, &before]), &analysis, &args),
    }

    match analysis.overlapping {
        Some(overlap) if args.strict => Err(OutguardError::OverlapDetected {
            property: overlap.property_name,
            path: overlap.path,
        }),
        _ => Ok(()),
    }
}

fn print_text(task: &str, analysis: &ExecutionAnalysis, args: &AnalyzeArgs) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("Output analysis for {}", task));

    match &analysis.overlapping {
        Some(overlap) => ui::step_warn_hint(
            &ctx,
            &format!("Overlapping outputs: {}", overlap),
            "output caching disabled",
        ),
        None => ui::step_ok(&ctx, "No overlapping outputs"),
    }

    for (property, output) in &analysis.outputs {
        ui::section(&ctx, property);
        ui::key_value(&ctx, "outputs", &output.snapshot.len().to_string());

        if output.filtered {
            ui::step_warn(
                &ctx,
                &format!("{} foreign entries excluded", output.excluded.len()),
            );
            for path in &output.excluded {
                ui::remark(&ctx, path);
            }
        } else if let Some(fingerprint) = output.snapshot.fingerprint() {
            ui::key_value(&ctx, "fingerprint", fingerprint);
        }
    }

    if let Some(path) = &args.output {
        ui::step_ok_detail(&ctx, "Recorded outputs", &path.display().to_string());
    }

    match analysis.caching_disabled_reason() {
        Some(reason) => ui::outro_warn(&ctx, &reason),
        None => ui::outro_success(&ctx, "Outputs are cacheable"),
    }
}
