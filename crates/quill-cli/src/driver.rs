//! Per-file resolution driver: read event streams, resolve each unit in
//! parallel, and render diagnostics or JSON annotations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use tracing::debug;

use quill_binder::{CompatMode, ResolvedUnit, ResolverState, ScopeEvent};
use quill_common::DiagnosticCategory;

use crate::args::CliArgs;

/// Resolve one event-stream file as a single compilation unit.
pub fn resolve_file(path: &Path, mode: CompatMode) -> Result<ResolvedUnit> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events: Vec<ScopeEvent> = serde_json::from_str(&text)
        .with_context(|| format!("{}: malformed event stream", path.display()))?;
    let mut state = ResolverState::from_events(path.display().to_string(), &events, mode)
        .with_context(|| format!("{}: invalid scope nesting", path.display()))?;
    Ok(state.resolve_unit())
}

/// Run the full CLI: resolve every file, print output, return the exit code.
///
/// Units are independent compilation units, so they resolve in parallel with
/// one resolver instance each.
pub fn run(args: &CliArgs) -> Result<i32> {
    let mode = CompatMode::from(args.compat);
    debug!(files = args.files.len(), ?mode, "resolving units");

    let units: Vec<ResolvedUnit> = args
        .files
        .par_iter()
        .map(|path| resolve_file(path, mode))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&units)?);
    }

    let mut errors = 0usize;
    let mut warnings = 0usize;
    for unit in &units {
        for diag in &unit.diagnostics {
            let severity = match diag.category {
                DiagnosticCategory::Error => {
                    errors += 1;
                    "error".red().bold()
                }
                DiagnosticCategory::Warning => {
                    warnings += 1;
                    "warning".yellow().bold()
                }
                _ => "info".normal(),
            };
            if !args.quiet && !args.json {
                println!(
                    "{}:{} - {} {}: {}",
                    diag.file.cyan(),
                    diag.start,
                    severity,
                    format!("QB{}", diag.code).dimmed(),
                    diag.message_text
                );
            }
        }
    }

    if !args.json {
        let summary = format!(
            "Found {errors} error{} and {warnings} warning{}.",
            if errors == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        );
        println!("{summary}");
    }

    Ok(if errors > 0 { 1 } else { 0 })
}
