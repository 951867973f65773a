use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use footage_report::parser::normalize_category;
use footage_report::session::split_into_chunks;
use footage_report::{AnalysisSession, DisplayOptions, RenderModel, format_render_model};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{OutputFormat, ParseArgs};
use crate::util::{now_utc_string, sha256_text, write_json_pretty};

const REPORT_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
struct ReportCounts {
    metadata_fields: usize,
    events: usize,
    categories: usize,
    declared_categories: usize,
    summary_chars: usize,
    reparse_count: usize,
}

#[derive(Debug, Clone, Serialize)]
struct ReportManifest {
    manifest_version: u32,
    generated_at: String,
    source: String,
    source_sha256: String,
    source_chars: usize,
    counts: ReportCounts,
    report: RenderModel,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    info!(
        source = %args.input.display(),
        chars = raw.chars().count(),
        format = args.format.as_str(),
        "read analysis text"
    );

    let mut session = AnalysisSession::new();
    match args.chunk_size {
        Some(size) => {
            for (index, chunk) in split_into_chunks(&raw, size).into_iter().enumerate() {
                let parsed = session.push_chunk(chunk);
                debug!(
                    chunk = index + 1,
                    events = parsed.events.len(),
                    metadata_fields = parsed.metadata.len(),
                    "applied chunk"
                );
            }
        }
        None => {
            session.push_chunk(&raw);
        }
    }

    let options = display_options(&args);
    let model = session.render(&options);
    let parsed = session.latest();

    info!(
        metadata_fields = parsed.metadata.len(),
        events = parsed.events.len(),
        groups = model.groups.len(),
        reparse_count = session.reparse_count(),
        "analysis parsed"
    );

    match args.format {
        OutputFormat::Text => write_text_report(&model)?,
        OutputFormat::Json => write_json_report(&model)?,
    }

    if let Some(path) = &args.output {
        let manifest = ReportManifest {
            manifest_version: REPORT_MANIFEST_VERSION,
            generated_at: now_utc_string(),
            source: args.input.display().to_string(),
            source_sha256: sha256_text(&raw),
            source_chars: raw.chars().count(),
            counts: ReportCounts {
                metadata_fields: parsed.metadata.len(),
                events: parsed.events.len(),
                categories: parsed.category_counts.len(),
                declared_categories: parsed.declared_counts.len(),
                summary_chars: parsed.summary.chars().count(),
                reparse_count: session.reparse_count(),
            },
            report: model,
        };
        write_json_pretty(path, &manifest)?;
        info!(path = %path.display(), "wrote report manifest");
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read analysis text from stdin")?;
        return Ok(raw);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn display_options(args: &ParseArgs) -> DisplayOptions {
    DisplayOptions {
        show_metadata: !args.hide_metadata,
        show_timestamps: !args.hide_timestamps,
        show_summary: !args.hide_summary,
        categories: args
            .categories
            .iter()
            .map(|value| normalize_category(value))
            .collect(),
        complete_ranges: args.complete_ranges,
        show_empty_expected: args.show_empty,
    }
}

fn write_text_report(model: &RenderModel) -> Result<()> {
    let mut output = BufWriter::new(io::stdout().lock());
    output
        .write_all(format_render_model(model).as_bytes())
        .context("failed to write text report")?;
    output.flush()?;
    Ok(())
}

fn write_json_report(model: &RenderModel) -> Result<()> {
    let mut output = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, model).context("failed to serialize json report")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
