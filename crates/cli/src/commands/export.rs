use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::Local;

use lapis_export::{QuoteDocument, render_csv, render_html};
use lapis_infra::RecordStore;

use crate::cli::ExportArgs;
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Render the working draft, or a saved quote's snapshot, and write it out.
pub fn run(ctx: &Context, format: ExportFormat, args: ExportArgs) -> Result<()> {
    let (draft, totals, line_items) = match &args.quote {
        Some(id) => {
            let quote = ctx
                .quotes
                .get(id)?
                .with_context(|| format!("quote {id} not found"))?;
            (quote.draft(), quote.totals(), quote.line_items_snapshot)
        }
        None => {
            let session = ctx.session()?;
            let (totals, items) = ctx.price(&session.draft)?;
            (session.draft, totals, items)
        }
    };

    let issued = Local::now().date_naive();
    let doc = QuoteDocument {
        line_items: &line_items,
        brief: &draft.brief,
        production_vars: &draft.production_vars,
        totals,
        issued,
    };
    let bytes = match format {
        ExportFormat::Html => render_html(&doc)?,
        ExportFormat::Csv => render_csv(&doc),
    };

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "lapis_quote_{}.{}",
            issued.format("%Y%m%d"),
            format.extension()
        ))
    });
    write_output(&output, &bytes)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path == Path::new("-") {
        std::io::stdout()
            .write_all(bytes)
            .context("failed to write to stdout")?;
        return Ok(());
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export written");
    println!("Wrote {}", path.display());
    Ok(())
}
