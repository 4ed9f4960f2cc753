// ============================================================================
// EXPORT - CSV and plain-text reports written to the export directory
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, SecondsFormat};

use crate::model::Idea;

pub const CSV_HEADERS: [&str; 6] = [
    "Title",
    "Description",
    "Category",
    "Label",
    "Created Date",
    "Shared",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Text => "text",
        }
    }
}

pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("ideas_export_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Header plus one row per idea, every field quoted.
pub fn ideas_to_csv(ideas: &[Idea]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // Header row goes out bare, the rows are fully quoted
    let header = CSV_HEADERS.join(",");

    for idea in ideas {
        let created = idea
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        writer.write_record([
            idea.title.as_str(),
            idea.description.as_str(),
            idea.category.as_deref().unwrap_or(""),
            idea.label.map(|l| l.as_str()).unwrap_or(""),
            created.as_str(),
            yes_no(idea.shared),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e))?;
    let body = String::from_utf8(body)?;

    let mut out = header;
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

/// Markdown-flavoured report, one numbered section per idea.
pub fn ideas_to_text(ideas: &[Idea]) -> String {
    let mut text = String::from("# IDEAS EXPORT\n\n");

    for (index, idea) in ideas.iter().enumerate() {
        let created = idea.created_at.with_timezone(&Local).date_naive();
        text.push_str(&format!("## {}. {}\n\n", index + 1, idea.title));
        text.push_str(&format!(
            "**Category:** {}\n",
            idea.category.as_deref().unwrap_or("None")
        ));
        text.push_str(&format!(
            "**Label:** {}\n",
            idea.label.map(|l| l.as_str()).unwrap_or("None")
        ));
        text.push_str(&format!("**Created:** {}\n", created));
        text.push_str(&format!("**Shared:** {}\n\n", yes_no(idea.shared)));

        if idea.description.trim().is_empty() {
            text.push_str("No description\n\n");
        } else {
            text.push_str(&format!("{}\n\n", idea.description));
        }

        if !idea.comments.is_empty() {
            text.push_str("### Comments\n\n");
            for (n, comment) in idea.comments.iter().enumerate() {
                let when = comment.created_at.with_timezone(&Local).date_naive();
                text.push_str(&format!("{}. **{}** ({}):\n", n + 1, comment.author, when));
                text.push_str(&format!("   {}\n\n", comment.content));
            }
        }

        text.push_str("---\n\n");
    }

    text
}

/// Writes the export into `dir` and returns the file path.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    ideas: &[Idea],
    date: NaiveDate,
) -> Result<PathBuf> {
    let content = match format {
        ExportFormat::Csv => ideas_to_csv(ideas)?,
        ExportFormat::Text => ideas_to_text(ideas),
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(format, date));
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), ideas = ideas.len(), "exported ideas as {}", format.label());
    Ok(path)
}
