//! Markdown report: descriptor, summary table, then the full analysis per candidate.

use std::fmt::Write;

use chrono::Utc;

use crate::export::{score_cell, ExportError};
use crate::models::candidate::CandidateRecord;

/// Renders the ranked candidates as a Markdown document.
pub fn generate_markdown_report(
    descriptor: Option<&str>,
    records: &[CandidateRecord],
) -> Result<String, ExportError> {
    let mut out = String::new();

    writeln!(out, "# Informe de análisis de CVs")?;
    writeln!(out)?;
    writeln!(out, "_Generado: {}_", Utc::now().format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out)?;

    if let Some(descriptor) = descriptor {
        writeln!(out, "## Descriptor del cargo")?;
        writeln!(out)?;
        for line in descriptor.lines() {
            writeln!(out, "> {line}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Resumen")?;
    writeln!(out)?;
    if records.is_empty() {
        writeln!(out, "Sin candidatos analizados.")?;
        return Ok(out);
    }

    writeln!(out, "| # | Candidato | Afinidad | Nota | Favorito |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for (idx, record) in records.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            idx + 1,
            escape_cell(&record.file_name),
            record.category,
            score_cell(record.numeric_score),
            if record.favorite { "★" } else { "" }
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Detalle")?;
    for (idx, record) in records.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "### {}. {}", idx + 1, record.file_name)?;
        writeln!(out)?;
        writeln!(out, "**Afinidad:** {}", record.category)?;
        if let Some(score) = record.numeric_score {
            writeln!(out, "**Nota:** {score}/100")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", record.analysis_text.trim())?;
    }

    Ok(out)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
