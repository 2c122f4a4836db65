//! Ranking spreadsheet.
//!
//! One sheet, header row frozen, rows in the order given. The affinity cell is filled
//! with the category color.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::export::ExportError;
use crate::models::candidate::CandidateRecord;

const SHEET_NAME: &str = "Ranking";
const HEADERS: [&str; 6] = ["#", "Candidato", "Afinidad", "Nota", "Favorito", "Análisis"];
const COLUMN_WIDTHS: [f64; 6] = [5.0, 32.0, 16.0, 8.0, 10.0, 100.0];
// Excel rejects longer cell strings.
const MAX_CELL_CHARS: usize = 32_000;

/// Builds the workbook in memory and returns the `.xlsx` bytes.
pub fn generate_ranking_xlsx(records: &[CandidateRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x37474F))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let analysis_format = cell_format.clone().set_text_wrap();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)?;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        let affinity_format = cell_format
            .clone()
            .set_bold()
            .set_background_color(Color::RGB(record.category.color()));

        worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &cell_format)?;
        worksheet.write_string_with_format(row, 1, &record.file_name, &cell_format)?;
        worksheet.write_string_with_format(row, 2, record.category.label(), &affinity_format)?;
        match record.numeric_score {
            Some(score) => {
                worksheet.write_number_with_format(row, 3, f64::from(score.value()), &cell_format)?;
            }
            None => {
                worksheet.write_blank(row, 3, &cell_format)?;
            }
        }
        let favorite = if record.favorite { "Sí" } else { "" };
        worksheet.write_string_with_format(row, 4, favorite, &cell_format)?;
        worksheet.write_string_with_format(
            row,
            5,
            truncate_chars(&record.analysis_text, MAX_CELL_CHARS),
            &analysis_format,
        )?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
