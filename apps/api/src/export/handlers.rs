//! Axum route handlers for file exports.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{generate_markdown_report, generate_ranking_xlsx};
use crate::session::SelectionQuery;
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/v1/sessions/:id/export/xlsx
pub async fn handle_export_xlsx(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SelectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(session_id).await?;
    let (_, records) = query.apply(&session);
    let bytes = generate_ranking_xlsx(&records)?;

    info!(%session_id, rows = records.len(), "Spreadsheet exported");
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ranking_cvs.xlsx\"",
            ),
        ],
        bytes,
    ))
}

/// GET /api/v1/sessions/:id/export/report
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SelectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(session_id).await?;
    let (_, records) = query.apply(&session);
    let report = generate_markdown_report(session.descriptor.as_deref(), &records)?;

    info!(%session_id, candidates = records.len(), "Report exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"informe_cvs.md\"",
            ),
        ],
        report,
    ))
}
