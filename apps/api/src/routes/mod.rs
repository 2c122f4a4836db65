pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::affinity::handlers as affinity;
use crate::export::handlers as export;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless extraction
        .route("/api/v1/affinity/extract", post(affinity::handle_extract))
        // Sessions
        .route("/api/v1/sessions", post(screening::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(screening::handle_get_session).delete(screening::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/descriptor",
            put(screening::handle_put_descriptor),
        )
        .route(
            "/api/v1/sessions/:id/descriptor/generate",
            post(screening::handle_generate_descriptor),
        )
        .route(
            "/api/v1/sessions/:id/candidates",
            post(screening::handle_upload_candidates).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/sessions/:id/candidates/:candidate_id/favorite",
            patch(screening::handle_set_favorite),
        )
        .route("/api/v1/sessions/:id/ranking", get(screening::handle_ranking))
        .route("/api/v1/sessions/:id/compare", get(screening::handle_compare))
        // Exports
        .route(
            "/api/v1/sessions/:id/export/xlsx",
            get(export::handle_export_xlsx),
        )
        .route(
            "/api/v1/sessions/:id/export/report",
            get(export::handle_export_report),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::affinity::{Affinity, AffinityScale, AffinityScore};
    use crate::config::Config;
    use crate::llm_client::test_support::ScriptedGenerator;
    use crate::models::candidate::CandidateRecord;
    use crate::screening::pdf::SAMPLE_CV_PDF;
    use crate::session::SessionStore;

    fn test_state(replies: Vec<&str>) -> AppState {
        AppState {
            llm: Arc::new(ScriptedGenerator::new(replies)),
            sessions: SessionStore::new(),
            config: Config {
                openai_api_key: "test".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                default_scale: AffinityScale::Numeric,
                max_upload_bytes: 1024 * 1024,
            },
        }
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn seeded_session(state: &AppState, analyses: &[(&str, &str)]) -> Uuid {
        let session = state.sessions.create(AffinityScale::Numeric).await;
        state
            .sessions
            .set_descriptor(session.id, "Analista de datos".to_string())
            .await
            .unwrap();
        let records = analyses
            .iter()
            .map(|(name, text)| {
                CandidateRecord::new(*name, text.to_string(), Affinity::assess(text, AffinityScale::Numeric))
            })
            .collect();
        state.sessions.append_candidates(session.id, records).await.unwrap();
        session.id
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(build_router(test_state(vec![])), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_extract_endpoint() {
        let router = build_router(test_state(vec![]));
        let (status, body) = send(
            router,
            Method::POST,
            "/api/v1/affinity/extract",
            Some(json!({"text": "Nota de afinidad: 150"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_of(&body);
        assert_eq!(body["category"], "VeryHigh");
        assert_eq!(body["label"], "Muy Alta");
        assert_eq!(body["numeric_score"], 100);
        assert_eq!(body["color"], "#1B5E20");
    }

    #[tokio::test]
    async fn test_extract_endpoint_without_signal() {
        let router = build_router(test_state(vec![]));
        let (status, body) = send(
            router,
            Method::POST,
            "/api/v1/affinity/extract",
            Some(json!({"text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_of(&body);
        assert_eq!(body["category"], "Unclassified");
        assert!(body["numeric_score"].is_null());
        assert_eq!(body["score_or_zero"], 0);
    }

    #[tokio::test]
    async fn test_create_session_uses_requested_scale() {
        let router = build_router(test_state(vec![]));
        let (status, body) = send(
            router,
            Method::POST,
            "/api/v1/sessions",
            Some(json!({"scale": "categorical"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json_of(&body)["scale"], "categorical");
    }

    #[tokio::test]
    async fn test_create_session_without_body_uses_default_scale() {
        let router = build_router(test_state(vec![]));
        let (status, body) = send(router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json_of(&body)["scale"], "numeric");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let router = build_router(test_state(vec![]));
        let uri = format!("/api/v1/sessions/{}/ranking", Uuid::new_v4());
        let (status, body) = send(router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_of(&body)["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_put_descriptor_rejects_blank() {
        let state = test_state(vec![]);
        let session = state.sessions.create(AffinityScale::Numeric).await;
        let uri = format!("/api/v1/sessions/{}/descriptor", session.id);
        let (status, _) = send(
            build_router(state),
            Method::PUT,
            &uri,
            Some(json!({"descriptor": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_descriptor_stores_result() {
        let state = test_state(vec!["Descriptor: Analista de datos senior."]);
        let session = state.sessions.create(AffinityScale::Numeric).await;
        let uri = format!("/api/v1/sessions/{}/descriptor/generate", session.id);
        let (status, body) = send(
            build_router(state.clone()),
            Method::POST,
            &uri,
            Some(json!({"role": "Analista de datos", "skills": "SQL", "profile": "Proactivo"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["descriptor"], "Descriptor: Analista de datos senior.");

        let stored = state.sessions.get(session.id).await.unwrap();
        assert_eq!(stored.descriptor.as_deref(), Some("Descriptor: Analista de datos senior."));
    }

    #[tokio::test]
    async fn test_ranking_orders_by_score_and_reports_distribution() {
        let state = test_state(vec![]);
        let session_id = seeded_session(
            &state,
            &[
                ("bajo.pdf", "Nota de afinidad con el cargo (de 1 a 100): 42"),
                ("alto.pdf", "Nota de afinidad con el cargo (de 1 a 100): 93"),
                ("nada.pdf", "Sin información"),
            ],
        )
        .await;

        let uri = format!("/api/v1/sessions/{session_id}/ranking");
        let (status, body) = send(build_router(state), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let body = json_of(&body);
        assert_eq!(body["ranked_by"], "score");
        let names: Vec<&str> = body["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["file_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["alto.pdf", "bajo.pdf", "nada.pdf"]);
        assert_eq!(body["distribution"][0]["category"], "VeryHigh");
        assert_eq!(body["distribution"][0]["count"], 1);
    }

    #[tokio::test]
    async fn test_favorite_then_filtered_ranking() {
        let state = test_state(vec![]);
        let session_id = seeded_session(
            &state,
            &[("a.pdf", "Nota de afinidad: 70"), ("b.pdf", "Nota de afinidad: 60")],
        )
        .await;
        let target = state.sessions.get(session_id).await.unwrap().candidates[1].candidate_id;

        let uri = format!("/api/v1/sessions/{session_id}/candidates/{target}/favorite");
        let (status, body) = send(
            build_router(state.clone()),
            Method::PATCH,
            &uri,
            Some(json!({"favorite": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["favorite"], true);

        let uri = format!("/api/v1/sessions/{session_id}/ranking?favorites_only=true");
        let (_, body) = send(build_router(state), Method::GET, &uri, None).await;
        let body = json_of(&body);
        assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
        assert_eq!(body["candidates"][0]["file_name"], "b.pdf");
    }

    #[tokio::test]
    async fn test_compare_names_stronger_candidate() {
        let state = test_state(vec![]);
        let session_id = seeded_session(
            &state,
            &[("a.pdf", "Nota de afinidad: 55"), ("b.pdf", "Nota de afinidad: 91")],
        )
        .await;
        let session = state.sessions.get(session_id).await.unwrap();
        let (left, right) = (session.candidates[0].candidate_id, session.candidates[1].candidate_id);

        let uri = format!("/api/v1/sessions/{session_id}/compare?left={left}&right={right}");
        let (status, body) = send(build_router(state), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["stronger"], right.to_string());
    }

    #[tokio::test]
    async fn test_exports() {
        let state = test_state(vec![]);
        let session_id = seeded_session(&state, &[("a.pdf", "Nota de afinidad: 80")]).await;

        let uri = format!("/api/v1/sessions/{session_id}/export/xlsx");
        let (status, body) = send(build_router(state.clone()), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(b"PK"));

        let uri = format!("/api/v1/sessions/{session_id}/export/report");
        let (status, body) = send(build_router(state), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let report = String::from_utf8(body).unwrap();
        assert!(report.contains("| 1 | a.pdf | Alta | 80 |  |"));
    }

    #[tokio::test]
    async fn test_upload_requires_descriptor() {
        let state = test_state(vec![]);
        let session = state.sessions.create(AffinityScale::Numeric).await;
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{}/candidates", session.id))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_reports_unreadable_and_non_pdf_files() {
        let state = test_state(vec![]);
        let session_id = seeded_session(&state, &[]).await;
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"notas.txt\"\r\nContent-Type: text/plain\r\n\r\nhola\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"roto.pdf\"\r\nContent-Type: application/pdf\r\n\r\nnot really a pdf\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{session_id}/candidates"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = json_of(&bytes);
        assert_eq!(body["analyzed"].as_array().unwrap().len(), 0);
        let failed = body["failed"].as_array().unwrap();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0]["file_name"], "notas.txt");
        assert_eq!(failed[1]["file_name"], "roto.pdf");

        assert!(state.sessions.get(session_id).await.unwrap().candidates.is_empty());
    }

    #[tokio::test]
    async fn test_upload_analyzes_pdf_and_stores_candidate() {
        let state = test_state(vec![
            "Fortalezas: Python y SQL\nNota de afinidad con el cargo (de 1 a 100): 85",
        ]);
        let session_id = seeded_session(&state, &[]).await;
        let boundary = "XBOUNDARY";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"ana.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(SAMPLE_CV_PDF);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{session_id}/candidates"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = json_of(&bytes);
        let analyzed = body["analyzed"].as_array().unwrap();
        assert_eq!(analyzed.len(), 1);
        assert!(body["failed"].as_array().unwrap().is_empty());
        assert_eq!(analyzed[0]["file_name"], "ana.pdf");
        assert_eq!(analyzed[0]["numeric_score"], 85);
        assert_eq!(analyzed[0]["category"], "High");

        let session = state.sessions.get(session_id).await.unwrap();
        assert_eq!(session.candidates.len(), 1);
        assert_eq!(session.candidates[0].file_name, "ana.pdf");
        assert_eq!(session.candidates[0].numeric_score, Some(AffinityScore::from(85)));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let state = test_state(vec![]);
        let session = state.sessions.create(AffinityScale::Numeric).await;
        let uri = format!("/api/v1/sessions/{}", session.id);
        let (status, _) = send(build_router(state.clone()), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(build_router(state), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
