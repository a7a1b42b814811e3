//! Axum application setup.

use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// CORS for the given origins; any origin when the list is empty.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any))
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/feedback", get(handlers::get_feedback))
        .route("/tma", get(handlers::get_tma))
        .route("/rcf", get(handlers::get_rcf))
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    addr: SocketAddr,
    allow_origins: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, cors_layer(&allow_origins)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown requested");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Local;
    use guidefeed::{
        default_report_date, format_report_date, CacheConfig, DataTable, FeedbackConfig, FeedbackService,
        StaticSource, TableCache,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let dep = DataTable::from_rows(
            ["FLIGTH ATD", "VOO", "DESTINO", "TURNO", "DETALHE DESVIO", "OBSERVAÇÕES"],
            [["10/11/2025 22:15", "G3100", "GIG", "TARDE", "ERRO DE MANIFESTO", "INC1"]],
        );
        let tma = DataTable::from_rows(
            ["INICIO", "TURNO", "DETALHE DESVIO"],
            [["10/11/2025 14:00", "TARDE", "ATRASO NO VOO"]],
        );
        let source = StaticSource::new().with_sheet("DEP", dep).with_sheet("TMA", tma);
        let cache = TableCache::new(Arc::new(source), CacheConfig::default());
        let state = AppState::new(FeedbackService::new(cache, FeedbackConfig::default()));
        create_router(state, cors_layer(&[]).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mensagem"], "API operando com sucesso!");
    }

    #[tokio::test]
    async fn test_feedback_with_date() {
        let (status, body) = get_json("/feedback?data=10/11/2025").await;
        assert_eq!(status, StatusCode::OK);
        let text = body["feedback"].as_str().unwrap();
        assert!(text.starts_with("📌 *Feedback Operacional {*DEP*} – 10/11/2025*"));
        assert!(text.contains("G3100"));
    }

    #[tokio::test]
    async fn test_blank_date_uses_default() {
        let expected = format!(
            "📌 *Feedback Operacional {{*DEP*}} – {}*",
            format_report_date(default_report_date(Local::now().date_naive(), 3))
        );
        for uri in ["/feedback", "/feedback?data=", "/feedback?data=%20"] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert!(body["feedback"].as_str().unwrap().starts_with(&expected), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_iso_date_is_accepted() {
        let (status, body) = get_json("/tma?data=2025-11-10").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["texto"].as_str().unwrap().contains("Atraso No Voo — 1"));
    }

    #[tokio::test]
    async fn test_invalid_date_is_400() {
        let (status, body) = get_json("/feedback?data=31-31-2025").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_date");
    }

    #[tokio::test]
    async fn test_missing_sheet_is_503() {
        let (status, _) = get_json("/rcf?data=10/11/2025").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_cors_rejects_bad_origin() {
        assert!(cors_layer(&["http://ok.example".to_string()]).is_ok());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
