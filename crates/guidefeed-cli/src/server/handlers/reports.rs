//! Report handlers: DEP feedback, TMA and RCF analyses.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use guidefeed::{parse_request_date, FeedbackService};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query string shared by the report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// `DD/MM/YYYY` or `YYYY-MM-DD`; absent or blank means the default date.
    pub data: Option<String>,
}

impl DateQuery {
    fn date(&self) -> Result<Option<NaiveDate>, ApiError> {
        match self.data.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Ok(Some(parse_request_date(text)?)),
        }
    }
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub texto: String,
}

fn join_error(e: JoinError) -> ApiError {
    if e.is_cancelled() {
        ApiError::Unavailable("report task cancelled".to_string())
    } else {
        ApiError::Internal(format!("report task failed: {}", e))
    }
}

/// Run a report on the blocking pool; sources may do network I/O.
async fn run_report<F>(state: AppState, query: DateQuery, report: F) -> Result<String, ApiError>
where
    F: FnOnce(&FeedbackService, Option<NaiveDate>) -> guidefeed::Result<String> + Send + 'static,
{
    let date = query.date()?;
    let service = state.service.clone();
    let text = tokio::task::spawn_blocking(move || report(&*service, date))
        .await
        .map_err(join_error)??;
    Ok(text)
}

/// DEP operational feedback.
pub async fn get_feedback(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let feedback = run_report(state, query, FeedbackService::dep_feedback).await?;
    Ok(Json(FeedbackResponse { feedback }))
}

/// TMA analysis.
pub async fn get_tma(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<TextResponse>, ApiError> {
    let texto = run_report(state, query, FeedbackService::tma_analysis).await?;
    Ok(Json(TextResponse { texto }))
}

/// RCF analysis.
pub async fn get_rcf(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<TextResponse>, ApiError> {
    let texto = run_report(state, query, FeedbackService::rcf_analysis).await?;
    Ok(Json(TextResponse { texto }))
}
