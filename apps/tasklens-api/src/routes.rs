use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use tasklens_service::{CategoryBrief, DetailLevel, Error as ServiceError, TaskHit};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/tools/get_categories", get(get_categories))
		.route("/tools/get_category_tasks", get(get_category_tasks))
		.route("/tools/search_tasks", get(search_tasks))
		.route("/tools/get_blocked_tasks", get(get_blocked_tasks))
		.route("/tools/get_overdue_tasks", get(get_overdue_tasks))
		.route("/tools/summarize_task", get(summarize_task))
		.route("/tools/get_category_summary", get(get_category_summary))
		.route("/tools/get_provider_updates", get(get_provider_updates))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
	query: String,
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
	category_id: i64,
}

#[derive(Debug, Deserialize)]
struct OverdueParams {
	as_of: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummarizeTaskParams {
	task_id: i64,
	time_window_days: Option<i64>,
	detail_level: Option<DetailLevel>,
}

#[derive(Debug, Deserialize)]
struct SummarizeCategoryParams {
	category_id: i64,
	time_window_days: Option<i64>,
	detail_level: Option<DetailLevel>,
}

#[derive(Debug, Deserialize)]
struct ProviderParams {
	provider_alias: String,
	time_window_days: Option<i64>,
	detail_level: Option<DetailLevel>,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
	summary: String,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryBrief>>, ApiError> {
	let categories = state.service.categories().await?;

	Ok(Json(categories))
}

async fn get_category_tasks(
	State(state): State<AppState>,
	Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<TaskHit>>, ApiError> {
	let tasks = state.service.category_tasks(params.category_id).await?;

	Ok(Json(tasks))
}

async fn search_tasks(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TaskHit>>, ApiError> {
	let hits = state.service.search(&params.query).await?;

	Ok(Json(hits))
}

async fn get_blocked_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskHit>>, ApiError> {
	let hits = state.service.scan_blocked().await?;

	Ok(Json(hits))
}

async fn get_overdue_tasks(
	State(state): State<AppState>,
	Query(params): Query<OverdueParams>,
) -> Result<Json<Vec<TaskHit>>, ApiError> {
	let as_of = match params.as_of.as_deref() {
		Some(raw) => OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
			ApiError(ServiceError::InvalidRequest {
				message: "as_of must be an RFC 3339 timestamp.".to_string(),
			})
		})?,
		None => OffsetDateTime::now_utc(),
	};
	let hits = state.service.scan_overdue(as_of).await?;

	Ok(Json(hits))
}

async fn summarize_task(
	State(state): State<AppState>,
	Query(params): Query<SummarizeTaskParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
	let summary = state
		.service
		.summarize(
			params.task_id,
			params.time_window_days,
			params.detail_level.unwrap_or_default(),
		)
		.await?;

	Ok(Json(SummaryResponse { summary }))
}

async fn get_category_summary(
	State(state): State<AppState>,
	Query(params): Query<SummarizeCategoryParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
	let summary = state
		.service
		.summarize_category(
			params.category_id,
			params.time_window_days,
			params.detail_level.unwrap_or_default(),
		)
		.await?;

	Ok(Json(SummaryResponse { summary }))
}

async fn get_provider_updates(
	State(state): State<AppState>,
	Query(params): Query<ProviderParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
	let summary = state
		.service
		.summarize_provider(
			&params.provider_alias,
			params.time_window_days,
			params.detail_level.unwrap_or_default(),
		)
		.await?;

	Ok(Json(SummaryResponse { summary }))
}

struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		Self(err)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = match &self.0 {
			ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
			ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			ServiceError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
		};
		let body = Json(serde_json::json!({ "error": self.0.to_string() }));

		(status, body).into_response()
	}
}
