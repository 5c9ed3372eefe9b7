use std::sync::Arc;

use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

use tasklens_config::{Config, Ranking, Search, Service, Summary, UpstreamConfig};
use tasklens_domain::{RawBatch, RawCategory, RawTask, RawUpdate, TaskStatus};
use tasklens_service::{BoxFuture, DetailLevel, Error, TasklensService, UpstreamProvider};

struct StubProvider {
	batch: RawBatch,
}

impl UpstreamProvider for StubProvider {
	fn fetch_batch<'a>(
		&'a self,
		_cfg: &'a UpstreamConfig,
	) -> BoxFuture<'a, color_eyre::Result<RawBatch>> {
		let batch = self.batch.clone();

		Box::pin(async move { Ok(batch) })
	}
}

struct FailingProvider;

impl UpstreamProvider for FailingProvider {
	fn fetch_batch<'a>(
		&'a self,
		_cfg: &'a UpstreamConfig,
	) -> BoxFuture<'a, color_eyre::Result<RawBatch>> {
		Box::pin(async { Err(color_eyre::eyre::eyre!("connection refused")) })
	}
}

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		upstream: UpstreamConfig {
			api_base: "http://localhost".to_string(),
			api_key: String::new(),
			categories_path: "/GetAllCategories".to_string(),
			tasks_path: "/GetCategoryTasks".to_string(),
			updates_path: "/GetTaskFollowUpHistory".to_string(),
			timeout_ms: 1_000,
			default_headers: Default::default(),
		},
		search: Search::default(),
		ranking: Ranking::default(),
		summary: Summary::default(),
	}
}

fn service_with(batch: RawBatch) -> TasklensService {
	TasklensService::with_provider(test_config(), Arc::new(StubProvider { batch }))
}

fn category(id: i64, name: &str) -> RawCategory {
	RawCategory { id: Some(id), name: Some(name.to_string()) }
}

fn task(id: i64, category_id: i64, title: &str, status_code: &str) -> RawTask {
	RawTask {
		id: Some(id),
		category_id: Some(category_id),
		title: Some(title.to_string()),
		provider_alias: None,
		status_code: Some(status_code.to_string()),
		deadline: None,
	}
}

fn update(task_id: i64, at: OffsetDateTime, note: &str) -> RawUpdate {
	RawUpdate {
		task_id: Some(task_id),
		timestamp: Some(at.format(&Rfc3339).expect("Timestamp must format.")),
		note: Some(note.to_string()),
		status_code: None,
	}
}

fn sample_batch() -> RawBatch {
	let now = OffsetDateTime::now_utc();
	let mut acme_roster = task(10, 1, "Acme roster reconciliation", "Blocked");
	let mut acme_claims = task(11, 2, "Acme claims audit", "In Progress");
	let mut overdue = task(12, 1, "Renew state license", "Open");

	acme_roster.provider_alias = Some("Acme Corp ".to_string());
	acme_claims.provider_alias = Some("acme corp".to_string());
	overdue.deadline =
		Some((now - Duration::days(3)).format(&Rfc3339).expect("Deadline must format."));

	RawBatch {
		categories: vec![category(1, "Credentialing"), category(2, "Claims")],
		tasks: vec![acme_roster, acme_claims, overdue],
		updates: vec![
			update(10, now - Duration::days(30), "waiting on vendor"),
			update(10, now - Duration::days(5), "vendor responded, fix in progress"),
			update(10, now - Duration::days(1), "fix deployed, verifying"),
		],
	}
}

#[tokio::test]
async fn alias_search_spans_categories_despite_ragged_alias_spelling() {
	let service = service_with(sample_batch());
	let hits = service.search("Acme Corp").await.expect("Search must succeed.");
	let ids: Vec<i64> = hits.iter().map(|hit| hit.task_id).collect();

	assert_eq!(ids, vec![10, 11]);
	assert_eq!(hits[0].category_name, "Credentialing");
	assert_eq!(hits[1].category_name, "Claims");
}

#[tokio::test]
async fn empty_search_is_a_valid_empty_success() {
	let service = service_with(sample_batch());

	assert!(service.search("").await.expect("Search must succeed.").is_empty());
	assert!(service.search("zebra").await.expect("Search must succeed.").is_empty());
}

#[tokio::test]
async fn blocked_scan_flags_exactly_the_blocked_tasks() {
	let service = service_with(sample_batch());
	let hits = service.scan_blocked().await.expect("Scan must succeed.");

	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].task_id, 10);
	assert_eq!(hits[0].status, TaskStatus::Blocked);
}

#[tokio::test]
async fn overdue_scan_respects_the_as_of_instant() {
	let service = service_with(sample_batch());
	let now = OffsetDateTime::now_utc();
	let hits = service.scan_overdue(now).await.expect("Scan must succeed.");

	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].task_id, 12);

	let none = service
		.scan_overdue(now - Duration::days(10))
		.await
		.expect("Scan must succeed.");

	assert!(none.is_empty());
}

#[tokio::test]
async fn summarize_windows_out_stale_updates() {
	let service = service_with(sample_batch());
	let narrative = service
		.summarize(10, Some(7), DetailLevel::Detailed)
		.await
		.expect("Summarize must succeed.");

	assert!(narrative.contains("currently blocked"));
	assert!(narrative.contains("fix deployed"));
	assert!(!narrative.contains("waiting on vendor"));
}

#[tokio::test]
async fn summarize_short_without_history_names_the_gap() {
	let service = service_with(sample_batch());
	let narrative = service
		.summarize(12, None, DetailLevel::Short)
		.await
		.expect("Summarize must succeed.");

	assert!(narrative.contains("currently open"));
	assert!(narrative.contains("No update history available."));
}

#[tokio::test]
async fn summarize_unknown_task_is_not_found() {
	let service = service_with(sample_batch());
	let err = service.summarize(999, None, DetailLevel::Short).await.unwrap_err();

	assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn summarize_category_renders_a_ranked_digest() {
	let service = service_with(sample_batch());
	let narrative = service
		.summarize_category(1, None, DetailLevel::Detailed)
		.await
		.expect("Summarize must succeed.");

	assert!(narrative.contains("Credentialing covers 2 tasks"));
	assert!(narrative.contains("need attention"));

	let err = service.summarize_category(42, None, DetailLevel::Short).await.unwrap_err();

	assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn summarize_provider_digests_the_alias_group() {
	let service = service_with(sample_batch());
	let narrative = service
		.summarize_provider("Acme Corp", None, DetailLevel::Detailed)
		.await
		.expect("Summarize must succeed.");

	assert!(narrative.starts_with("Acme Corp has 2 tasks on file; 1 need attention."));
	assert!(narrative.contains("Acme roster reconciliation"));
	assert!(narrative.contains("Acme claims audit"));
}

#[tokio::test]
async fn summarize_provider_without_tasks_is_a_prose_success() {
	let service = service_with(sample_batch());
	let narrative = service
		.summarize_provider("Globex", None, DetailLevel::Short)
		.await
		.expect("Summarize must succeed.");

	assert_eq!(narrative, "No tasks found for provider \"Globex\".");
}

#[tokio::test]
async fn category_listing_and_membership_come_from_the_batch() {
	let service = service_with(sample_batch());
	let categories = service.categories().await.expect("Listing must succeed.");

	assert_eq!(categories.len(), 2);
	assert_eq!(categories[0].name, "Credentialing");

	let tasks = service.category_tasks(1).await.expect("Listing must succeed.");
	let ids: Vec<i64> = tasks.iter().map(|hit| hit.task_id).collect();

	assert_eq!(ids, vec![10, 12]);

	let err = service.category_tasks(42).await.unwrap_err();

	assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn empty_fetch_surfaces_as_upstream_unavailable() {
	let service = service_with(RawBatch::default());
	let err = service.search("anything").await.unwrap_err();

	assert!(matches!(err, Error::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn provider_failure_surfaces_as_upstream_unavailable() {
	let service = TasklensService::with_provider(test_config(), Arc::new(FailingProvider));
	let err = service.scan_blocked().await.unwrap_err();

	assert!(matches!(err, Error::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn malformed_records_degrade_instead_of_failing_the_query() {
	let mut batch = sample_batch();

	batch.tasks.push(RawTask {
		id: None,
		category_id: Some(1),
		title: Some("headless".to_string()),
		provider_alias: None,
		status_code: None,
		deadline: None,
	});
	batch.updates.push(RawUpdate {
		task_id: Some(10),
		timestamp: Some("not a timestamp".to_string()),
		note: Some("lost".to_string()),
		status_code: None,
	});

	let service = service_with(batch);
	let hits = service.search("Acme Corp").await.expect("Search must succeed.");

	assert_eq!(hits.len(), 2);
}
