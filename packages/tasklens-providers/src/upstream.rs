use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;
use serde_json::Value;

use tasklens_config::UpstreamConfig;
use tasklens_domain::{RawBatch, RawCategory, RawTask, RawUpdate};

/// Fetches one complete batch: every category, every task in each category,
/// and each task's update history. The caller normalizes and indexes the
/// batch for a single query and then discards it.
pub async fn fetch_batch(cfg: &UpstreamConfig) -> Result<RawBatch> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let categories = fetch_categories(cfg, &client).await?;
	let mut batch = RawBatch { categories, ..Default::default() };

	for category in batch.categories.clone() {
		let Some(category_id) = category.id else { continue };
		let tasks = fetch_category_tasks(cfg, &client, category_id).await?;

		for task in &tasks {
			let Some(task_id) = task.id else { continue };

			match fetch_task_updates(cfg, &client, task_id).await {
				Ok(updates) => batch.updates.extend(updates),
				Err(err) => {
					// History is an enrichment; a task without it still
					// searches and summarizes from its title and status.
					tracing::warn!(task_id, error = %err, "Update history fetch failed.");
				},
			}
		}

		batch.tasks.extend(tasks);
	}

	Ok(batch)
}

pub async fn fetch_categories(cfg: &UpstreamConfig, client: &Client) -> Result<Vec<RawCategory>> {
	let url = format!("{}{}", cfg.api_base, cfg.categories_path);
	let res = client
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_listing(json, &["Data", "categories"])
}

pub async fn fetch_category_tasks(
	cfg: &UpstreamConfig,
	client: &Client,
	category_id: i64,
) -> Result<Vec<RawTask>> {
	let url = format!("{}{}", cfg.api_base, cfg.tasks_path);
	let res = client
		.get(url)
		.query(&[("CategoryId", category_id)])
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_listing(json, &["Data", "tasks"])
}

pub async fn fetch_task_updates(
	cfg: &UpstreamConfig,
	client: &Client,
	task_id: i64,
) -> Result<Vec<RawUpdate>> {
	let url = format!("{}{}", cfg.api_base, cfg.updates_path);
	let body = serde_json::json!({ "TaskId": task_id, "PageSize": 20 });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let mut updates: Vec<RawUpdate> = parse_history(json)?;

	for update in &mut updates {
		if update.task_id.is_none() {
			update.task_id = Some(task_id);
		}
	}

	Ok(updates)
}

/// Upstream listing endpoints answer either a bare array or an envelope
/// object keyed by one of the given names.
fn parse_listing<T>(json: Value, envelope_keys: &[&str]) -> Result<Vec<T>>
where
	T: serde::de::DeserializeOwned,
{
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut map) => {
			let mut found = Vec::new();

			for key in envelope_keys {
				if let Some(Value::Array(items)) = map.remove(*key) {
					found = items;

					break;
				}
			}

			found
		},
		_ => Vec::new(),
	};
	let mut out = Vec::with_capacity(items.len());

	for item in items {
		match serde_json::from_value(item) {
			Ok(parsed) => out.push(parsed),
			Err(err) => {
				tracing::warn!(error = %err, "Skipping malformed upstream record.");
			},
		}
	}

	Ok(out)
}

/// History payloads nest one level deeper than listings:
/// `{ "Data": { "FollowUpHistoryDetails": [...] } }`, with older deployments
/// lifting the details array to the top level.
fn parse_history(json: Value) -> Result<Vec<RawUpdate>> {
	let inner = match &json {
		Value::Object(map) => match map.get("Data") {
			Some(Value::Object(data)) => data.get("FollowUpHistoryDetails").cloned(),
			_ => map.get("FollowUpHistoryDetails").cloned(),
		},
		_ => None,
	};

	parse_listing(inner.unwrap_or(json), &["FollowUpHistoryDetails"])
}
