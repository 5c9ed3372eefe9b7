use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub upstream: UpstreamConfig,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub summary: Summary,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamConfig {
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	#[serde(default = "default_categories_path")]
	pub categories_path: String,
	#[serde(default = "default_tasks_path")]
	pub tasks_path: String,
	#[serde(default = "default_updates_path")]
	pub updates_path: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_max_query_terms")]
	pub max_query_terms: u32,
}

#[derive(Debug, Deserialize)]
pub struct Ranking {
	#[serde(default = "default_recency_tau_days")]
	pub recency_tau_days: f64,
	#[serde(default = "default_recency_weight")]
	pub recency_weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct Summary {
	#[serde(default = "default_max_snippets")]
	pub max_snippets: u32,
}

impl Default for Search {
	fn default() -> Self {
		Self { max_query_terms: default_max_query_terms() }
	}
}

impl Default for Ranking {
	fn default() -> Self {
		Self {
			recency_tau_days: default_recency_tau_days(),
			recency_weight: default_recency_weight(),
		}
	}
}

impl Default for Summary {
	fn default() -> Self {
		Self { max_snippets: default_max_snippets() }
	}
}

fn default_categories_path() -> String {
	"/GetAllCategories".to_string()
}

fn default_tasks_path() -> String {
	"/GetCategoryTasks".to_string()
}

fn default_updates_path() -> String {
	"/GetTaskFollowUpHistory".to_string()
}

fn default_timeout_ms() -> u64 {
	30_000
}

fn default_max_query_terms() -> u32 {
	16
}

fn default_recency_tau_days() -> f64 {
	7.0
}

fn default_recency_weight() -> f64 {
	0.5
}

fn default_max_snippets() -> u32 {
	5
}
