pub mod compose;
pub mod error;
pub mod rank;
pub mod risk;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub use error::{Error, Result};

use tasklens_config::{Config, UpstreamConfig};
use tasklens_corpus::Corpus;
use tasklens_domain::{RawBatch, Task, TaskStatus, normalize_batch};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam to the external record source. The default implementation talks HTTP
/// through `tasklens-providers`; tests swap in canned batches.
pub trait UpstreamProvider
where
	Self: Send + Sync,
{
	fn fetch_batch<'a>(
		&'a self,
		cfg: &'a UpstreamConfig,
	) -> BoxFuture<'a, color_eyre::Result<RawBatch>>;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
	#[default]
	Short,
	Detailed,
}

/// Outward task view returned by search and the risk scans. Carries the
/// category name so callers need no second lookup.
#[derive(Clone, Debug, Serialize)]
pub struct TaskHit {
	pub task_id: i64,
	pub category_id: i64,
	pub category_name: String,
	pub title: String,
	pub provider_alias: Option<String>,
	pub status: TaskStatus,
	#[serde(with = "time::serde::rfc3339::option")]
	pub deadline: Option<OffsetDateTime>,
	pub update_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryBrief {
	pub id: i64,
	pub name: String,
}

struct DefaultProvider;

impl UpstreamProvider for DefaultProvider {
	fn fetch_batch<'a>(
		&'a self,
		cfg: &'a UpstreamConfig,
	) -> BoxFuture<'a, color_eyre::Result<RawBatch>> {
		Box::pin(tasklens_providers::upstream::fetch_batch(cfg))
	}
}

pub struct TasklensService {
	pub cfg: Config,
	provider: Arc<dyn UpstreamProvider>,
}

impl TasklensService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, provider: Arc::new(DefaultProvider) }
	}

	pub fn with_provider(cfg: Config, provider: Arc<dyn UpstreamProvider>) -> Self {
		Self { cfg, provider }
	}

	pub async fn search(&self, query: &str) -> Result<Vec<TaskHit>> {
		let corpus = self.load_corpus().await?;
		let hits =
			search::search(&corpus, query, self.cfg.search.max_query_terms as usize);

		Ok(self.to_hits(&corpus, &hits))
	}

	pub async fn scan_blocked(&self) -> Result<Vec<TaskHit>> {
		let corpus = self.load_corpus().await?;
		let hits = risk::scan_blocked(&corpus);

		Ok(self.to_hits(&corpus, &hits))
	}

	pub async fn scan_overdue(&self, as_of: OffsetDateTime) -> Result<Vec<TaskHit>> {
		let corpus = self.load_corpus().await?;
		let hits = risk::scan_overdue(&corpus, as_of);

		Ok(self.to_hits(&corpus, &hits))
	}

	pub async fn summarize(
		&self,
		task_id: i64,
		time_window_days: Option<i64>,
		detail_level: DetailLevel,
	) -> Result<String> {
		let corpus = self.load_corpus().await?;
		let Some(task) = corpus.task(task_id) else {
			return Err(Error::NotFound { message: format!("Task {task_id} is not in the current batch.") });
		};
		let now = OffsetDateTime::now_utc();
		let ranked = rank::rank_updates(task, time_window_days, now, &self.cfg.ranking);

		Ok(compose::compose(task, &ranked, detail_level, self.cfg.summary.max_snippets as usize))
	}

	pub async fn summarize_category(
		&self,
		category_id: i64,
		time_window_days: Option<i64>,
		detail_level: DetailLevel,
	) -> Result<String> {
		let corpus = self.load_corpus().await?;
		let Some(category) = corpus.category(category_id) else {
			return Err(Error::NotFound {
				message: format!("Category {category_id} is not in the current batch."),
			});
		};
		let now = OffsetDateTime::now_utc();
		let tasks = corpus.category_tasks(category_id);
		let ordered = rank::rank_tasks_by_importance(&tasks, time_window_days, now);

		Ok(compose::compose_category(
			&category.name,
			&ordered,
			detail_level,
			self.cfg.summary.max_snippets as usize,
		))
	}

	/// Digest of everything on file for one provider alias. An alias nobody
	/// carries is a valid answer rendered as prose, not a lookup failure.
	pub async fn summarize_provider(
		&self,
		alias: &str,
		time_window_days: Option<i64>,
		detail_level: DetailLevel,
	) -> Result<String> {
		let corpus = self.load_corpus().await?;
		let tasks = corpus.alias_tasks(alias);
		let now = OffsetDateTime::now_utc();
		let ordered = rank::rank_tasks_by_importance(&tasks, time_window_days, now);

		Ok(compose::compose_provider(
			alias.trim(),
			&ordered,
			detail_level,
			self.cfg.summary.max_snippets as usize,
		))
	}

	pub async fn categories(&self) -> Result<Vec<CategoryBrief>> {
		let corpus = self.load_corpus().await?;

		Ok(corpus
			.categories()
			.iter()
			.map(|category| CategoryBrief { id: category.id, name: category.name.clone() })
			.collect())
	}

	pub async fn category_tasks(&self, category_id: i64) -> Result<Vec<TaskHit>> {
		let corpus = self.load_corpus().await?;

		if corpus.category(category_id).is_none() {
			return Err(Error::NotFound {
				message: format!("Category {category_id} is not in the current batch."),
			});
		}

		let tasks = corpus.category_tasks(category_id);

		Ok(self.to_hits(&corpus, &tasks))
	}

	/// Fetches a fresh batch and builds this query's corpus. Nothing is kept
	/// once the answer is produced.
	async fn load_corpus(&self) -> Result<Corpus> {
		let raw = self.provider.fetch_batch(&self.cfg.upstream).await?;
		let batch = normalize_batch(raw);

		for warning in &batch.warnings {
			tracing::warn!(%warning, "Dropped or degraded an upstream record.");
		}

		if batch.categories.is_empty() {
			return Err(Error::UpstreamUnavailable {
				message: "Upstream returned no categories.".to_string(),
			});
		}

		Ok(Corpus::build(batch.categories, batch.tasks))
	}

	fn to_hits(&self, corpus: &Corpus, tasks: &[&Task]) -> Vec<TaskHit> {
		tasks
			.iter()
			.map(|task| TaskHit {
				task_id: task.id,
				category_id: task.category_id,
				category_name: corpus
					.category(task.category_id)
					.map(|category| category.name.clone())
					.unwrap_or_default(),
				title: task.title.clone(),
				provider_alias: task.provider_alias.clone(),
				status: task.status,
				deadline: task.deadline,
				update_count: task.updates.len(),
			})
			.collect()
	}
}
