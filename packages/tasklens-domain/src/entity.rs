use serde::Serialize;
use time::OffsetDateTime;

use crate::status::TaskStatus;

/// One category from a fetch batch. Immutable for the lifetime of a query.
#[derive(Clone, Debug, Serialize)]
pub struct Category {
	pub id: i64,
	pub name: String,
	/// Task ids in batch order.
	pub task_ids: Vec<i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Task {
	pub id: i64,
	pub category_id: i64,
	pub title: String,
	pub provider_alias: Option<String>,
	pub status: TaskStatus,
	#[serde(with = "time::serde::rfc3339::option")]
	pub deadline: Option<OffsetDateTime>,
	/// Chronological, oldest first. Ordered once by the normalizer and never
	/// reordered afterwards.
	pub updates: Vec<Update>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Update {
	pub task_id: i64,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
	pub note: String,
	pub status_code: Option<String>,
}

impl Task {
	pub fn newest_update(&self) -> Option<&Update> {
		self.updates.last()
	}

	pub fn oldest_update(&self) -> Option<&Update> {
		self.updates.first()
	}
}
