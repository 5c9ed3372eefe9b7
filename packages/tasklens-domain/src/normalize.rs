use std::collections::HashMap;

use time::{
	OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
	entity::{Category, Task, Update},
	record::RawBatch,
	status::TaskStatus,
};

/// Entities built from one fetch batch, plus the records that had to be
/// dropped or degraded on the way. Normalization itself never fails.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
	pub categories: Vec<Category>,
	pub tasks: Vec<Task>,
	pub warnings: Vec<RecordWarning>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordWarning {
	#[error("Category record missing id or name; dropped.")]
	CategoryIncomplete,
	#[error("Task record missing id or category id; dropped.")]
	TaskIncomplete,
	#[error("Task {task_id} references unknown category {category_id}; dropped.")]
	UnknownCategory { task_id: i64, category_id: i64 },
	#[error("Task {task_id} has no title; kept with an empty one.")]
	TaskUntitled { task_id: i64 },
	#[error("Task {task_id} has an unparsable deadline {raw:?}; deadline cleared.")]
	BadDeadline { task_id: i64, raw: String },
	#[error("Update record missing task id; dropped.")]
	UpdateIncomplete,
	#[error("Update references unknown task {task_id}; dropped.")]
	OrphanUpdate { task_id: i64 },
	#[error("Update for task {task_id} has an unparsable timestamp {raw:?}; dropped.")]
	BadUpdateTimestamp { task_id: i64, raw: String },
}

pub fn normalize_batch(raw: RawBatch) -> NormalizedBatch {
	let mut out = NormalizedBatch::default();
	let mut category_index: HashMap<i64, usize> = HashMap::new();
	let mut task_index: HashMap<i64, usize> = HashMap::new();

	for category in raw.categories {
		let (Some(id), Some(name)) = (category.id, category.name) else {
			out.warnings.push(RecordWarning::CategoryIncomplete);

			continue;
		};

		if category_index.contains_key(&id) {
			continue;
		}

		category_index.insert(id, out.categories.len());
		out.categories.push(Category { id, name, task_ids: Vec::new() });
	}

	for task in raw.tasks {
		let (Some(id), Some(category_id)) = (task.id, task.category_id) else {
			out.warnings.push(RecordWarning::TaskIncomplete);

			continue;
		};
		let Some(&category_slot) = category_index.get(&category_id) else {
			out.warnings.push(RecordWarning::UnknownCategory { task_id: id, category_id });

			continue;
		};

		if task_index.contains_key(&id) {
			continue;
		}

		let title = match task.title {
			Some(title) if !title.trim().is_empty() => title.trim().to_string(),
			_ => {
				out.warnings.push(RecordWarning::TaskUntitled { task_id: id });

				String::new()
			},
		};
		let provider_alias =
			task.provider_alias.map(|alias| alias.trim().to_string()).filter(|alias| !alias.is_empty());
		let status = TaskStatus::from_code(task.status_code.as_deref().unwrap_or_default());
		let deadline = match task.deadline {
			Some(raw) => {
				let parsed = parse_timestamp(&raw);

				if parsed.is_none() && !raw.trim().is_empty() {
					out.warnings.push(RecordWarning::BadDeadline { task_id: id, raw });
				}

				parsed
			},
			None => None,
		};

		out.categories[category_slot].task_ids.push(id);
		task_index.insert(id, out.tasks.len());
		out.tasks.push(Task {
			id,
			category_id,
			title,
			provider_alias,
			status,
			deadline,
			updates: Vec::new(),
		});
	}

	for update in raw.updates {
		let Some(task_id) = update.task_id else {
			out.warnings.push(RecordWarning::UpdateIncomplete);

			continue;
		};
		let Some(&task_slot) = task_index.get(&task_id) else {
			out.warnings.push(RecordWarning::OrphanUpdate { task_id });

			continue;
		};
		let raw_timestamp = update.timestamp.unwrap_or_default();
		let Some(timestamp) = parse_timestamp(&raw_timestamp) else {
			out.warnings
				.push(RecordWarning::BadUpdateTimestamp { task_id, raw: raw_timestamp });

			continue;
		};

		out.tasks[task_slot].updates.push(Update {
			task_id,
			timestamp,
			note: update.note.unwrap_or_default(),
			status_code: update.status_code,
		});
	}

	// Chronological, oldest first; stable so equal timestamps keep batch order.
	for task in &mut out.tasks {
		task.updates.sort_by_key(|update| update.timestamp);
	}

	out
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}
	if let Ok(ts) = OffsetDateTime::parse(trimmed, &Rfc3339) {
		return Some(ts);
	}

	// Legacy upstream payloads carry naive timestamps, optionally with a bare
	// trailing Z or fractional seconds. Treat those as UTC.
	let naive = trimmed.trim_end_matches('Z');
	let naive = naive.split('.').next().unwrap_or(naive);
	let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

	PrimitiveDateTime::parse(naive, &format).ok().map(PrimitiveDateTime::assume_utc)
}
