use std::collections::HashMap;

use tasklens_domain::{Category, Task, normalize_alias, tokenize};

/// Per-query view over one normalized fetch batch: id lookups, an alias
/// grouping, and an inverted token index. Built once at the start of a query
/// and discarded with it; nothing here survives across queries.
#[derive(Debug, Default)]
pub struct Corpus {
	categories: Vec<Category>,
	tasks: Vec<Task>,
	category_index: HashMap<i64, usize>,
	task_index: HashMap<i64, usize>,
	alias_index: HashMap<String, Vec<i64>>,
	token_index: HashMap<String, TokenPostings>,
}

/// Which tasks contain a token, split by where the token appeared. Title and
/// alias hits carry more weight during search than note hits.
#[derive(Debug, Default)]
pub struct TokenPostings {
	pub title_or_alias: Vec<i64>,
	pub notes: Vec<i64>,
}

impl Corpus {
	/// Building is total: whatever the normalizer produced is indexable.
	pub fn build(categories: Vec<Category>, tasks: Vec<Task>) -> Self {
		let mut corpus = Self {
			category_index: categories
				.iter()
				.enumerate()
				.map(|(slot, category)| (category.id, slot))
				.collect(),
			task_index: tasks.iter().enumerate().map(|(slot, task)| (task.id, slot)).collect(),
			categories,
			tasks,
			..Default::default()
		};

		for task in &corpus.tasks {
			if let Some(alias) = task.provider_alias.as_deref() {
				let key = normalize_alias(alias);

				if !key.is_empty() {
					corpus.alias_index.entry(key).or_default().push(task.id);
				}
			}

			for token in title_and_alias_tokens(task) {
				push_unique(
					&mut corpus.token_index.entry(token).or_default().title_or_alias,
					task.id,
				);
			}
			for update in &task.updates {
				for token in tokenize(&update.note) {
					push_unique(&mut corpus.token_index.entry(token).or_default().notes, task.id);
				}
			}
		}

		for ids in corpus.alias_index.values_mut() {
			ids.sort_unstable();
			ids.dedup();
		}

		corpus
	}

	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	pub fn tasks(&self) -> &[Task] {
		&self.tasks
	}

	pub fn category(&self, id: i64) -> Option<&Category> {
		self.category_index.get(&id).map(|&slot| &self.categories[slot])
	}

	pub fn task(&self, id: i64) -> Option<&Task> {
		self.task_index.get(&id).map(|&slot| &self.tasks[slot])
	}

	/// Tasks in one category, in the category's task order.
	pub fn category_tasks(&self, id: i64) -> Vec<&Task> {
		let Some(category) = self.category(id) else { return Vec::new() };

		category.task_ids.iter().filter_map(|&task_id| self.task(task_id)).collect()
	}

	/// Tasks grouped under a provider alias, matched on the normalized key.
	pub fn alias_tasks(&self, alias: &str) -> Vec<&Task> {
		let key = normalize_alias(alias);
		let Some(ids) = self.alias_index.get(&key) else { return Vec::new() };

		ids.iter().filter_map(|&task_id| self.task(task_id)).collect()
	}

	pub fn token_postings(&self, token: &str) -> Option<&TokenPostings> {
		self.token_index.get(token)
	}
}

fn title_and_alias_tokens(task: &Task) -> Vec<String> {
	let mut tokens = tokenize(&task.title);

	if let Some(alias) = task.provider_alias.as_deref() {
		tokens.extend(tokenize(alias));
	}

	tokens
}

fn push_unique(ids: &mut Vec<i64>, id: i64) {
	if ids.last() != Some(&id) {
		ids.push(id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tasklens_domain::{TaskStatus, Update};
	use time::OffsetDateTime;

	fn task(id: i64, category_id: i64, title: &str, alias: Option<&str>) -> Task {
		Task {
			id,
			category_id,
			title: title.to_string(),
			provider_alias: alias.map(str::to_string),
			status: TaskStatus::Open,
			deadline: None,
			updates: Vec::new(),
		}
	}

	fn category(id: i64, name: &str, task_ids: Vec<i64>) -> Category {
		Category { id, name: name.to_string(), task_ids }
	}

	fn update(task_id: i64, note: &str) -> Update {
		Update {
			task_id,
			timestamp: OffsetDateTime::UNIX_EPOCH,
			note: note.to_string(),
			status_code: None,
		}
	}

	#[test]
	fn indexes_tasks_by_id_and_category() {
		let corpus = Corpus::build(
			vec![category(1, "Enrollment", vec![10, 11])],
			vec![task(10, 1, "First", None), task(11, 1, "Second", None)],
		);

		assert_eq!(corpus.task(10).map(|t| t.id), Some(10));
		assert_eq!(corpus.task(99).map(|t| t.id), None);
		assert_eq!(corpus.category_tasks(1).len(), 2);
		assert!(corpus.category_tasks(9).is_empty());
	}

	#[test]
	fn groups_aliases_across_categories_by_normalized_key() {
		let corpus = Corpus::build(
			vec![category(1, "A", vec![10]), category(2, "B", vec![20])],
			vec![
				task(10, 1, "Roster", Some("Acme Corp ")),
				task(20, 2, "Claims", Some("acme  corp")),
			],
		);
		let hits: Vec<i64> = corpus.alias_tasks("ACME CORP").iter().map(|t| t.id).collect();

		assert_eq!(hits, vec![10, 20]);
	}

	#[test]
	fn inverted_index_distinguishes_title_and_note_hits() {
		let mut noisy = task(10, 1, "Credential audit", None);

		noisy.updates.push(update(10, "vendor responded"));

		let corpus = Corpus::build(vec![category(1, "A", vec![10])], vec![noisy]);
		let title_hit = corpus.token_postings("credential").expect("title token indexed");
		let note_hit = corpus.token_postings("vendor").expect("note token indexed");

		assert_eq!(title_hit.title_or_alias, vec![10]);
		assert!(title_hit.notes.is_empty());
		assert_eq!(note_hit.notes, vec![10]);
		assert!(note_hit.title_or_alias.is_empty());
	}

	#[test]
	fn short_tokens_are_not_indexed() {
		let corpus =
			Corpus::build(vec![category(1, "A", vec![10])], vec![task(10, 1, "X ray", None)]);

		assert!(corpus.token_postings("x").is_none());
		assert!(corpus.token_postings("ray").is_some());
	}
}
