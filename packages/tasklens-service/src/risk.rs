use time::OffsetDateTime;

use tasklens_corpus::Corpus;
use tasklens_domain::{Task, TaskStatus};

/// Tasks sitting in a blocked or on-hold status, in category-then-task-id
/// order. An empty result is a valid answer, not an error.
pub fn scan_blocked(corpus: &Corpus) -> Vec<&Task> {
	let mut out: Vec<&Task> = corpus.tasks().iter().filter(|task| task.status.is_risk()).collect();

	out.sort_by_key(|task| (task.category_id, task.id));

	out
}

/// Tasks whose deadline lies strictly before `as_of` and that are not yet
/// completed. A task without a deadline is never overdue. `as_of` is explicit
/// so callers and tests control the clock.
pub fn scan_overdue(corpus: &Corpus, as_of: OffsetDateTime) -> Vec<&Task> {
	let mut out: Vec<&Task> = corpus
		.tasks()
		.iter()
		.filter(|task| {
			task.status != TaskStatus::Completed
				&& task.deadline.map(|deadline| deadline < as_of).unwrap_or(false)
		})
		.collect();

	out.sort_by_key(|task| (task.category_id, task.id));

	out
}
