use std::collections::{HashMap, HashSet};

use time::{Duration, OffsetDateTime};

use tasklens_config::Ranking;
use tasklens_domain::{Task, Update, tokenize};

/// Below this many updates term statistics are meaningless; ranking falls
/// back to recency-only ordering.
const MIN_CORPUS_FOR_TFIDF: usize = 3;

/// Ranks a task's update history, most relevant first. Each note is a
/// document and the task's (window-filtered) history is the corpus:
/// score = Σ tf×idf + recency bonus, with tf normalized by note length,
/// idf = ln((1+N)/(1+df)), and the bonus decaying exponentially with age
/// relative to the newest surviving update. A positive `time_window_days`
/// removes older updates before scoring, so they cannot influence idf.
/// Ordering is deterministic: score desc, timestamp desc, note asc.
pub fn rank_updates<'a>(
	task: &'a Task,
	time_window_days: Option<i64>,
	now: OffsetDateTime,
	weights: &Ranking,
) -> Vec<&'a Update> {
	let cutoff = time_window_days
		.filter(|days| *days > 0)
		.map(|days| now - Duration::days(days));
	let mut survivors: Vec<&Update> = task
		.updates
		.iter()
		.filter(|update| cutoff.map(|cutoff| update.timestamp >= cutoff).unwrap_or(true))
		.collect();

	if survivors.is_empty() {
		return survivors;
	}

	let newest = survivors
		.iter()
		.map(|update| update.timestamp)
		.max()
		.unwrap_or(now);

	if survivors.len() < MIN_CORPUS_FOR_TFIDF {
		survivors.sort_by(|a, b| {
			b.timestamp.cmp(&a.timestamp).then_with(|| a.note.cmp(&b.note))
		});

		return survivors;
	}

	let docs: Vec<Vec<String>> = survivors.iter().map(|update| tokenize(&update.note)).collect();
	let df = document_frequencies(&docs);
	let corpus_size = docs.len();
	let mut scored: Vec<(f64, &Update)> = survivors
		.iter()
		.zip(docs.iter())
		.map(|(update, doc)| {
			let score = tfidf_mass(doc, &df, corpus_size)
				+ recency_bonus(newest, update.timestamp, weights);

			(score, *update)
		})
		.collect();

	scored.sort_by(|a, b| {
		b.0.partial_cmp(&a.0)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then_with(|| b.1.timestamp.cmp(&a.1.timestamp))
			.then_with(|| a.1.note.cmp(&b.1.note))
	});

	scored.into_iter().map(|(_, update)| update).collect()
}

/// Orders a category's tasks by how much informative text they carry, the
/// highest mass first, ties by task id. Each task's title plus
/// window-filtered notes forms one document; the category is the corpus.
pub fn rank_tasks_by_importance<'a>(
	tasks: &[&'a Task],
	time_window_days: Option<i64>,
	now: OffsetDateTime,
) -> Vec<&'a Task> {
	let cutoff = time_window_days
		.filter(|days| *days > 0)
		.map(|days| now - Duration::days(days));
	let docs: Vec<Vec<String>> = tasks
		.iter()
		.map(|task| {
			let mut doc = tokenize(&task.title);

			for update in &task.updates {
				if cutoff.map(|cutoff| update.timestamp >= cutoff).unwrap_or(true) {
					doc.extend(tokenize(&update.note));
				}
			}

			doc
		})
		.collect();
	let df = document_frequencies(&docs);
	let corpus_size = docs.len();
	let mut scored: Vec<(f64, &Task)> = tasks
		.iter()
		.zip(docs.iter())
		.map(|(task, doc)| (tfidf_mass(doc, &df, corpus_size), *task))
		.collect();

	scored.sort_by(|a, b| {
		b.0.partial_cmp(&a.0)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then_with(|| a.1.id.cmp(&b.1.id))
	});

	scored.into_iter().map(|(_, task)| task).collect()
}

fn document_frequencies(docs: &[Vec<String>]) -> HashMap<&str, usize> {
	let mut df: HashMap<&str, usize> = HashMap::new();

	for doc in docs {
		let distinct: HashSet<&str> = doc.iter().map(String::as_str).collect();

		for token in distinct {
			*df.entry(token).or_default() += 1;
		}
	}

	df
}

fn tfidf_mass(doc: &[String], df: &HashMap<&str, usize>, corpus_size: usize) -> f64 {
	if doc.is_empty() {
		return 0.0;
	}

	let mut counts: HashMap<&str, usize> = HashMap::new();

	for token in doc {
		*counts.entry(token.as_str()).or_default() += 1;
	}

	let doc_len = doc.len() as f64;
	let mut mass = 0.0;

	for (token, count) in counts {
		let tf = count as f64 / doc_len;
		// Add-one smoothing keeps idf finite and non-negative even for terms
		// present in every document.
		let document_frequency = df.get(token).copied().unwrap_or(0);
		let idf =
			((1 + corpus_size) as f64 / (1 + document_frequency) as f64).ln();

		mass += tf * idf;
	}

	mass
}

fn recency_bonus(newest: OffsetDateTime, timestamp: OffsetDateTime, weights: &Ranking) -> f64 {
	if weights.recency_tau_days <= 0.0 || weights.recency_weight <= 0.0 {
		return 0.0;
	}

	let age_days = ((newest - timestamp).as_seconds_f64() / 86_400.0).max(0.0);

	weights.recency_weight * (-age_days / weights.recency_tau_days).exp()
}
