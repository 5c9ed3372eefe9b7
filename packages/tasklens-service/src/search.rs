use std::collections::{HashMap, HashSet};

use tasklens_corpus::Corpus;
use tasklens_domain::{Task, tokenize};

/// Resolves a free-text or alias query against the corpus. An exact alias
/// match short-circuits token scoring so alias tasks are never crowded out.
/// Otherwise each distinct query token scores 2 for a title/alias hit and 1
/// for a note hit; results order by score descending, task id ascending.
/// An empty query or a query with no hits yields an empty list.
pub fn search<'a>(corpus: &'a Corpus, query: &str, max_query_terms: usize) -> Vec<&'a Task> {
	let alias_hits = corpus.alias_tasks(query);

	if !alias_hits.is_empty() {
		let mut hits = alias_hits;

		hits.sort_by_key(|task| task.id);

		return hits;
	}

	let tokens = query_tokens(query, max_query_terms);

	if tokens.is_empty() {
		return Vec::new();
	}

	let mut scores: HashMap<i64, u32> = HashMap::new();

	for token in &tokens {
		let Some(postings) = corpus.token_postings(token) else { continue };
		let title_hits: HashSet<i64> = postings.title_or_alias.iter().copied().collect();

		for &task_id in &postings.title_or_alias {
			*scores.entry(task_id).or_default() += 2;
		}
		for &task_id in &postings.notes {
			// A token already credited via title/alias does not double-count.
			if !title_hits.contains(&task_id) {
				*scores.entry(task_id).or_default() += 1;
			}
		}
	}

	let mut ranked: Vec<(u32, i64)> =
		scores.into_iter().map(|(task_id, score)| (score, task_id)).collect();

	ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

	ranked.into_iter().filter_map(|(_, task_id)| corpus.task(task_id)).collect()
}

/// Distinct query tokens in first-seen order, capped at `max_terms`.
pub fn query_tokens(query: &str, max_terms: usize) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in tokenize(query) {
		if seen.insert(token.clone()) {
			out.push(token);
		}
		if out.len() >= max_terms {
			break;
		}
	}

	out
}
