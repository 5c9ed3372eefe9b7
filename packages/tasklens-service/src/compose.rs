use time::{OffsetDateTime, macros::format_description};

use tasklens_domain::{Task, Update};

use crate::DetailLevel;

const MAX_CLAUSE_CHARS: usize = 140;
const NO_HISTORY: &str = "No update history available.";

/// Renders a task's ranked updates into prose. Output carries only mapped
/// status phrases and note text, never raw codes or internal identifiers.
/// Missing fields degrade to explicit clauses instead of disappearing.
pub fn compose(
	task: &Task,
	ranked: &[&Update],
	detail_level: DetailLevel,
	max_snippets: usize,
) -> String {
	match detail_level {
		DetailLevel::Short => compose_short(task, ranked),
		DetailLevel::Detailed => compose_detailed(task, ranked, max_snippets),
	}
}

/// Category-level narrative over tasks already ordered most notable first.
pub fn compose_category(
	name: &str,
	ordered: &[&Task],
	detail_level: DetailLevel,
	max_snippets: usize,
) -> String {
	if ordered.is_empty() {
		return format!("{name} has no tasks in the current batch.");
	}

	let risk_count = ordered.iter().filter(|task| task.status.is_risk()).count();
	let headline = if risk_count > 0 {
		format!(
			"{name} covers {} tasks; {} need attention.",
			ordered.len(),
			risk_count,
		)
	} else {
		format!("{name} covers {} tasks.", ordered.len())
	};

	digest(headline, ordered, detail_level, max_snippets)
}

/// Provider-level narrative over that provider's tasks, most notable first.
/// An alias with no tasks renders as an explicit sentence, not an error.
pub fn compose_provider(
	alias: &str,
	ordered: &[&Task],
	detail_level: DetailLevel,
	max_snippets: usize,
) -> String {
	if ordered.is_empty() {
		return format!("No tasks found for provider \"{alias}\".");
	}

	let risk_count = ordered.iter().filter(|task| task.status.is_risk()).count();
	let headline = if risk_count > 0 {
		format!(
			"{alias} has {} tasks on file; {} need attention.",
			ordered.len(),
			risk_count,
		)
	} else {
		format!("{alias} has {} tasks on file.", ordered.len())
	};

	digest(headline, ordered, detail_level, max_snippets)
}

fn digest(
	headline: String,
	ordered: &[&Task],
	detail_level: DetailLevel,
	max_snippets: usize,
) -> String {
	match detail_level {
		DetailLevel::Short => {
			let top = ordered[0];

			format!("{headline} Most notable: {}", compose_short(top, &latest_of(top)))
		},
		DetailLevel::Detailed => {
			let mut lines = vec![headline];

			for task in ordered.iter().take(max_snippets) {
				lines.push(format!("- {}", compose_short(task, &latest_of(task))));
			}
			if ordered.len() > max_snippets {
				lines.push(format!("{} further tasks omitted.", ordered.len() - max_snippets));
			}

			lines.join("\n")
		},
	}
}

fn compose_short(task: &Task, ranked: &[&Update]) -> String {
	let status_line = format!("{} is {}.", title_of(task), task.status.phrase());

	match ranked.first() {
		Some(update) => format!("{status_line} Latest update: {}.", clause(&update.note)),
		None => format!("{status_line} {NO_HISTORY}"),
	}
}

fn compose_detailed(task: &Task, ranked: &[&Update], max_snippets: usize) -> String {
	let mut lines = vec![format!("{} is {}.", title_of(task), task.status.phrase())];

	if ranked.is_empty() {
		lines.push(NO_HISTORY.to_string());

		return lines.join("\n");
	}

	for update in ranked.iter().take(max_snippets) {
		lines.push(format!("- {}: {}", format_date(update.timestamp), clause(&update.note)));
	}

	// The span line reports the full history, not just the ranked window.
	if task.updates.len() > max_snippets
		&& let (Some(oldest), Some(newest)) = (task.oldest_update(), task.newest_update())
	{
		lines.push(format!(
			"{} updates on record between {} and {}.",
			task.updates.len(),
			format_date(oldest.timestamp),
			format_date(newest.timestamp),
		));
	}

	lines.join("\n")
}

fn latest_of(task: &Task) -> Vec<&Update> {
	task.newest_update().into_iter().collect()
}

fn title_of(task: &Task) -> String {
	if task.title.is_empty() {
		"This task".to_string()
	} else {
		format!("\"{}\"", task.title)
	}
}

/// Trims a note down to its first clause, bounded in length. Empty notes
/// degrade to a fixed phrase so the sentence stays well-formed.
fn clause(note: &str) -> String {
	let first = note
		.split(['.', ';', '\n'])
		.map(str::trim)
		.find(|part| !part.is_empty())
		.unwrap_or("no details recorded");

	if first.chars().count() <= MAX_CLAUSE_CHARS {
		return first.to_string();
	}

	let truncated: String = first.chars().take(MAX_CLAUSE_CHARS).collect();

	format!("{}...", truncated.trim_end())
}

fn format_date(timestamp: OffsetDateTime) -> String {
	let format = format_description!("[year]-[month]-[day]");

	timestamp.format(&format).unwrap_or_else(|_| timestamp.date().to_string())
}
