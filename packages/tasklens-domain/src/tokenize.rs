use std::collections::HashSet;

/// Splits text on non-alphanumeric boundaries, lowercases, and drops tokens
/// shorter than 2 characters. Repeated tokens are kept so callers can count
/// term frequency.
pub fn tokenize(text: &str) -> Vec<String> {
	let mut normalized = String::with_capacity(text.len());

	for ch in text.chars() {
		if ch.is_alphanumeric() {
			normalized.extend(ch.to_lowercase());
		} else {
			normalized.push(' ');
		}
	}

	normalized.split_whitespace().filter(|token| token.len() >= 2).map(str::to_string).collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
	tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_non_alphanumeric_boundaries() {
		assert_eq!(
			tokenize("Vendor responded, fix in-progress!"),
			vec!["vendor", "responded", "fix", "in", "progress"],
		);
	}

	#[test]
	fn drops_short_tokens() {
		assert_eq!(tokenize("a b cd e fg"), vec!["cd", "fg"]);
	}

	#[test]
	fn keeps_repeats_for_term_frequency() {
		assert_eq!(tokenize("fix fix fix"), vec!["fix", "fix", "fix"]);
	}

	#[test]
	fn token_set_deduplicates() {
		let set = token_set("fix fix deployed");

		assert_eq!(set.len(), 2);
		assert!(set.contains("fix"));
		assert!(set.contains("deployed"));
	}
}
