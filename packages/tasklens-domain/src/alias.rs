/// Normalizes a provider alias into its grouping key: lowercased, with runs
/// of whitespace collapsed to a single space and outer whitespace trimmed.
/// "Acme Corp " and "acme  corp" share one key.
pub fn normalize_alias(alias: &str) -> String {
	let mut out = String::with_capacity(alias.len());

	for part in alias.split_whitespace() {
		if !out.is_empty() {
			out.push(' ');
		}

		for ch in part.chars() {
			out.extend(ch.to_lowercase());
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collapses_whitespace_and_case() {
		assert_eq!(normalize_alias("Acme Corp "), "acme corp");
		assert_eq!(normalize_alias("  ACME\t\tCORP"), "acme corp");
		assert_eq!(normalize_alias("acme corp"), "acme corp");
	}

	#[test]
	fn empty_and_blank_aliases_normalize_to_empty() {
		assert_eq!(normalize_alias(""), "");
		assert_eq!(normalize_alias("   "), "");
	}
}
