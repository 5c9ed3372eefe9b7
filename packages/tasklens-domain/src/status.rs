use serde::{Deserialize, Serialize};

/// Internal status set. External status codes are free-form strings; mapping
/// into this set is total and anything unrecognized lands on `Other`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
	Open,
	InProgress,
	Blocked,
	OnHold,
	Completed,
	Other,
}

impl TaskStatus {
	pub fn from_code(code: &str) -> Self {
		let code = code.to_lowercase();

		if code.contains("blocked") || code.contains("stopped") {
			return Self::Blocked;
		}
		if code.contains("hold") {
			return Self::OnHold;
		}
		if code.contains("done")
			|| code.contains("complete")
			|| code.contains("closed")
			|| code.contains("resolved")
		{
			return Self::Completed;
		}
		if code.contains("progress") || code.contains("working") {
			return Self::InProgress;
		}
		if code.contains("open") || code.contains("new") || code.contains("pending") {
			return Self::Open;
		}

		Self::Other
	}

	/// Human phrase used in narratives. Raw status codes never reach output.
	pub fn phrase(&self) -> &'static str {
		match self {
			Self::Open => "currently open",
			Self::InProgress => "in progress",
			Self::Blocked => "currently blocked",
			Self::OnHold => "on hold",
			Self::Completed => "completed",
			Self::Other => "in an unclassified state",
		}
	}

	pub fn is_risk(&self) -> bool {
		matches!(self, Self::Blocked | Self::OnHold)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_known_codes() {
		assert_eq!(TaskStatus::from_code("Blocked by vendor"), TaskStatus::Blocked);
		assert_eq!(TaskStatus::from_code("STOPPED"), TaskStatus::Blocked);
		assert_eq!(TaskStatus::from_code("On Hold"), TaskStatus::OnHold);
		assert_eq!(TaskStatus::from_code("In Progress"), TaskStatus::InProgress);
		assert_eq!(TaskStatus::from_code("Done"), TaskStatus::Completed);
		assert_eq!(TaskStatus::from_code("Closed - Resolved"), TaskStatus::Completed);
		assert_eq!(TaskStatus::from_code("Open"), TaskStatus::Open);
		assert_eq!(TaskStatus::from_code("New Request"), TaskStatus::Open);
	}

	#[test]
	fn unknown_codes_map_to_other() {
		assert_eq!(TaskStatus::from_code(""), TaskStatus::Other);
		assert_eq!(TaskStatus::from_code("???"), TaskStatus::Other);
		assert_eq!(TaskStatus::from_code("escalated"), TaskStatus::Other);
	}

	#[test]
	fn terminal_codes_win_over_open_substrings() {
		// "reopened" contains "open" but also nothing terminal; it stays open.
		assert_eq!(TaskStatus::from_code("Reopened"), TaskStatus::Open);
		// "closed as pending review" must resolve to the terminal state.
		assert_eq!(TaskStatus::from_code("closed as pending review"), TaskStatus::Completed);
	}

	#[test]
	fn risk_statuses() {
		assert!(TaskStatus::Blocked.is_risk());
		assert!(TaskStatus::OnHold.is_risk());
		assert!(!TaskStatus::Open.is_risk());
		assert!(!TaskStatus::Completed.is_risk());
	}
}
