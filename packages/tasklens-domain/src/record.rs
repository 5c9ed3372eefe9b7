use serde::Deserialize;

/// Raw records as delivered by the upstream fetch collaborator. Field names
/// vary between upstream deployments, so every field accepts both the plain
/// and the legacy Taskmaster spelling, and everything that can be absent is
/// optional. Shape problems are resolved during normalization, not here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawBatch {
	#[serde(default)]
	pub categories: Vec<RawCategory>,
	#[serde(default)]
	pub tasks: Vec<RawTask>,
	#[serde(default)]
	pub updates: Vec<RawUpdate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCategory {
	#[serde(alias = "CategoryId", alias = "TaskCategoryId")]
	pub id: Option<i64>,
	#[serde(alias = "CategoryName", alias = "TaskCategoryName")]
	pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTask {
	#[serde(alias = "TaskId")]
	pub id: Option<i64>,
	#[serde(alias = "CategoryId", alias = "TaskCategoryId")]
	pub category_id: Option<i64>,
	#[serde(alias = "SubjectLine")]
	pub title: Option<String>,
	#[serde(alias = "TaskAssignedtoName", alias = "ProviderAlias")]
	pub provider_alias: Option<String>,
	#[serde(alias = "LastStatusCode")]
	pub status_code: Option<String>,
	#[serde(alias = "Deadline", alias = "DueDate")]
	pub deadline: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawUpdate {
	#[serde(alias = "TaskId")]
	pub task_id: Option<i64>,
	#[serde(alias = "FollowUpDate")]
	pub timestamp: Option<String>,
	#[serde(alias = "FollowUpComment", alias = "TaskFollowUpComments")]
	pub note: Option<String>,
	#[serde(alias = "StatusCode", alias = "LastStatusCode")]
	pub status_code: Option<String>,
}
