pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	// Route settings join api_base verbatim, so anything not rooted at "/"
	// would silently hit the wrong upstream endpoint.
	#[error("{setting} must be an absolute path, got {path:?}.")]
	UpstreamPath { setting: &'static str, path: String },
	#[error("{message}")]
	Validation { message: String },
}
