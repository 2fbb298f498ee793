use std::path::PathBuf;

/// Library-level structured errors for kicad-git-filters.
///
/// The CLI binary wraps these with `anyhow` for context chains and maps the
/// environment variants to dedicated exit codes.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
	#[error("Failed to parse rule table: {origin}")]
	RulesParseError {
		origin: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("Duplicate filter name in rule table: {name}")]
	DuplicateRuleName { name: String },

	#[error("Invalid rule {name:?}: {reason}")]
	InvalidRule { name: String, reason: String },

	#[error("Failed to read file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to replace {path} with {temp_path}")]
	ReplaceError {
		path: PathBuf,
		temp_path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Not the root of a git working copy (no .git/ in {path})")]
	NotRepoRoot { path: PathBuf },

	#[error("Command execution failed: {command}")]
	CommandFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },
}

/// Result type alias using FilterError.
pub type Result<T> = std::result::Result<T, FilterError>;
