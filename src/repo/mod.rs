//! Installing the filters into a git working copy.
//!
//! This module handles:
//! - Recognizing the root of a working copy
//! - Pointing git at the shared `.gitconfig` via `include.path`
//! - Running both editors against the working copy

use crate::editors::{EditOutcome, update_attributes_file, update_sections_file};
use crate::error::{FilterError, Result};
use crate::exec::execute_command;
use crate::rules::RuleSet;
use std::path::Path;

/// Attributes file, relative to the working copy root.
pub const ATTRIBUTES_FILE: &str = ".gitattributes";

/// Shared config file holding the filter definitions, relative to the root.
pub const CONFIG_FILE: &str = ".gitconfig";

/// `include.path` is resolved relative to `.git/config`, hence the `../`.
pub const INCLUDE_PATH: &str = "../.gitconfig";

/// Whether `dir` is the top of a git working copy.
pub fn is_repo_root(dir: &Path) -> bool {
	dir.join(".git").is_dir()
}

/// Fail with [`FilterError::NotRepoRoot`] unless `dir` is a working copy root.
pub fn ensure_repo_root(dir: &Path) -> Result<()> {
	if is_repo_root(dir) {
		Ok(())
	} else {
		Err(FilterError::NotRepoRoot {
			path: dir.to_path_buf(),
		})
	}
}

/// Make the local repository configuration include [`CONFIG_FILE`].
///
/// Returns whether git accepted the setting. A non-zero exit from git is
/// logged, not returned as an error.
pub fn register_config_include(git: &Path, root: &Path) -> Result<bool> {
	tracing::info!(
		"Configuring git to use \"{}\" as a configuration file",
		CONFIG_FILE
	);

	let status = execute_command(
		git,
		&["config", "--local", "include.path", INCLUDE_PATH],
		root,
	)?;

	if !status.success() {
		tracing::warn!(
			"git config exited with {}; add include.path = {} to .git/config manually",
			status,
			INCLUDE_PATH
		);
	}

	Ok(status.success())
}

/// Outcome of one [`install`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
	pub attributes: EditOutcome,
	pub config: EditOutcome,
}

/// Run both editors against the working copy rooted at `root`.
///
/// The attributes file is written first; if it fails the config file is left
/// untouched.
pub fn install(root: &Path, rules: &RuleSet) -> Result<InstallReport> {
	let attributes = update_attributes_file(&root.join(ATTRIBUTES_FILE), rules)?;
	let config = update_sections_file(&root.join(CONFIG_FILE), rules)?;

	Ok(InstallReport { attributes, config })
}
