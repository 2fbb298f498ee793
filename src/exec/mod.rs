//! External command plumbing.
//!
//! This module handles:
//! - Locating executables on `PATH`
//! - Running them with inherited stdio and reporting their exit status

use crate::error::{FilterError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Run a command in `cwd` and wait for it.
///
/// stdout and stderr are passed through; stdin is closed so the child can
/// never block waiting for input.
pub fn execute_command(binary: &Path, args: &[&str], cwd: &Path) -> Result<ExitStatus> {
	tracing::debug!("Running {} {}", binary.display(), args.join(" "));

	let mut cmd = Command::new(binary);
	cmd.args(args)
		.current_dir(cwd)
		.stdin(Stdio::null())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	let status = cmd.status().map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			FilterError::CommandNotFound {
				command: binary.to_string_lossy().to_string(),
			}
		} else {
			FilterError::CommandFailed {
				command: binary.to_string_lossy().to_string(),
				source,
			}
		}
	})?;

	Ok(status)
}

/// Resolve a command name to its full path.
///
/// If the command is already an absolute path, returns it as-is.
/// Otherwise, searches PATH for the command.
pub fn resolve_command(command: &str) -> Option<PathBuf> {
	let path = Path::new(command);

	if path.is_absolute() {
		return is_executable(path).then(|| path.to_path_buf());
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.flat_map(|dir| executable_candidates(&dir, command))
		.find(|candidate| is_executable(candidate))
}

/// A regular file with an execute bit set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
	use std::os::unix::fs::PermissionsExt;

	std::fs::metadata(path)
		.map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
		.unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
	path.is_file()
}

/// Names a command may have on disk inside `dir`.
fn executable_candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
	let mut candidates = vec![dir.join(command)];
	if cfg!(windows) {
		candidates.push(dir.join(format!("{}.exe", command)));
	}
	candidates
}
