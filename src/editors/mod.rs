//! Idempotent editors for the two files git reads filters from.
//!
//! This module handles:
//! - `.gitattributes` directives (pattern to filter name)
//! - `.gitconfig` `[filter "<name>"]` sections (name to clean/smudge commands)
//! - Replacing a file through a sibling temporary file
//!
//! Files are handled as bytes. Lines the editors do not own are copied back
//! exactly, whatever their encoding.

pub mod attributes;
pub mod sections;

pub use attributes::{rewrite_attributes, update_attributes_file};
pub use sections::{rewrite_sections, update_sections_file};

use crate::error::{FilterError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What an editor did to its target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
	/// The file did not exist and was written from scratch.
	Created,
	/// The file existed and was rewritten in place.
	Updated,
}

/// Read a file that may legitimately be missing.
pub fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
	match std::fs::read(path) {
		Ok(content) => Ok(Some(content)),
		Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(source) => Err(FilterError::ReadError {
			path: path.to_path_buf(),
			source,
		}),
	}
}

/// Sibling used while `path` is being replaced: `<name>.tmp` in the same directory.
pub fn temp_path_for(path: &Path) -> PathBuf {
	let mut name = path.file_name().unwrap_or_default().to_os_string();
	name.push(".tmp");
	path.with_file_name(name)
}

/// Replace `path` with `contents`.
///
/// The data is written and synced to a sibling temporary file which is then
/// renamed over the target, so readers see either the old file or the whole
/// new one. The temporary file is removed if any step fails.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
	let temp_path = temp_path_for(path);

	if let Err(source) = write_synced(&temp_path, contents) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(FilterError::WriteError {
			path: temp_path,
			source,
		});
	}

	std::fs::rename(&temp_path, path).map_err(|source| {
		let _ = std::fs::remove_file(&temp_path);
		FilterError::ReplaceError {
			path: path.to_path_buf(),
			temp_path: temp_path.clone(),
			source,
		}
	})
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
	let mut file = File::create(path)?;
	file.write_all(contents)?;
	file.sync_all()
}

/// Split into lines keeping each line's terminator.
///
/// Yields `(raw, text)` where `raw` is the line as read and `text` has the
/// `\n` or `\r\n` terminator removed.
pub(crate) fn split_lines(content: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
	content.split_inclusive(|&b| b == b'\n').map(|raw| {
		let text = raw.strip_suffix(b"\n").unwrap_or(raw);
		let text = text.strip_suffix(b"\r").unwrap_or(text);
		(raw, text)
	})
}

/// Terminator used by the first terminated line, `\n` if there is none.
pub(crate) fn line_ending(content: &[u8]) -> &'static str {
	match split_lines(content).find(|(raw, _)| raw.ends_with(b"\n")) {
		Some((raw, _)) if raw.ends_with(b"\r\n") => "\r\n",
		_ => "\n",
	}
}

/// Append a line that was read from the old file, terminating it with `eol`
/// if it was the unterminated last line.
pub(crate) fn push_raw_line(out: &mut Vec<u8>, raw: &[u8], eol: &str) {
	out.extend_from_slice(raw);
	if !raw.ends_with(b"\n") {
		out.extend_from_slice(eol.as_bytes());
	}
}

/// Append a generated line followed by `eol`.
pub(crate) fn push_line(out: &mut Vec<u8>, line: &str, eol: &str) {
	out.extend_from_slice(line.as_bytes());
	out.extend_from_slice(eol.as_bytes());
}
