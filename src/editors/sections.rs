use crate::editors::{
	EditOutcome, line_ending, push_line, push_raw_line, read_existing, replace_file, split_lines,
};
use crate::error::Result;
use crate::rules::RuleSet;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

/// `[filter "<name>"]` at the start of a line.
static FILTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^\[filter\s+"(\S+)"\]"#).expect("filter header regex is valid")
});

/// How a `.gitconfig` line affects the scan.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
	/// `[filter "<name>"]`
	FilterHeader(Cow<'a, str>),
	/// Starts with whitespace: belongs to the current section.
	Content,
	/// Anything else, including empty lines and other section headers.
	Boundary,
}

fn classify(text: &[u8]) -> LineKind<'_> {
	if let Some(name) = FILTER_HEADER.captures(text).and_then(|caps| caps.get(1)) {
		return LineKind::FilterHeader(String::from_utf8_lossy(name.as_bytes()));
	}

	let first = text
		.utf8_chunks()
		.next()
		.and_then(|chunk| chunk.valid().chars().next());
	match first {
		Some(first) if first.is_whitespace() => LineKind::Content,
		_ => LineKind::Boundary,
	}
}

/// Where the scan currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
	/// Not inside any filter section.
	Outside,
	/// Inside a section this run rewrites; its content is dropped.
	InManaged,
	/// Inside a filter section owned by someone else; copied as is.
	InOther,
}

impl ScanState {
	fn next(self, kind: &LineKind, rules: &RuleSet) -> ScanState {
		match kind {
			LineKind::FilterHeader(name) if rules.manages_name(name) => ScanState::InManaged,
			LineKind::FilterHeader(_) => ScanState::InOther,
			LineKind::Content => self,
			LineKind::Boundary => ScanState::Outside,
		}
	}
}

/// Compute the new `.gitconfig` contents.
///
/// Sections named by `rules` are dropped together with their indented content,
/// everything else is copied byte for byte. One section per rule is then
/// appended, in rule order, using the file's own line terminator. `None` means
/// the file does not exist yet.
pub fn rewrite_sections(existing: Option<&[u8]>, rules: &RuleSet) -> Vec<u8> {
	let existing = existing.unwrap_or_default();
	let eol = line_ending(existing);
	let mut out = Vec::with_capacity(existing.len());
	let mut state = ScanState::Outside;

	for (raw, text) in split_lines(existing) {
		let kind = classify(text);
		if let LineKind::FilterHeader(name) = &kind {
			tracing::debug!("Found filter {}", name);
		}

		state = state.next(&kind, rules);
		if state != ScanState::InManaged {
			push_raw_line(&mut out, raw, eol);
		}
	}

	for rule in rules {
		tracing::debug!("Adding filter {}", rule.name);
		for line in rule.config_lines() {
			push_line(&mut out, &line, eol);
		}
	}

	out
}

/// Bring the config file at `path` in line with `rules`.
pub fn update_sections_file(path: &Path, rules: &RuleSet) -> Result<EditOutcome> {
	let existing = read_existing(path)?;
	let outcome = match existing {
		Some(_) => {
			tracing::info!("A {} file already exists", path.display());
			EditOutcome::Updated
		}
		None => {
			tracing::info!("Creating {}", path.display());
			EditOutcome::Created
		}
	};

	let contents = rewrite_sections(existing.as_deref(), rules);
	replace_file(path, &contents)?;

	Ok(outcome)
}
