use crate::editors::{
	EditOutcome, line_ending, push_line, push_raw_line, read_existing, replace_file, split_lines,
};
use crate::error::Result;
use crate::rules::RuleSet;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

/// `<pattern> filter=<name>` at the start of a line.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\S+)\s+filter=(\S+)").expect("directive regex is valid")
});

/// A `.gitattributes` line as the editor sees it.
#[derive(Debug, PartialEq, Eq)]
enum AttributeLine<'a> {
	/// `<pattern> filter=<name>`
	Directive {
		pattern: Cow<'a, str>,
		filter: Cow<'a, str>,
	},
	/// Comments, blank lines, attributes without a filter.
	Other,
}

fn classify(text: &[u8]) -> AttributeLine<'_> {
	match DIRECTIVE.captures(text) {
		Some(caps) => match (caps.get(1), caps.get(2)) {
			(Some(pattern), Some(filter)) => AttributeLine::Directive {
				pattern: String::from_utf8_lossy(pattern.as_bytes()),
				filter: String::from_utf8_lossy(filter.as_bytes()),
			},
			_ => AttributeLine::Other,
		},
		None => AttributeLine::Other,
	}
}

/// Compute the new `.gitattributes` contents.
///
/// Every line of `existing` is kept byte for byte unless it is a filter
/// directive for a pattern owned by `rules`. One directive per rule is then
/// appended, in rule order, using the file's own line terminator. `None`
/// means the file does not exist yet.
pub fn rewrite_attributes(existing: Option<&[u8]>, rules: &RuleSet) -> Vec<u8> {
	let existing = existing.unwrap_or_default();
	let eol = line_ending(existing);
	let mut out = Vec::with_capacity(existing.len());

	for (raw, text) in split_lines(existing) {
		match classify(text) {
			AttributeLine::Directive { pattern, filter } if rules.manages_pattern(&pattern) => {
				tracing::debug!("Dropping old filter {} for {}", filter, pattern);
			}
			_ => push_raw_line(&mut out, raw, eol),
		}
	}

	for rule in rules {
		tracing::debug!("Adding filter {} for {}", rule.name, rule.pattern);
		push_line(&mut out, &rule.attribute_line(), eol);
	}

	out
}

/// Bring the attributes file at `path` in line with `rules`.
pub fn update_attributes_file(path: &Path, rules: &RuleSet) -> Result<EditOutcome> {
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

	let contents = rewrite_attributes(existing.as_deref(), rules);
	replace_file(path, &contents)?;

	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::TransformRule;

	fn test_rules() -> RuleSet {
		RuleSet::new(vec![
			TransformRule::new("*.csv", "bom_csv", Some("sed a"), Some("sed b")),
			TransformRule::new("*.gbr", "gerber", Some("sed c"), None),
		])
		.unwrap()
	}

	fn rewrite(existing: Option<&str>) -> String {
		let out = rewrite_attributes(existing.map(str::as_bytes), &test_rules());
		String::from_utf8(out).unwrap()
	}

	fn directive<'a>(pattern: &'a str, filter: &'a str) -> AttributeLine<'a> {
		AttributeLine::Directive {
			pattern: Cow::Borrowed(pattern),
			filter: Cow::Borrowed(filter),
		}
	}

	#[test]
	fn test_classify_directive() {
		assert_eq!(
			classify(b"*.csv filter=bom_csv"),
			directive("*.csv", "bom_csv")
		);
		assert_eq!(
			classify(b"*.csv\t filter=bom_csv -diff"),
			directive("*.csv", "bom_csv")
		);
	}

	#[test]
	fn test_classify_other_lines() {
		assert_eq!(classify(b""), AttributeLine::Other);
		assert_eq!(classify(b"# *.csv filter=x"), AttributeLine::Other);
		assert_eq!(classify(b"*.png binary"), AttributeLine::Other);
		assert_eq!(classify(b"*.csv text filter=x"), AttributeLine::Other);
		assert_eq!(classify(b"  *.csv filter=x"), AttributeLine::Other);
		assert_eq!(classify(b"*.csv filter="), AttributeLine::Other);
		assert_eq!(classify(b"\xff\xfe filter=x"), AttributeLine::Other);
	}

	#[test]
	fn test_new_file_lists_rules_in_order() {
		assert_eq!(rewrite(None), "*.csv filter=bom_csv\n*.gbr filter=gerber\n");
	}

	#[test]
	fn test_renamed_filter_is_replaced_at_end() {
		let existing = "*.csv filter=old_bom\n*.log filter=ignorelog\n";
		assert_eq!(
			rewrite(Some(existing)),
			"*.log filter=ignorelog\n*.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}

	#[test]
	fn test_unrelated_lines_preserved_in_order() {
		let existing = "# KiCad outputs\n\n*.png binary\n*.log  filter=ignorelog\n*.gbr filter=gerber\n*.pdf -diff\n";
		assert_eq!(
			rewrite(Some(existing)),
			"# KiCad outputs\n\n*.png binary\n*.log  filter=ignorelog\n*.pdf -diff\n\
			 *.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}

	#[test]
	fn test_duplicate_managed_lines_collapse() {
		let existing = "*.gbr filter=gerber\n*.gbr filter=gerber\n*.gbr filter=other\n";
		assert_eq!(rewrite(Some(existing)).matches("*.gbr filter=").count(), 1);
	}

	#[test]
	fn test_unterminated_last_line_kept_on_its_own_line() {
		assert_eq!(
			rewrite(Some("*.png binary")),
			"*.png binary\n*.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}

	#[test]
	fn test_crlf_file_stays_crlf() {
		let existing = "*.png binary\r\n*.csv filter=old\r\n*.md text";
		assert_eq!(
			rewrite(Some(existing)),
			"*.png binary\r\n*.md text\r\n*.csv filter=bom_csv\r\n*.gbr filter=gerber\r\n"
		);
	}

	#[test]
	fn test_non_utf8_lines_pass_through() {
		let existing: &[u8] = b"# Dise\xf1o placa\n*.pdf binary\n*.csv filter=old\n";
		let out = rewrite_attributes(Some(existing), &test_rules());
		assert_eq!(
			out,
			b"# Dise\xf1o placa\n*.pdf binary\n*.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}

	#[test]
	fn test_rewrite_is_idempotent() {
		let rules = test_rules();
		let existing: &[u8] = b"*.csv filter=old_bom\n# keep\r\n*.log filter=ignorelog\n*.gbr filter=gerber\n";
		let once = rewrite_attributes(Some(existing), &rules);
		let twice = rewrite_attributes(Some(once.as_slice()), &rules);
		assert_eq!(once, twice);
	}

	#[test]
	fn test_update_creates_missing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".gitattributes");

		let outcome = update_attributes_file(&path, &test_rules()).unwrap();

		assert_eq!(outcome, EditOutcome::Created);
		assert_eq!(
			std::fs::read_to_string(&path).unwrap(),
			"*.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}

	#[test]
	fn test_update_rewrites_existing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".gitattributes");
		std::fs::write(&path, "*.gbr filter=stale\n*.md text\n").unwrap();

		let rules = test_rules();
		let outcome = update_attributes_file(&path, &rules).unwrap();
		let first = std::fs::read_to_string(&path).unwrap();
		update_attributes_file(&path, &rules).unwrap();
		let second = std::fs::read_to_string(&path).unwrap();

		assert_eq!(outcome, EditOutcome::Updated);
		assert_eq!(first, "*.md text\n*.csv filter=bom_csv\n*.gbr filter=gerber\n");
		assert_eq!(first, second);
	}

	#[test]
	fn test_update_keeps_non_utf8_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".gitattributes");
		std::fs::write(&path, b"# Dise\xf1o\n").unwrap();

		let outcome = update_attributes_file(&path, &test_rules()).unwrap();

		assert_eq!(outcome, EditOutcome::Updated);
		assert_eq!(
			std::fs::read(&path).unwrap(),
			b"# Dise\xf1o\n*.csv filter=bom_csv\n*.gbr filter=gerber\n"
		);
	}
}
