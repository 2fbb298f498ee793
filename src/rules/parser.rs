use crate::error::{FilterError, Result};
use crate::rules::types::{RuleSet, TransformRule};
use serde::Deserialize;

/// The KiCad rule table, compiled into the binary.
const KICAD_RULES: &str = include_str!("kicad.toml");

/// On-disk shape of a rule table: an array of `[[filters]]` tables.
#[derive(Debug, Default, Deserialize)]
struct RuleTable {
	#[serde(default)]
	filters: Vec<TransformRule>,
}

/// Parse and validate a rule table. `origin` names the source in errors.
pub fn parse_rules_str(content: &str, origin: &str) -> Result<RuleSet> {
	let table: RuleTable =
		toml::from_str(content).map_err(|source| FilterError::RulesParseError {
			origin: origin.to_string(),
			source,
		})?;

	RuleSet::new(table.filters)
}

impl RuleSet {
	/// The built-in KiCad filters.
	pub fn kicad() -> Result<RuleSet> {
		parse_rules_str(KICAD_RULES, "built-in kicad.toml")
	}
}
