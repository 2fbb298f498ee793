use serde::Deserialize;

/// One managed filter: which files it applies to and what git runs on them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransformRule {
	/// Glob written as the first token of the `.gitattributes` directive.
	pub pattern: String,

	/// Filter name. Unique within a rule set.
	pub name: String,

	/// Command git runs when content is staged (`clean = ...`).
	#[serde(default)]
	pub clean: Option<String>,

	/// Command git runs when content is checked out (`smudge = ...`).
	#[serde(default)]
	pub smudge: Option<String>,
}

impl TransformRule {
	pub fn new(pattern: &str, name: &str, clean: Option<&str>, smudge: Option<&str>) -> Self {
		TransformRule {
			pattern: pattern.to_string(),
			name: name.to_string(),
			clean: clean.map(str::to_string),
			smudge: smudge.map(str::to_string),
		}
	}

	/// The `.gitattributes` line for this rule, without line terminator.
	pub fn attribute_line(&self) -> String {
		format!("{} filter={}", self.pattern, self.name)
	}

	/// The `.gitconfig` section for this rule, one entry per line without
	/// terminators: the header, then `clean` and `smudge` when present.
	pub fn config_lines(&self) -> Vec<String> {
		let mut lines = vec![format!("[filter \"{}\"]", self.name)];
		if let Some(ref clean) = self.clean {
			lines.push(format!("\tclean = {}", clean));
		}
		if let Some(ref smudge) = self.smudge {
			lines.push(format!("\tsmudge = {}", smudge));
		}
		lines
	}

	/// Pattern and name must be single non-empty tokens, otherwise the lines
	/// written for them are not recognized on the next run.
	fn validate(&self) -> crate::error::Result<()> {
		let fields = [("pattern", &self.pattern), ("name", &self.name)];

		for (field, value) in fields {
			if value.is_empty() {
				return Err(crate::error::FilterError::InvalidRule {
					name: self.name.clone(),
					reason: format!("{} is empty", field),
				});
			}
			if value.chars().any(char::is_whitespace) {
				return Err(crate::error::FilterError::InvalidRule {
					name: self.name.clone(),
					reason: format!("{} contains whitespace", field),
				});
			}
		}

		if self.name.contains('"') {
			return Err(crate::error::FilterError::InvalidRule {
				name: self.name.clone(),
				reason: "name contains a double quote".to_string(),
			});
		}

		Ok(())
	}
}

/// Ordered, validated collection of rules.
///
/// Construct through [`RuleSet::new`] or [`crate::rules::parse_rules_str`] so
/// the name uniqueness invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
	rules: Vec<TransformRule>,
}

impl RuleSet {
	/// Validate and wrap a list of rules, keeping their order.
	pub fn new(rules: Vec<TransformRule>) -> crate::error::Result<Self> {
		for (i, rule) in rules.iter().enumerate() {
			rule.validate()?;
			if rules[..i].iter().any(|earlier| earlier.name == rule.name) {
				return Err(crate::error::FilterError::DuplicateRuleName {
					name: rule.name.clone(),
				});
			}
		}
		Ok(RuleSet { rules })
	}

	pub fn iter(&self) -> std::slice::Iter<'_, TransformRule> {
		self.rules.iter()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Whether some rule owns this glob pattern.
	pub fn manages_pattern(&self, pattern: &str) -> bool {
		self.rules.iter().any(|rule| rule.pattern == pattern)
	}

	/// Whether some rule is named `name`.
	pub fn manages_name(&self, name: &str) -> bool {
		self.rules.iter().any(|rule| rule.name == name)
	}
}

impl<'a> IntoIterator for &'a RuleSet {
	type Item = &'a TransformRule;
	type IntoIter = std::slice::Iter<'a, TransformRule>;

	fn into_iter(self) -> Self::IntoIter {
		self.rules.iter()
	}
}
