//! The managed filter table.
//!
//! This module handles:
//! - Rule and rule set types
//! - Parsing and validating TOML rule tables
//! - The built-in KiCad table

pub mod parser;
pub mod types;

pub use parser::parse_rules_str;
pub use types::{RuleSet, TransformRule};
