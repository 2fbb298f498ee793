//! kicad-git-filters - keep volatile KiCad dates out of git history.
//!
//! KiCad stamps BoMs, Gerbers, netlists and board files with generation dates
//! and tool versions. This library installs git `clean`/`smudge` filters that
//! normalize those fields on checkin and restore them on checkout:
//! - `.gitattributes` maps each file pattern to a filter name
//! - `.gitconfig` defines each filter's `sed` commands
//!
//! Both files are edited idempotently; lines and sections the user added are
//! left alone.
//!
//! # Example
//!
//! ```no_run
//! use kicad_git_filters::repo::{ensure_repo_root, install};
//! use kicad_git_filters::rules::RuleSet;
//!
//! let root = std::env::current_dir().unwrap();
//! ensure_repo_root(&root).unwrap();
//!
//! let rules = RuleSet::kicad().unwrap();
//! let report = install(&root, &rules).unwrap();
//! println!("{:?}", report);
//! ```

pub mod editors;
pub mod error;
pub mod exec;
pub mod repo;
pub mod rules;

pub use error::{FilterError, Result};
