use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use kicad_git_filters::exec::resolve_command;
use kicad_git_filters::repo::{
	ATTRIBUTES_FILE, CONFIG_FILE, ensure_repo_root, install, register_config_include,
};
use kicad_git_filters::rules::RuleSet;

/// Not started from the top of a git working copy.
const EXIT_NO_GIT_ROOT: u8 = 1;
/// No `git` executable on PATH.
const EXIT_MISSING_GIT: u8 = 2;
/// Any other fatal error.
const EXIT_FAILURE: u8 = 3;

const VERSION_INFO: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	" - Copyright 2020, INTI - License: GPL 2.0"
);

#[derive(Parser)]
#[command(name = "kicad-git-filters")]
#[command(
	version = VERSION_INFO,
	about = "Configures a git repository to filter volatile dates out of KiCad files"
)]
struct Cli {
	/// Increase log verbosity (-v for info, -vv for debug)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,

	/// Print the managed filters and exit without touching the repository
	#[arg(long)]
	list: bool,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(&cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::from(EXIT_FAILURE)
		}
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};

	// RUST_LOG wins over -v when set
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
	let rules = RuleSet::kicad().context("Failed to load the built-in filter table")?;

	if cli.list {
		print_rules(&rules);
		return Ok(ExitCode::SUCCESS);
	}

	let Some(git) = resolve_command("git") else {
		tracing::error!("No git command, install it");
		return Ok(ExitCode::from(EXIT_MISSING_GIT));
	};

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	if let Err(e) = ensure_repo_root(&cwd) {
		tracing::error!("{e}; run this from the root of your repo");
		return Ok(ExitCode::from(EXIT_NO_GIT_ROOT));
	}

	register_config_include(&git, &cwd)
		.with_context(|| format!("Failed to register {} with git", CONFIG_FILE))?;

	let report = install(&cwd, &rules).context("Failed to install the filters")?;
	tracing::info!(
		"{} {:?}, {} {:?}",
		ATTRIBUTES_FILE,
		report.attributes,
		CONFIG_FILE,
		report.config
	);

	Ok(ExitCode::SUCCESS)
}

fn print_rules(rules: &RuleSet) {
	for (i, rule) in rules.iter().enumerate() {
		println!("Filter {}: {}", i + 1, rule.name);
		println!("  pattern: {}", rule.pattern);
		if let Some(ref clean) = rule.clean {
			println!("  clean: {}", clean);
		}
		if let Some(ref smudge) = rule.smudge {
			println!("  smudge: {}", smudge);
		}
		println!();
	}
}
