#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "lsfdoc", about = "Larian LSF table inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Table counts and layout.
	Info(cmd::info::Args),
	/// Print the rebuilt forest or one subtree.
	Tree(cmd::tree::Args),
	/// Read named fields across a sibling run.
	Scan(cmd::scan::Args),
	/// Index asset banks across files.
	Assets(cmd::assets::Args),
	/// Index root templates across files.
	Templates(cmd::templates::Args),
	/// Resolve an attribute through parent templates.
	Inherit(cmd::inherit::Args),
}

fn main() {
	init_logging();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging() {
	let filter = EnvFilter::try_from_env("LSFDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn run() -> lsfdoc::lsf::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Tree(args) => cmd::tree::run(args),
		Commands::Scan(args) => cmd::scan::run(args),
		Commands::Assets(args) => cmd::assets::run(args),
		Commands::Templates(args) => cmd::templates::run(args),
		Commands::Inherit(args) => cmd::inherit::run(args),
	}
}
