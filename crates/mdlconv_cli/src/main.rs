#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "mdlconv", about = "MDL model inspection and scene assembly tools")]
struct Cli {
	/// Log decoder diagnostics at debug level (`RUST_LOG` still takes precedence).
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show header fields and the top-level block layout of one file.
	Info(cmd::info::Args),
	/// Load files in order into one scene and print its frames and meshes.
	Scene(cmd::scene::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> mdlconv::mdl::Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Scene(args) => cmd::scene::run(args),
	}
}

fn init_logging(verbose: bool) {
	let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
	env_logger::builder().filter_level(level).parse_default_env().init();
}
