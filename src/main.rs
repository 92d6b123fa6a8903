use clap::Parser;

use secret_guard::cli::{Cli, Commands};
use secret_guard::commands::{run_report, run_snapshot};

fn init_logging(cli: &Cli) {
    // RUST_LOG takes precedence; -v / -vv raise the default level.
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match &cli.command {
        Commands::Report(args) => run_report(args, &cli),
        Commands::Snapshot(args) => run_snapshot(args, &cli),
    };

    std::process::exit(exit_code);
}
