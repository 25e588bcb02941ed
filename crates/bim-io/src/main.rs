use bim_io::cli::{run_eval_command, run_select_command, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Select(args) => run_select_command(args)?,
        Commands::Eval(args) => run_eval_command(args)?,
    }

    Ok(())
}
