//! web3peek - check a local node, print its latest block and accounts.

use clap::Parser;
use web3peek_cli::commands::{self, Cli, Commands};
use web3peek_cli::{output, telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let filter = telemetry::build_filter(cli.log_level.as_deref(), cli.verbose)?;
    telemetry::init_telemetry(filter, cli.log_json)?;

    let ctx = commands::Context::from_cli(&cli)?;
    let command = cli.command.unwrap_or(Commands::Probe);

    let out = commands::execute(command, &ctx).await?;
    print!("{}", out);

    Ok(())
}
