use anyhow::Result;
use replorer::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
