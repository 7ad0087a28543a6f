use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = demodeck::cli::Cli::parse();

    match cli.command.clone() {
        Some(demodeck::cli::CliCommand::Tui) | None => {
            let config = demodeck::config::from_cli(&cli)?;
            demodeck::tui::run(config)?;
        }
        Some(command) => {
            let config = demodeck::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            demodeck::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
