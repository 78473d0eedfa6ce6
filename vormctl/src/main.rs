use anyhow::Result;

mod utils;

mod cli;
mod config;
mod demo;
mod user;

#[cfg(test)]
pub mod test;

use cli::Commands;
use config::Config;

fn main() -> Result<()> {
    let config = Config::try_parse()?;

    env_logger::Builder::new()
        .filter_level(config.log_level_filter())
        .init();

    let Some(command) = config.command() else {
        anyhow::bail!("No command provided");
    };

    match command {
        Commands::User { .. } => user::run(&config)?,
        Commands::Demo { .. } => demo::run(&config)?,
        Commands::Reset { confirm } => {
            if !*confirm || !utils::confirm()? {
                anyhow::bail!("Reset requires confirmation");
            }

            let path = config.database_path();
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
    }

    Ok(())
}
