use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let exists = path.exists();
    let config = if exists {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    println!("{} {}", "Config file:".bold(), path.display());
    if !exists {
        println!("{}", "  (not created yet, showing defaults)".dimmed());
    }
    println!();

    let thresholds = config.thresholds();
    println!("{}", "navigation".cyan().bold());
    println!("  wheel_threshold: {}", thresholds.wheel);
    println!("  touch_threshold: {}", thresholds.touch);
    println!("{}", "selectors".cyan().bold());
    println!("  container: {}", config.container_selector());
    println!("  separator: {}", config.separator_selector());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = match Config::path() {
        Ok(path) if path.exists() => Config::load_from(&path)?,
        _ => Config::default(),
    };
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}
