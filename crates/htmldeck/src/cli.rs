use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "htmldeck")]
#[command(author, version, about)]
#[command(long_about = "Turn a scrollable HTML document into a slide deck.\n\n\
    Slides are separated by <hr class=\"slide-sep\"> inside the .wrap container.\n\n\
    Examples:\n  \
    htmldeck talk.html                  Present fullscreen\n  \
    htmldeck talk.html --windowed       Present in a window\n  \
    htmldeck build talk.html -o out.html  Write the deck markup")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// HTML file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restructure a document into deck markup
    Build {
        /// HTML file to restructure
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. navigation.wheel_threshold, selectors.container)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Log filter implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Build { file, output }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::build::run(&file, output.as_deref(), self.quiet)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("htmldeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, self.windowed)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_present_file() {
        let cli = Cli::try_parse_from(["htmldeck", "talk.html", "--windowed"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("talk.html")));
        assert!(cli.windowed);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_build_args() {
        let cli =
            Cli::try_parse_from(["htmldeck", "build", "talk.html", "-o", "out.html"]).unwrap();
        match cli.command {
            Some(Commands::Build { file, output }) => {
                assert_eq!(file, PathBuf::from("talk.html"));
                assert_eq!(output, Some(PathBuf::from("out.html")));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["htmldeck", "version", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
        let cli = Cli::try_parse_from(["htmldeck", "version", "-q", "-v"]).unwrap();
        assert_eq!(cli.log_level(), "error");
        let cli = Cli::try_parse_from(["htmldeck", "version"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
    }
}
