use crate::config::{Config, ConfigFile, PROJECT_CONFIG_FILE};
use crate::error::Result;
use crate::runner::Runner;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phpcs-runner")]
#[command(about = "Run PHP_CodeSniffer over a project or its changed files, with an optional PHPCBF fix pass")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root (working directory for phpcs and phpcbf)
    #[arg(long, global = true)]
    pub repo_root: Option<PathBuf>,

    /// Directory containing the phpcs and phpcbf binaries
    #[arg(long, global = true)]
    pub bin_dir: Option<PathBuf>,

    /// Never prompt; print a hint instead of offering to run PHPCBF
    #[arg(long, short = 'n', global = true)]
    pub no_interaction: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run PHPCS against all configured filesets
    #[command(name = "validate:phpcs")]
    ValidatePhpcs,

    /// Run PHPCS against the directories containing the given files
    #[command(name = "validate:phpcs:files")]
    ValidatePhpcsFiles {
        /// Newline-separated list of files, or `-` to read it from stdin
        file_list: String,
    },

    /// Fix coding standards violations with PHPCBF
    #[command(name = "fix:phpcbf")]
    FixPhpcbf,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,

    /// Write a default phpcs-runner.toml
    Init {
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// 执行子命令，返回进程退出码
    pub fn execute(self) -> Result<i32> {
        match self.command {
            Commands::ValidatePhpcs => {
                tracing::debug!("Validating all filesets");
                self.runner()?.run_all()?;
                Ok(0)
            }
            Commands::ValidatePhpcsFiles { ref file_list } => {
                let file_list = if file_list == "-" {
                    std::io::read_to_string(std::io::stdin())?
                } else {
                    file_list.clone()
                };
                self.runner()?.run_on_files(&file_list)
            }
            Commands::FixPhpcbf => {
                tracing::debug!("Fixing violations with PHPCBF");
                self.runner()?.fix()?;
                Ok(0)
            }
            Commands::Config { ref command } => match command {
                ConfigCommands::Show => {
                    let config = self.load_config()?;
                    print!("{}", config.to_toml()?);
                    Ok(0)
                }
                ConfigCommands::Init { force } => {
                    let path = match &self.config {
                        Some(path) => path.clone(),
                        None => std::env::current_dir()?.join(PROJECT_CONFIG_FILE),
                    };
                    ConfigFile::template().save(&path, *force)?;
                    println!("Wrote {}", path.display());
                    Ok(0)
                }
            },
        }
    }

    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            repo_root: self
                .repo_root
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            bin_dir: self
                .bin_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            ..ConfigFile::default()
        }
    }

    fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref(), &self.overrides())
    }

    fn runner(&self) -> Result<Runner> {
        let config = self.load_config()?;
        tracing::debug!("Resolved config: {:?}", config);
        Ok(Runner::new(config, self.no_interaction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_colon_subcommands_and_global_flags() {
        let cli = Cli::parse_from([
            "phpcs-runner",
            "validate:phpcs:files",
            "-n",
            "--bin-dir",
            "tools/bin",
            "a/b/c.php\nd/e.php",
        ]);

        assert!(cli.no_interaction);
        assert_eq!(cli.bin_dir, Some(PathBuf::from("tools/bin")));
        match cli.command {
            Commands::ValidatePhpcsFiles { ref file_list } => {
                assert_eq!(file_list, "a/b/c.php\nd/e.php")
            }
            _ => panic!("expected validate:phpcs:files"),
        }
        assert_eq!(cli.overrides().bin_dir.as_deref(), Some("tools/bin"));
    }

    #[test]
    fn parses_fix_command() {
        let cli = Cli::parse_from(["phpcs-runner", "fix:phpcbf"]);

        assert!(matches!(cli.command, Commands::FixPhpcbf));
        assert!(!cli.no_interaction);
    }
}
