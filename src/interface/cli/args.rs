use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nanokeep", version, about = "Disk usage, random numbers, atomic writes and a persistent secret")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report free and used space for the filesystem holding PATH
    Disk {
        /// Defaults to NANOKEEP_DISK_PATH
        path: Option<PathBuf>,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a cryptographically secure random 32-bit number
    Random,
    /// Atomically replace PATH with the contents of stdin
    Write {
        path: PathBuf,
        /// Octal permission bits, defaults to NANOKEEP_FILE_MODE
        #[arg(long, value_parser = parse_mode_arg)]
        mode: Option<u32>,
    },
    /// Read or regenerate the persistent secret
    Secret {
        /// Defaults to NANOKEEP_SECRET_PATH
        #[arg(long)]
        path: Option<PathBuf>,
        #[command(subcommand)]
        action: SecretAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SecretAction {
    /// Print the secret, creating it if needed
    Get,
    /// Replace the secret with a new random value
    Reset,
}

fn parse_mode_arg(s: &str) -> Result<u32, String> {
    nanokeep::config::parse_mode(s).ok_or_else(|| format!("invalid octal mode: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_with_mode() {
        let cli = Cli::try_parse_from(["nanokeep", "write", "/tmp/out", "--mode", "0600"]).unwrap();
        match cli.command {
            Command::Write { path, mode } => {
                assert_eq!(path, PathBuf::from("/tmp/out"));
                assert_eq!(mode, Some(0o600));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_mode() {
        assert!(Cli::try_parse_from(["nanokeep", "write", "/tmp/out", "--mode", "rw"]).is_err());
    }

    #[test]
    fn test_parse_secret_reset() {
        let cli = Cli::try_parse_from(["nanokeep", "secret", "--path", "/tmp/s", "reset"]).unwrap();
        match cli.command {
            Command::Secret { path, action } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/s")));
                assert!(matches!(action, SecretAction::Reset));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
