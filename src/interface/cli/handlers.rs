use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use nanokeep::{disk_info, overwrite, random_number, Config, DiskInfo, Secret};

use super::args::{Cli, Command, SecretAction};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Report for `nanokeep disk --json`
#[derive(Debug, Serialize)]
pub struct DiskResponse {
    pub timestamp: String,
    pub path: PathBuf,
    pub free_bytes: u64,
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub free_gb: u64,
    pub used_gb: u64,
    pub total_gb: u64,
    /// `null` for a zero-sized filesystem
    pub used_percent: Option<f64>,
}

impl DiskResponse {
    fn new(path: &Path, info: &DiskInfo) -> Self {
        let used_percent = info.used_percent();
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            path: path.to_path_buf(),
            free_bytes: info.free(),
            used_bytes: info.used(),
            total_bytes: info.total(),
            free_gb: info.free_gb(),
            used_gb: info.used_gb(),
            total_gb: info.total_gb(),
            used_percent: (!used_percent.is_nan()).then_some(used_percent),
        }
    }
}

/// Dispatch a parsed command line
pub fn run(cli: &Cli, config: &Config, input: &mut dyn Read, out: &mut dyn Write) -> HandlerResult {
    match &cli.command {
        Command::Disk { path, json } => {
            let path = path.as_deref().unwrap_or(&config.disk_path);
            disk_handler(path, *json, out)
        }
        Command::Random => random_handler(out),
        Command::Write { path, mode } => {
            write_handler(path, mode.unwrap_or(config.file_mode), input)
        }
        Command::Secret { path, action } => {
            let path = path.as_deref().unwrap_or(&config.secret_path);
            secret_handler(path, *action, out)
        }
    }
}

fn disk_handler(path: &Path, json: bool, out: &mut dyn Write) -> HandlerResult {
    let info = disk_info(path)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &DiskResponse::new(path, &info))?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{}: {} MB free, {} MB used, {} MB total ({:.2}% used)",
            path.display(),
            info.free_mb(),
            info.used_mb(),
            info.total_mb(),
            info.used_percent()
        )?;
    }
    Ok(())
}

fn random_handler(out: &mut dyn Write) -> HandlerResult {
    writeln!(out, "{}", random_number()?)?;
    Ok(())
}

fn write_handler(path: &Path, mode: u32, input: &mut dyn Read) -> HandlerResult {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    overwrite(path, &data, mode)?;
    info!(path = %path.display(), bytes = data.len(), mode = %format!("{:o}", mode), "file replaced");
    Ok(())
}

fn secret_handler(path: &Path, action: SecretAction, out: &mut dyn Write) -> HandlerResult {
    // Nothing downstream can run without a secret; main reports this and exits
    let secret = Secret::new(path).map_err(|e| {
        format!("secret at {} could not be initialised: {}", path.display(), e)
    })?;

    match action {
        SecretAction::Get => {}
        SecretAction::Reset => {
            secret.reset()?;
            info!(path = %path.display(), "secret reset");
        }
    }

    writeln!(out, "{}", secret.get()?)?;
    Ok(())
}
