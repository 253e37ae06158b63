use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{AtomicFile, OsEntropy};
use crate::domain::{decode_secret, encode_secret};
use crate::error::{Error, Result};
use crate::ports::EntropySource;

use super::random::random_number_from;

const TEMP_PREFIX: &str = ".tmpsecret";
const SECRET_MODE: u32 = 0o600;

/// A random value persisted in a single file.
///
/// The file is the only source of truth: nothing is cached, so every [`get`]
/// re-reads it and a [`reset`] from another process is picked up immediately.
///
/// [`get`]: Secret::get
/// [`reset`]: Secret::reset
#[derive(Clone)]
pub struct Secret {
    path: PathBuf,
    entropy: Arc<dyn EntropySource>,
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret").field("path", &self.path).finish()
    }
}

impl Secret {
    /// Open the secret at `path`, creating the file if it does not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_entropy(path, Arc::new(OsEntropy))
    }

    pub fn with_entropy(path: impl Into<PathBuf>, entropy: Arc<dyn EntropySource>) -> Result<Self> {
        let secret = Self {
            path: path.into(),
            entropy,
        };
        secret.get()?;
        Ok(secret)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current value with surrounding whitespace removed.
    ///
    /// A missing file is initialised through [`Secret::reset`] first.
    pub fn get(&self) -> Result<String> {
        match fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "secret missing, generating");
                self.reset()?;
            }
            Err(e) => return Err(Error::io("stat", &self.path, e)),
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| Error::io("read", &self.path, e))?;
        Ok(decode_secret(&content).to_string())
    }

    /// Replace the stored value with a fresh random number.
    ///
    /// The previous value stays in place if any step fails.
    pub fn reset(&self) -> Result<()> {
        let value = random_number_from(self.entropy.as_ref())?;

        let mut file = AtomicFile::with_prefix(&self.path, TEMP_PREFIX)?;
        file.write_all(encode_secret(value).as_bytes())?;
        file.commit(SECRET_MODE)?;

        debug!(path = %self.path.display(), "secret written");
        Ok(())
    }
}
