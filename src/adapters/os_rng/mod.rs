use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::EntropySource;

/// Entropy from the operating system CSPRNG (getrandom(2) on Linux)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}
