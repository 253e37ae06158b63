use crate::adapters::OsEntropy;
use crate::error::Result;
use crate::ports::EntropySource;

/// Cryptographically secure random `u32` from the OS CSPRNG
pub fn random_number() -> Result<u32> {
    random_number_from(&OsEntropy)
}

/// Draw four bytes from `source` and read them as a little-endian `u32`
pub fn random_number_from(source: &dyn EntropySource) -> Result<u32> {
    let mut bytes = [0u8; 4];
    source.fill_bytes(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
