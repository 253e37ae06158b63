/// Port for a cryptographically secure byte source
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely or fail; never returns partially filled output
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}
