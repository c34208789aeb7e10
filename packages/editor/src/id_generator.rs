use crc32fast::Hasher;

/// Derive an id seed from a document name using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator scoped to one open document.
///
/// The counter only moves forward. It is not part of undo history, so an id
/// handed out once is never handed out again by the same generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(document_name: &str) -> Self {
        Self::from_seed(get_document_seed(document_name))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        match self.count.checked_add(1) {
            Some(next) => self.count = next,
            None => {
                // Counter exhausted: continue under a derived seed
                self.seed.push('x');
                self.count = 1;
            }
        }
        format!("{}-{}", self.seed, self.count)
    }

    /// Advance the counter past an id minted from the same seed, so that a
    /// loaded document does not collide with ids generated afterwards.
    pub fn observe(&mut self, id: &str) {
        let Some(suffix) = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return;
        };
        match suffix.parse::<u64>() {
            // The last value would leave nothing to count up to
            Ok(u64::MAX) => {}
            Ok(n) => self.count = self.count.max(n),
            Err(_) => {}
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
