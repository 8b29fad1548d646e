//! Short identifier generation.
//!
//! Ids are drawn from a 64-symbol URL-safe alphabet, so each character
//! carries exactly 6 bits and a 10-character id carries 60 bits. Randomness
//! comes from the operating system; if it is unavailable generation fails
//! instead of degrading to a predictable source.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

pub const URL_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub const DEFAULT_ID_LEN: usize = 10;

#[derive(Debug, Error)]
#[error("entropy source unavailable: {0}")]
pub struct IdError(pub String);

/// Produces public-facing identifiers. Implementations must be safe to share across tasks.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, IdError>;
}

/// OS-random ids of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct RandomIdGenerator {
    len: usize,
}

impl RandomIdGenerator {
    pub fn new(len: usize) -> Self { Self { len } }

    pub fn id_len(&self) -> usize { self.len }
}

impl Default for RandomIdGenerator {
    fn default() -> Self { Self::new(DEFAULT_ID_LEN) }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<String, IdError> {
        let mut buf = vec![0u8; self.len];
        OsRng.try_fill_bytes(&mut buf).map_err(|e| IdError(e.to_string()))?;
        // 64 symbols: masking the low 6 bits keeps the distribution uniform
        Ok(buf.iter().map(|b| URL_ALPHABET[(b & 63) as usize] as char).collect())
    }
}

/// Replays a fixed list of ids, then reports exhaustion. Used for
/// deterministic tests of collision handling.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    ids: Mutex<VecDeque<String>>,
}

impl SequenceIdGenerator {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { ids: Mutex::new(ids.into_iter().map(Into::into).collect()) }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn generate(&self) -> Result<String, IdError> {
        let mut ids = self.ids.lock().unwrap_or_else(|p| p.into_inner());
        ids.pop_front().ok_or_else(|| IdError("id sequence exhausted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_length_is_ten() {
        let id = RandomIdGenerator::default().generate().unwrap();
        assert_eq!(id.len(), 10);
    }

    #[test]
    fn only_url_safe_symbols() {
        let g = RandomIdGenerator::new(64);
        for _ in 0..200 {
            let id = g.generate().unwrap();
            assert_eq!(id.len(), 64);
            assert!(id.bytes().all(|b| URL_ALPHABET.contains(&b)), "unexpected symbol in {id}");
        }
    }

    #[test]
    fn ten_thousand_ids_are_distinct() {
        let g = RandomIdGenerator::default();
        let ids: HashSet<String> = (0..10_000).map(|_| g.generate().unwrap()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn alphabet_has_no_repeats() {
        let set: HashSet<u8> = URL_ALPHABET.iter().copied().collect();
        assert_eq!(set.len(), 64);
    }

    #[test]
    fn sequence_replays_then_fails() {
        let g = SequenceIdGenerator::new(["a", "b"]);
        assert_eq!(g.generate().unwrap(), "a");
        assert_eq!(g.generate().unwrap(), "b");
        assert!(g.generate().is_err());
    }

    #[test]
    fn concurrent_generation_from_threads() {
        let g = std::sync::Arc::new(RandomIdGenerator::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = std::sync::Arc::clone(&g);
                std::thread::spawn(move || (0..250).map(|_| g.generate().unwrap()).collect::<Vec<_>>())
            })
            .collect();
        let all: HashSet<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(all.len(), 1_000);
    }
}
