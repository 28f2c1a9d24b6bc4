//! Identifier generation for tasks and subtasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Yields candidate identifiers. The store re-draws on collision, so a
/// generator only needs to be unlikely to repeat, not guaranteed unique.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Short random ids: the first 8 hex digits of a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }
}

/// Deterministic ids `<prefix>1`, `<prefix>2`, ... Clones share the counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_short_hex() {
        let id = RandomIds.next_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIds::new("t");
        assert_eq!(ids.next_id(), "t1");
        assert_eq!(ids.clone().next_id(), "t2");
        assert_eq!(ids.next_id(), "t3");
    }
}
