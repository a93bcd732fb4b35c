use std::collections::HashSet;
use std::sync::Mutex;

/// Shared registry of entry ids already dispatched to counting
///
/// Many workers race on the same entry when a movie reaches the queue both
/// with a direct IMDB id and via a title search. Membership test and insert
/// are a single atomic operation so exactly one worker wins.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: Mutex<HashSet<String>>,
}

impl DedupRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records an entry id, returning true if it was new
    ///
    /// The insert happens before any work is done on the entry, so a
    /// duplicate dispatched moments later is still caught.
    pub fn claim(&self, entry_id: &str) -> bool {
        self.seen
            .lock()
            .expect("dedup registry lock poisoned")
            .insert(entry_id.to_string())
    }

    /// Membership test without claiming
    ///
    /// Used by the resolve handler to skip the search entirely when another
    /// worker has already claimed the entry.
    pub fn contains(&self, entry_id: &str) -> bool {
        self.seen
            .lock()
            .expect("dedup registry lock poisoned")
            .contains(entry_id)
    }

    /// Number of claimed entries
    pub fn len(&self) -> usize {
        self.seen.lock().expect("dedup registry lock poisoned").len()
    }

    /// Returns whether no entry has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_is_idempotent() {
        let registry = DedupRegistry::new();

        assert!(registry.claim("771312089"));
        assert!(!registry.claim("771312089"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_contains_does_not_claim() {
        let registry = DedupRegistry::new();

        assert!(!registry.contains("771312089"));
        assert!(registry.claim("771312089"));
        assert!(registry.contains("771312089"));
    }

    #[tokio::test]
    async fn test_concurrent_claims_yield_one_winner() {
        let registry = Arc::new(DedupRegistry::new());

        let mut handles = Vec::new();
        for _ in 0..32 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move { registry.claim("same-entry") }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(registry.len(), 1);
    }
}
