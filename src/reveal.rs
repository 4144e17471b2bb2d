use std::collections::HashSet;

/// One-shot animations that have already played this session.
///
/// Owned by the desktop and handed to whatever needs it. Lives until the
/// process exits; `reset` exists for tests and a full restart.
#[derive(Debug, Default, Clone)]
pub struct RevealStore {
    played: HashSet<String>,
}

impl RevealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_played(&self, key: &str) -> bool {
        self.played.contains(key)
    }

    /// Record `key`; returns true the first time only
    pub fn mark_played(&mut self, key: &str) -> bool {
        if self.played.contains(key) {
            return false;
        }
        tracing::debug!(target: "cypher_desktop::reveal", key, "animation played");
        self.played.insert(key.to_string())
    }

    pub fn reset(&mut self) {
        self.played.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_once_until_reset() {
        let mut store = RevealStore::new();
        assert!(!store.has_played("terminal.boot"));
        assert!(store.mark_played("terminal.boot"));
        assert!(!store.mark_played("terminal.boot"));
        assert!(store.has_played("terminal.boot"));

        store.reset();
        assert!(!store.has_played("terminal.boot"));
        assert!(store.mark_played("terminal.boot"));
    }
}
