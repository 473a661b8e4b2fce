//! Generation counter used to detect superseded loads.
//!
//! Every load-starting operation calls [`LoadSequencer::begin`] and keeps the
//! returned [`LoadToken`]. Before committing anything after an `.await`, it
//! asks [`LoadSequencer::is_current`]; a newer `begin` makes the old token
//! stale and the operation backs out.

use crate::error::{PlaybackError, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct LoadSequencer {
    generation: AtomicU64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating every earlier token.
    pub fn begin(&self) -> LoadToken {
        LoadToken(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        self.current() == token.0
    }

    /// `Err(Superseded)` once a newer load has begun.
    pub fn check(&self, token: LoadToken) -> Result<()> {
        let latest = self.current();
        if latest == token.0 {
            Ok(())
        } else {
            Err(PlaybackError::Superseded {
                token: token.0,
                latest,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn tokens_increase() {
        let sequencer = LoadSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();
        assert!(second > first);
        assert_eq!(second.value(), 2);
        assert_eq!(sequencer.current(), 2);
    }

    #[test]
    fn only_latest_is_current() {
        let sequencer = LoadSequencer::new();
        let first = sequencer.begin();
        assert!(sequencer.is_current(first));

        let second = sequencer.begin();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));

        match sequencer.check(first) {
            Err(PlaybackError::Superseded { token, latest }) => {
                assert_eq!(token, 1);
                assert_eq!(latest, 2);
            }
            other => panic!("expected Superseded, got {:?}", other),
        }
        assert!(sequencer.check(second).is_ok());
    }

    #[test]
    fn concurrent_begins_are_unique() {
        let sequencer = Arc::new(LoadSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequencer = Arc::clone(&sequencer);
                std::thread::spawn(move || (0..100).map(|_| sequencer.begin().value()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(sequencer.current(), 800);
    }
}
