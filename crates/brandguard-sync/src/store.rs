//! In-memory holder for the two synchronized collections.
//!
//! The store exposes exactly two mutations, [`SyncStore::replace`] and
//! [`SyncStore::prepend`]. It never sorts, filters, deduplicates or truncates:
//! both collections grow for as long as the session lives.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use brandguard_core::{Alert, Mention};
use tokio::sync::watch;

/// A whole collection, as delivered by the snapshot load.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Mentions(Vec<Mention>),
    Alerts(Vec<Alert>),
}

/// A single item, as delivered by one push frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Mention(Mention),
    Alert(Alert),
}

#[derive(Debug, Default)]
struct Collections {
    mentions: VecDeque<Mention>,
    alerts: VecDeque<Alert>,
}

/// Owner of the `mentions` and `alerts` collections.
///
/// Shared as `Arc<SyncStore>` between the loader, the stream connector and
/// readers. Each mutation is one short critical section followed by a bump of
/// the revision counter, which readers can await via [`SyncStore::subscribe`].
#[derive(Debug)]
pub struct SyncStore {
    collections: RwLock<Collections>,
    revision: watch::Sender<u64>,
}

impl Default for SyncStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncStore {
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            collections: RwLock::new(Collections::default()),
            revision,
        }
    }

    /// Replaces one collection wholesale, keeping the given order.
    pub fn replace(&self, batch: Batch) {
        {
            let mut collections = self
                .collections
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match batch {
                Batch::Mentions(items) => collections.mentions = items.into(),
                Batch::Alerts(items) => collections.alerts = items.into(),
            }
        }
        self.bump();
    }

    /// Inserts one item at the front of its collection.
    pub fn prepend(&self, item: Item) {
        {
            let mut collections = self
                .collections
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match item {
                Item::Mention(mention) => collections.mentions.push_front(mention),
                Item::Alert(alert) => collections.alerts.push_front(alert),
            }
        }
        self.bump();
    }

    /// Current mentions, newest live item first.
    #[must_use]
    pub fn mentions(&self) -> Vec<Mention> {
        self.read(|c| c.mentions.iter().cloned().collect())
    }

    /// Current alerts, newest live item first.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.read(|c| c.alerts.iter().cloned().collect())
    }

    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.read(|c| c.mentions.len())
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.read(|c| c.alerts.len())
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Returns a receiver that is notified after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> T {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&collections)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
