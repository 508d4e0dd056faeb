use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use visitor_types::models::{Message, VisitorCount};

/// A named unit of cacheable server state and the type stored under it.
pub trait QueryKey: 'static {
    const NAME: &'static str;
    type Value: Clone + Send + Sync + 'static;
}

pub struct VisitorCountKey;

impl QueryKey for VisitorCountKey {
    const NAME: &'static str = "visitorCount";
    type Value = VisitorCount;
}

/// Newest first, as returned by the server.
pub struct MessagesKey;

impl QueryKey for MessagesKey {
    const NAME: &'static str = "messages";
    type Value = Vec<Message>;
}

/// What a view sees for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus<T> {
    /// No data yet: never fetched, invalidated, or first fetch in flight.
    Loading,
    /// The latest fetch failed.
    Error(String),
    Ready(T),
}

/// Issued when a fetch starts; only the newest ticket per key may settle it.
#[must_use]
pub struct FetchTicket<K: QueryKey> {
    generation: u64,
    _key: PhantomData<K>,
}

#[derive(Default)]
struct Entry {
    data: Option<Box<dyn Any + Send + Sync>>,
    error: Option<String>,
    fetching: bool,
    generation: u64,
}

impl Entry {
    fn value<T: Clone + 'static>(&self) -> Option<T> {
        self.data.as_ref()?.downcast_ref::<T>().cloned()
    }

    fn take<T: 'static>(&mut self) -> Option<T> {
        self.data.take()?.downcast::<T>().ok().map(|b| *b)
    }
}

/// Client-side copy of server state, keyed by logical resource name.
///
/// Not authoritative: mutations patch it from their responses and a later
/// fetch overwrites whatever is there. Every change bumps a revision that
/// views can watch to know when to redraw.
pub struct QueryCache {
    entries: Mutex<HashMap<&'static str, Entry>>,
    revision: watch::Sender<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: Mutex::new(HashMap::new()),
            revision,
        }
    }

    pub fn get<K: QueryKey>(&self) -> Option<K::Value> {
        self.lock().get(K::NAME).and_then(|e| e.value::<K::Value>())
    }

    pub fn status<K: QueryKey>(&self) -> QueryStatus<K::Value> {
        let entries = self.lock();
        let Some(entry) = entries.get(K::NAME) else {
            return QueryStatus::Loading;
        };

        if entry.fetching && entry.data.is_none() {
            return QueryStatus::Loading;
        }
        if let Some(error) = &entry.error {
            return QueryStatus::Error(error.clone());
        }
        match entry.value::<K::Value>() {
            Some(value) => QueryStatus::Ready(value),
            None => QueryStatus::Loading,
        }
    }

    /// Overwrite the entry.
    pub fn set<K: QueryKey>(&self, value: K::Value) {
        self.write::<K>(|entry| {
            entry.data = Some(Box::new(value));
            entry.error = None;
        });
    }

    /// Replace the entry with `f(current)`.
    pub fn update<K: QueryKey>(&self, f: impl FnOnce(Option<K::Value>) -> K::Value) {
        self.write::<K>(|entry| {
            let next = f(entry.take::<K::Value>());
            entry.data = Some(Box::new(next));
            entry.error = None;
        });
    }

    /// Drop the entry's data and orphan any fetch already in flight.
    pub fn invalidate<K: QueryKey>(&self) {
        self.write::<K>(|entry| {
            entry.data = None;
            entry.error = None;
            entry.fetching = false;
            entry.generation += 1;
        });
    }

    pub fn begin_fetch<K: QueryKey>(&self) -> FetchTicket<K> {
        let mut generation = 0;
        self.write::<K>(|entry| {
            entry.generation += 1;
            entry.fetching = true;
            generation = entry.generation;
        });

        FetchTicket {
            generation,
            _key: PhantomData,
        }
    }

    /// Settle a fetch. Returns `false` and leaves the entry untouched when a
    /// newer fetch or an invalidation superseded this ticket.
    pub fn finish_fetch<K: QueryKey>(
        &self,
        ticket: FetchTicket<K>,
        result: Result<K::Value, String>,
    ) -> bool {
        let mut entries = self.lock();
        let entry = entries.entry(K::NAME).or_default();
        if entry.generation != ticket.generation {
            return false;
        }

        entry.fetching = false;
        match result {
            Ok(value) => {
                entry.data = Some(Box::new(value));
                entry.error = None;
            }
            Err(error) => entry.error = Some(error),
        }
        drop(entries);

        self.bump();
        true
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn write<K: QueryKey>(&self, f: impl FnOnce(&mut Entry)) {
        f(self.lock().entry(K::NAME).or_default());
        self.bump();
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
