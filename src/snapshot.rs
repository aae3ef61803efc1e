use std::fmt;
use std::fmt::Display;

/// A single key-value pair known to this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    #[allow(missing_docs)]
    pub key: String,
    #[allow(missing_docs)]
    pub value: String,
}

impl Entry {
    #[allow(missing_docs)]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Entry {
        Entry {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.key, self.value)
    }
}

/// Ordered, in-memory view of the keys touched during a session.
///
/// Entries keep their insertion order. Updating an existing key replaces its value in
/// place, so a rendered row never moves. At most one entry exists per key.
///
/// Lookups are a linear scan: the store only ever holds the keys a user has touched.
///
/// # Examples
///
/// ```
/// use kvs_view::{Entry, SnapshotStore};
///
/// let mut store = SnapshotStore::new();
/// store.upsert("a", "1");
/// store.upsert("b", "2");
/// store.upsert("a", "3");
///
/// assert_eq!(store.entries(), &[Entry::new("a", "3"), Entry::new("b", "2")][..]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStore {
    entries: Vec<Entry>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> SnapshotStore {
        SnapshotStore::default()
    }

    /// Create a store seeded with `entries`.
    ///
    /// Seeds go through `upsert`, so a repeated key keeps its first position and its last value.
    pub fn with_entries<I>(entries: I) -> SnapshotStore
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut store = SnapshotStore::new();
        for Entry { key, value } in entries {
            store.upsert(key, value);
        }
        store
    }

    /// Replace the value of `key` in place, or append a new entry if the key is unknown.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &[Entry] {
        let key = key.into();
        let value = value.into();

        match self.position(&key) {
            Some(i) => self.entries[i].value = value,
            None => self.entries.push(Entry { key, value }),
        }

        &self.entries
    }

    /// Remove the entry for `key`. Removing an unknown key does nothing.
    pub fn remove(&mut self, key: &str) -> &[Entry] {
        if let Some(i) = self.position(key) {
            self.entries.remove(i);
        }

        &self.entries
    }

    /// The current entries, in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The value last seen for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].value.as_str())
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }
}
