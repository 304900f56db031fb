//! Immutable path-keyed snapshot sets
//!
//! A `SnapshotSet` is finalized once through `SnapshotSetBuilder` and never
//! mutated afterwards. Clones share the same underlying set, so handing back
//! "the same set" is cheap and observable through [`SnapshotSet::same_set`].

use super::file::FileSnapshot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Aggregate fingerprint state carried by a set
enum Fingerprint {
    /// Computed on first request, then cached for every clone of the set
    Lazy(OnceLock<String>),
    /// Deliberately not available (filtered output sets)
    Absent,
}

struct SetInner {
    entries: BTreeMap<String, FileSnapshot>,
    fingerprint: Fingerprint,
}

/// Complete observed state of a task's declared output locations at one moment
#[derive(Clone, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, FileSnapshot>",
    into = "BTreeMap<String, FileSnapshot>"
)]
pub struct SnapshotSet {
    inner: Arc<SetInner>,
}

impl SnapshotSet {
    /// Empty set
    pub fn empty() -> Self {
        SnapshotSetBuilder::new().build()
    }

    /// Start building a new set
    pub fn builder() -> SnapshotSetBuilder {
        SnapshotSetBuilder::new()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Look up the snapshot for a path
    pub fn get(&self, path: &str) -> Option<&FileSnapshot> {
        self.inner.entries.get(path)
    }

    /// Whether the set has an entry for a path
    pub fn contains(&self, path: &str) -> bool {
        self.inner.entries.contains_key(path)
    }

    /// Iterate over `(path, snapshot)` pairs
    pub fn iter(&self) -> btree_map::Iter<'_, String, FileSnapshot> {
        self.inner.entries.iter()
    }

    /// Iterate over the paths
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.inner.entries.keys().map(String::as_str)
    }

    /// Aggregate SHA-256 fingerprint over all entries.
    ///
    /// Returns `None` for sets that were built without a usable fingerprint.
    pub fn fingerprint(&self) -> Option<&str> {
        match &self.inner.fingerprint {
            Fingerprint::Lazy(cell) => Some(
                cell.get_or_init(|| compute_fingerprint(&self.inner.entries))
                    .as_str(),
            ),
            Fingerprint::Absent => None,
        }
    }

    /// Whether an aggregate fingerprint can be obtained from this set
    pub fn carries_fingerprint(&self) -> bool {
        matches!(self.inner.fingerprint, Fingerprint::Lazy(_))
    }

    /// Whether two handles refer to the very same set (not merely equal content)
    pub fn same_set(a: &SnapshotSet, b: &SnapshotSet) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Default for SnapshotSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for SnapshotSet {
    fn eq(&self, other: &Self) -> bool {
        self.inner.entries == other.inner.entries
    }
}

impl Eq for SnapshotSet {}

impl fmt::Debug for SnapshotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotSet")
            .field("entries", &self.inner.entries)
            .field("carries_fingerprint", &self.carries_fingerprint())
            .finish()
    }
}

impl<'a> IntoIterator for &'a SnapshotSet {
    type Item = (&'a String, &'a FileSnapshot);
    type IntoIter = btree_map::Iter<'a, String, FileSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Into<String>> FromIterator<(P, FileSnapshot)> for SnapshotSet {
    fn from_iter<I: IntoIterator<Item = (P, FileSnapshot)>>(iter: I) -> Self {
        let mut builder = SnapshotSetBuilder::new();
        for (path, snapshot) in iter {
            builder.insert(path, snapshot);
        }
        builder.build()
    }
}

impl From<BTreeMap<String, FileSnapshot>> for SnapshotSet {
    fn from(entries: BTreeMap<String, FileSnapshot>) -> Self {
        SnapshotSetBuilder { entries }.build()
    }
}

impl From<SnapshotSet> for BTreeMap<String, FileSnapshot> {
    fn from(set: SnapshotSet) -> Self {
        match Arc::try_unwrap(set.inner) {
            Ok(inner) => inner.entries,
            Err(shared) => shared.entries.clone(),
        }
    }
}

/// Accumulates entries before a set is finalized
#[derive(Debug, Default)]
pub struct SnapshotSetBuilder {
    entries: BTreeMap<String, FileSnapshot>,
}

impl SnapshotSetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any earlier entry for the same path
    pub fn insert(&mut self, path: impl Into<String>, snapshot: FileSnapshot) -> &mut Self {
        self.entries.insert(path.into(), snapshot);
        self
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn entry(mut self, path: impl Into<String>, snapshot: FileSnapshot) -> Self {
        self.insert(path, snapshot);
        self
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was added yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finalize into a set whose fingerprint is computed on demand
    pub fn build(self) -> SnapshotSet {
        self.finish(Fingerprint::Lazy(OnceLock::new()))
    }

    /// Finalize into a set that carries no aggregate fingerprint
    pub fn build_without_fingerprint(self) -> SnapshotSet {
        self.finish(Fingerprint::Absent)
    }

    fn finish(self, fingerprint: Fingerprint) -> SnapshotSet {
        SnapshotSet {
            inner: Arc::new(SetInner {
                entries: self.entries,
                fingerprint,
            }),
        }
    }
}

/// SHA-256 over the sorted entries, hex encoded.
///
/// Every field is length-prefixed so no choice of path or hash can make two
/// different sets feed the hasher the same bytes.
fn compute_fingerprint(entries: &BTreeMap<String, FileSnapshot>) -> String {
    let mut hasher = Sha256::new();
    hasher.update((entries.len() as u64).to_le_bytes());

    for (path, snapshot) in entries {
        update_field(&mut hasher, path.as_bytes());
        update_field(&mut hasher, snapshot.kind().as_str().as_bytes());
        update_field(&mut hasher, snapshot.content_hash().unwrap_or("").as_bytes());
    }

    hex::encode(hasher.finalize())
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
