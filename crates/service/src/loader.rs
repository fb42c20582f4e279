//! Turns the raw users document into a collection.
//!
//! Loading never fails: a missing, unparsable or malformed source is replaced
//! by the seed (or an empty list, per [`MalformedPolicy`]) and the outcome
//! says which fallback was taken so the caller can log it.

use configs::{MalformedPolicy, StorageConfig};
use models::user::{name_or_default, role_or_default, seed, Collection, UserRecord};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Give entries without a usable id a positional one instead of skipping them.
    pub normalize: bool,
    /// Always serve exactly the first two records, padded from the seed.
    pub truncate_pad: bool,
    pub on_malformed: MalformedPolicy,
}

impl From<&StorageConfig> for LoadOptions {
    fn from(cfg: &StorageConfig) -> Self {
        Self { normalize: cfg.normalize, truncate_pad: cfg.truncate_pad, on_malformed: cfg.on_malformed }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No source at all.
    Unavailable,
    /// Not JSON, or not a JSON object.
    Unparsable,
    /// An object whose `users` is missing or not a list.
    Malformed,
}

impl LoadStatus {
    pub fn is_fallback(self) -> bool {
        self != Self::Loaded
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Unavailable => "unavailable",
            Self::Unparsable => "unparsable",
            Self::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub users: Collection,
    pub status: LoadStatus,
    /// Entries dropped in strict mode because they had no usable id.
    pub skipped: usize,
}

pub fn load(source: Option<&[u8]>, opts: &LoadOptions) -> LoadOutcome {
    let (users, status, skipped) = match source {
        None => (seed(), LoadStatus::Unavailable, 0),
        Some(bytes) => parse_document(bytes, opts),
    };
    let users = if opts.truncate_pad { truncate_and_pad(users) } else { users };
    LoadOutcome { users, status, skipped }
}

fn parse_document(bytes: &[u8], opts: &LoadOptions) -> (Collection, LoadStatus, usize) {
    let doc: Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(_) => return (seed(), LoadStatus::Unparsable, 0),
    };
    let Value::Object(mut root) = doc else {
        return (seed(), LoadStatus::Unparsable, 0);
    };
    let entries = match root.remove("users") {
        Some(Value::Array(entries)) => entries,
        _ => return (malformed_fallback(opts.on_malformed), LoadStatus::Malformed, 0),
    };

    if opts.normalize {
        let users = entries.iter().enumerate().map(|(i, e)| normalize_entry(i, e)).collect();
        return (users, LoadStatus::Loaded, 0);
    }
    // One bad entry never discards the rest of the document.
    let users: Collection = entries.iter().filter_map(strict_entry).collect();
    let skipped = entries.len() - users.len();
    (users, LoadStatus::Loaded, skipped)
}

fn malformed_fallback(policy: MalformedPolicy) -> Collection {
    match policy {
        MalformedPolicy::Seed => seed(),
        MalformedPolicy::Empty => Vec::new(),
    }
}

/// A stored id counts only when it is a positive integer. Integral floats
/// such as `5.0` are accepted; `0`, negatives, fractions and non-numbers are not.
pub fn stored_id(value: &Value) -> Option<u64> {
    if let Some(id) = value.as_u64() {
        return (id >= 1).then_some(id);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

/// Keep a stored entry as-is apart from name/role defaults. Entries without
/// a usable id are dropped.
fn strict_entry(entry: &Value) -> Option<UserRecord> {
    let id = entry.get("id").and_then(stored_id)?;
    let name = name_or_default(entry.get("name").and_then(Value::as_str));
    let role = role_or_default(entry.get("role").and_then(Value::as_str));
    Some(UserRecord { id, name, role })
}

/// Repair one stored entry found at `index`.
///
/// An id that is not a positive integer becomes `index + 1`; names and roles
/// get the usual defaults. Anything that is not an object is treated as `{}`.
pub fn normalize_entry(index: usize, entry: &Value) -> UserRecord {
    let id = entry
        .get("id")
        .and_then(stored_id)
        .unwrap_or(index as u64 + 1);
    let name = name_or_default(entry.get("name").and_then(Value::as_str));
    let role = role_or_default(entry.get("role").and_then(Value::as_str));
    UserRecord { id, name, role }
}

/// Keep at most as many records as the seed holds, then pad from the seed.
pub fn truncate_and_pad(mut users: Collection) -> Collection {
    let seed = seed();
    users.truncate(seed.len());
    let missing: Vec<UserRecord> = seed.into_iter().skip(users.len()).collect();
    users.extend(missing);
    users
}
