use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::CommandError;
use crate::types::{Buffer, MultiSet};

/// The value held under a key.
///
/// Sets are shared behind an `Arc` and carry their own lock, so set commands can work on a set
/// after the store lock has been released.
#[derive(Debug, Clone)]
pub enum Value {
    String(Buffer),
    Set(Arc<MultiSet>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Set(_) => "set",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Buffer::from(s))
    }
}

impl From<MultiSet> for Value {
    fn from(set: MultiSet) -> Self {
        Value::Set(Arc::new(set))
    }
}

/// The Store maps keys to values behind a single mutex. Every method takes the lock once and
/// holds it for its whole critical section, so each call is atomic with respect to the others.
/// The store is cheap to clone; clones share the same key space.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<HashMap<String, Value>>>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    /// Returns a copy of the value under `key`.
    pub fn get(&self, key: &str) -> Result<Value, CommandError> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| CommandError::KeyNotFound {
                key: key.to_string(),
            })
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.lock().insert(key.into(), value);
    }

    /// Returns the existing value and `true` if `key` is present, otherwise stores `value` and
    /// returns it with `false`.
    pub fn get_if_not_set(&self, key: &str, value: Value) -> (Value, bool) {
        let mut keys = self.lock();
        if let Some(existing) = keys.get(key) {
            return (existing.clone(), true);
        }

        keys.insert(key.to_string(), value.clone());
        (value, false)
    }

    /// Removes every key present among `keys` and returns how many were removed.
    pub fn del<S: AsRef<str>>(&self, keys: &[S]) -> usize {
        let mut state = self.lock();
        let mut deleted = 0;
        for key in keys {
            let key: &str = key.as_ref();
            if state.remove(key).is_some() {
                deleted += 1;
            }
        }
        deleted
    }

    pub fn exists(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Adds `delta` to the integer stored as a string under `key`, treating a missing key as
    /// `0`, and stores the result. Read, update and write happen under one lock.
    pub fn incr_by(&self, key: &str, delta: i64) -> Result<i64, CommandError> {
        let mut keys = self.lock();

        let current = match keys.get(key) {
            Some(Value::String(buffer)) => parse_int(buffer)?,
            Some(Value::Set(_)) => return Err(CommandError::WrongType),
            None => 0,
        };

        let value = current
            .checked_add(delta)
            .ok_or_else(|| CommandError::generic("increment or decrement would overflow"))?;

        keys.insert(key.to_string(), Value::from(value.to_string().as_str()));

        Ok(value)
    }

    /// Appends `data` to the string under `key`, creating it if missing, and returns the new
    /// length.
    pub fn append(&self, key: &str, data: &[u8]) -> Result<usize, CommandError> {
        let mut keys = self.lock();

        match keys.get_mut(key) {
            Some(Value::String(buffer)) => {
                buffer.append_bytes(data);
                Ok(buffer.len())
            }
            Some(Value::Set(_)) => Err(CommandError::WrongType),
            None => {
                keys.insert(key.to_string(), Value::String(Buffer::from_bytes(data)));
                Ok(data.len())
            }
        }
    }

    /// Returns the set under `key`, `None` if the key is missing.
    pub fn get_set(&self, key: &str) -> Result<Option<Arc<MultiSet>>, CommandError> {
        match self.get(key) {
            Ok(Value::Set(set)) => Ok(Some(set)),
            Ok(Value::String(_)) => Err(CommandError::WrongType),
            Err(CommandError::KeyNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Returns the set under `key`, storing a new empty one if the key is missing.
    pub fn get_or_create_set(&self, key: &str) -> Result<Arc<MultiSet>, CommandError> {
        match self.get_if_not_set(key, Value::from(MultiSet::new())) {
            (Value::Set(set), _) => Ok(set),
            (Value::String(_), _) => Err(CommandError::WrongType),
        }
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_int(buffer: &Buffer) -> Result<i64, CommandError> {
    let cast_failed = || CommandError::CastFailedToInt {
        value: String::from_utf8_lossy(buffer.as_bytes()).into_owned(),
    };

    std::str::from_utf8(buffer.as_bytes())
        .map_err(|_| cast_failed())?
        .parse::<i64>()
        .map_err(|_| cast_failed())
}
