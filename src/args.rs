//! Free-form run configuration forwarded to every pipeline callback.
//!
//! [`Args`] is a caller-supplied map of named options. The engine never
//! validates its keys — it only forwards the map, verbatim, as the trailing
//! argument of every callback invocation. Built-in operators carry their
//! parameters as struct fields; `Args` exists so user-defined operators can
//! receive arbitrary run-scoped options without the engine knowing their
//! types.
//!
//! # Examples
//!
//! ```
//! use evoflow::args::Args;
//!
//! let mut args = Args::new();
//! args.set("target_length", 32usize);
//! args.set("label", String::from("run-7"));
//!
//! assert_eq!(args.get::<usize>("target_length"), Some(&32));
//! assert_eq!(args.get_or("missing", 1.5f64), 1.5);
//! ```

use std::any::Any;
use std::collections::HashMap;

/// A heterogeneous map of named run options.
///
/// Values may be of any `'static` type; lookups are typed, and a lookup
/// with the wrong type behaves like a missing key.
#[derive(Default)]
pub struct Args {
    map: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Args {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value under `key`.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.map.insert(key.into(), Box::new(value));
    }

    /// Chainable form of [`set`](Self::set).
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value under `key`, if present with the requested type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.map.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Returns a copy of the value under `key`, or `default` when the key
    /// is absent or has a different type.
    pub fn get_or<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.get::<T>(key).cloned().unwrap_or(default)
    }

    /// Whether `key` is present (regardless of its type).
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of options in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map holds no options.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args").field("keys", &self.map.keys().collect::<Vec<_>>()).finish()
    }
}
