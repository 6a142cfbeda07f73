//! Process-wide table of human-readable error text.
//!
//! The table is a passive lookup for presentation layers; the client never
//! consults it when deciding how a request ends.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::NetworkError;

/// Shared mapping from error codes to display text.
///
/// Clones share the same table. Every client built with an `error_strings`
/// mapping replaces the whole table it is bound to, so the most recently
/// built client's mapping is the one visible afterwards.
#[derive(Clone, Debug, Default)]
pub struct ErrorStrings {
    table: Arc<RwLock<HashMap<String, String>>>,
}

impl ErrorStrings {
    /// Create an isolated, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table used by clients that are not given their own.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<ErrorStrings> = OnceLock::new();
        GLOBAL.get_or_init(ErrorStrings::new).clone()
    }

    /// Replace the whole table.
    pub fn replace(&self, strings: HashMap<String, String>) {
        *self.table.write() = strings;
    }

    /// Look up the text for a code.
    pub fn get(&self, code: &str) -> Option<String> {
        self.table.read().get(code).cloned()
    }

    /// Text for an error: the mapped string for its code, or its `Display` form.
    pub fn describe(&self, error: &NetworkError) -> String {
        self.get(error.code()).unwrap_or_else(|| error.to_string())
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.table.read().clone()
    }
}
