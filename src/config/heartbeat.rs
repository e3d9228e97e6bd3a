//! Heartbeat routing map
//!
//! Parses the heartbeat map option (`entity/check=name,...`) and
//! resolves events to heartbeat names.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Wildcard segment accepted in route keys
const WILDCARD: &str = "all";

/// Route map from event coordinates to heartbeat names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatMap {
    routes: HashMap<String, String>,
}

impl HeartbeatMap {
    /// Parse a comma-separated list of `key=value` entries.
    ///
    /// Keys look like `entity/check`, with `all` accepted as a wildcard
    /// on either side or as the bare catch-all key. A heartbeat name
    /// containing `/` means key and value were written in the wrong
    /// order, which is rejected rather than silently never matching.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut routes = HashMap::new();
        for entry in input.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (key, name) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedHeartbeatEntry(entry.to_string()))?;
            let key = key.trim();
            let name = name.trim();
            if key.is_empty() || name.is_empty() {
                return Err(ConfigError::MalformedHeartbeatEntry(entry.to_string()));
            }
            if name.contains('/') {
                return Err(ConfigError::ReversedHeartbeatEntry(name.to_string()));
            }
            routes.insert(key.to_string(), name.to_string());
        }
        Ok(Self { routes })
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Resolve an event to a heartbeat name.
    ///
    /// Tries the most specific route first: `entity/check`, then
    /// `entity/all`, then `all/check`, then `all`.
    pub fn resolve(&self, entity: &str, check: &str) -> Option<&str> {
        let candidates = [
            format!("{entity}/{check}"),
            format!("{entity}/{WILDCARD}"),
            format!("{WILDCARD}/{check}"),
            WILDCARD.to_string(),
        ];
        candidates
            .iter()
            .find_map(|key| self.routes.get(key))
            .map(String::as_str)
    }
}
