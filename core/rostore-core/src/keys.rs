//! Key naming scheme
//!
//! ```text
//! primary key   : {prefix}{key_delimiter}{suffix}              Post:1
//! index key     : {prefix}{score_key_delimiter}{index_name}    Post/recent
//! reverse index : {primary_key}{key_delimiter}{rev_suffix}     Post:1:scoreSetKeys
//! ```

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Derives primary, index and reverse-index keys for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBuilder {
    prefix: String,
    key_delimiter: String,
    score_key_delimiter: String,
    reverse_index_key_suffix: String,
}

impl KeyBuilder {
    pub fn new(config: &StoreConfig, type_name: &str) -> Self {
        Self {
            prefix: config.resolve_prefix(type_name),
            key_delimiter: config.key_delimiter.clone(),
            score_key_delimiter: config.score_key_delimiter.clone(),
            reverse_index_key_suffix: config.reverse_index_key_suffix.clone(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn score_key_delimiter(&self) -> &str {
        &self.score_key_delimiter
    }

    /// Fails with `InvalidKey` when `suffix` is empty.
    pub fn primary_key(&self, suffix: &str) -> StoreResult<String> {
        if suffix.is_empty() {
            return Err(StoreError::InvalidKey {
                type_name: self.prefix.clone(),
            });
        }
        Ok(format!("{}{}{}", self.prefix, self.key_delimiter, suffix))
    }

    pub fn index_key(&self, index_name: &str) -> String {
        format!("{}{}{}", self.prefix, self.score_key_delimiter, index_name)
    }

    pub fn reverse_index_key(&self, primary_key: &str) -> String {
        format!(
            "{}{}{}",
            primary_key, self.key_delimiter, self.reverse_index_key_suffix
        )
    }
}
