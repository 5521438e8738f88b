//! Store configuration
//!
//! 키 구분자와 역색인 접미사, 해시 저장 여부를 정의합니다.
//! JSON에서 로드할 수 있으며 누락된 필드는 기본값을 사용합니다.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// 기본 primary key 구분자
pub const DEFAULT_KEY_DELIMITER: &str = ":";
/// 기본 score index key 구분자
pub const DEFAULT_SCORE_KEY_DELIMITER: &str = "/";
/// 기본 역색인 집합 접미사
pub const DEFAULT_REVERSE_INDEX_KEY_SUFFIX: &str = "scoreSetKeys";

/// Store 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key prefix. `None`이면 레코드 타입 이름을 사용
    pub key_prefix: Option<String>,
    /// Primary key / reverse index key 구분자
    pub key_delimiter: String,
    /// Score index key 구분자
    pub score_key_delimiter: String,
    /// 역색인 집합 key 접미사
    pub reverse_index_key_suffix: String,
    /// `false`이면 Put은 해시를 쓰지 않고 인덱스만 유지
    pub hash_store_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: None,
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            score_key_delimiter: DEFAULT_SCORE_KEY_DELIMITER.to_string(),
            reverse_index_key_suffix: DEFAULT_REVERSE_INDEX_KEY_SUFFIX.to_string(),
            hash_store_enabled: true,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 문자열에서 설정 로드
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Key prefix 지정. 빈 문자열은 타입 이름 기본값으로 되돌림
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.key_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    pub fn with_key_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.key_delimiter = delimiter.into();
        self
    }

    pub fn with_score_key_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.score_key_delimiter = delimiter.into();
        self
    }

    pub fn with_reverse_index_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.reverse_index_key_suffix = suffix.into();
        self
    }

    pub fn with_hash_store(mut self, enabled: bool) -> Self {
        self.hash_store_enabled = enabled;
        self
    }

    /// 빈 구분자/접미사 거부
    pub fn validate(&self) -> StoreResult<()> {
        if self.key_delimiter.is_empty() {
            return Err(StoreError::InvalidConfig(
                "key_delimiter must not be empty".to_string(),
            ));
        }
        if self.score_key_delimiter.is_empty() {
            return Err(StoreError::InvalidConfig(
                "score_key_delimiter must not be empty".to_string(),
            ));
        }
        if self.reverse_index_key_suffix.is_empty() {
            return Err(StoreError::InvalidConfig(
                "reverse_index_key_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 설정된 prefix 또는 타입 이름
    pub fn resolve_prefix(&self, type_name: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => prefix.clone(),
            None => type_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.key_prefix, None);
        assert_eq!(config.key_delimiter, ":");
        assert_eq!(config.score_key_delimiter, "/");
        assert_eq!(config.reverse_index_key_suffix, "scoreSetKeys");
        assert!(config.hash_store_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new()
            .with_key_prefix("posts")
            .with_key_delimiter("|")
            .with_score_key_delimiter("#")
            .with_reverse_index_key_suffix("idx")
            .with_hash_store(false);
        assert_eq!(config.key_prefix.as_deref(), Some("posts"));
        assert_eq!(config.key_delimiter, "|");
        assert_eq!(config.score_key_delimiter, "#");
        assert_eq!(config.reverse_index_key_suffix, "idx");
        assert!(!config.hash_store_enabled);
    }

    #[test]
    fn test_empty_prefix_falls_back_to_type_name() {
        let config = StoreConfig::new().with_key_prefix("");
        assert_eq!(config.resolve_prefix("Post"), "Post");
        let config = StoreConfig::new().with_key_prefix("p");
        assert_eq!(config.resolve_prefix("Post"), "p");
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{"key_prefix": "user", "hash_store_enabled": false}"#)
            .unwrap();
        assert_eq!(config.key_prefix.as_deref(), Some("user"));
        assert_eq!(config.key_delimiter, ":");
        assert!(!config.hash_store_enabled);
    }

    #[test]
    fn test_from_json_rejects_empty_delimiter() {
        let err = StoreConfig::from_json(r#"{"key_delimiter": ""}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }
}
