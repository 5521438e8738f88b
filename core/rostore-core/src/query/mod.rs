//! Query 모듈 — Modifier 기반 Query와 QueryCompiler
//!
//! Query는 Modifier를 순서대로 적용하여 만들어지며,
//! [`compile`]이 이를 단일 백엔드 명령으로 변환합니다.
//!
//! ```rust
//! use rostore_core::query::{Query, QueryKind, compile};
//!
//! let query = Query::new().key("recent").gt_eq(10).limit(20).reverse();
//! let cmd = compile(QueryKind::List, &query).unwrap();
//! assert_eq!(cmd.to_string(), "ZREVRANGEBYSCORE recent +inf 10 LIMIT 0 20");
//! ```

pub mod command;
pub mod compiler;

pub use command::{Arg, Command, names};
pub use compiler::compile;

use crate::error::{QueryError, StoreResult};
use crate::score::Score;
use std::fmt::Display;

/// 기본 key token 구분자
pub const DEFAULT_TOKEN_DELIMITER: &str = ":";
/// 기본 key prefix 구분자
pub const DEFAULT_PREFIX_DELIMITER: &str = "/";

/// 쿼리 연산 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    List,
    Count,
}

/// Score 범위 경계
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// `>=` / `<=`
    Inclusive(Score),
    /// `>` / `<`
    Exclusive(Score),
}

/// 쿼리 대상 key 파라미터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryKey {
    pub tokens: Vec<String>,
    pub delimiter: Option<String>,
    pub prefix: Option<String>,
    pub prefix_delimiter: Option<String>,
}

impl QueryKey {
    /// Key 문자열 생성
    ///
    /// token 없이 prefix만 있으면 prefix 자체가 대상 key(namespace)가 됩니다.
    pub fn build(&self) -> StoreResult<String> {
        let delimiter = self.delimiter.as_deref().unwrap_or(DEFAULT_TOKEN_DELIMITER);
        let joined = self.tokens.join(delimiter);

        let key = match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                if joined.is_empty() {
                    prefix.to_string()
                } else {
                    let prefix_delimiter = self
                        .prefix_delimiter
                        .as_deref()
                        .unwrap_or(DEFAULT_PREFIX_DELIMITER);
                    format!("{prefix}{prefix_delimiter}{joined}")
                }
            }
            _ => joined,
        };

        if key.is_empty() {
            return Err(QueryError::MissingKey.into());
        }
        Ok(key)
    }
}

/// Query를 구성하는 단위 설정
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Key(Vec<String>),
    KeyDelimiter(String),
    KeyPrefix(String),
    Gt(Score),
    GtEq(Score),
    Lt(Score),
    LtEq(Score),
    /// `GtEq(v)` + `LtEq(v)`
    Eq(Score),
    Limit(i64),
    Offset(i64),
    /// 호출할 때마다 순서를 뒤집음
    Reverse,
}

/// Score index 쿼리
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub key: QueryKey,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    /// -1 = 무제한
    pub limit: i64,
    pub offset: i64,
    pub reverse: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            key: QueryKey::default(),
            min: None,
            max: None,
            limit: -1,
            offset: 0,
            reverse: false,
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifier 목록을 순서대로 적용
    pub fn from_modifiers(mods: impl IntoIterator<Item = Modifier>) -> Self {
        mods.into_iter().fold(Self::new(), Self::apply)
    }

    pub fn apply(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Key(tokens) => self.key.tokens = tokens,
            Modifier::KeyDelimiter(delimiter) => self.key.delimiter = Some(delimiter),
            Modifier::KeyPrefix(prefix) => self.key.prefix = Some(prefix),
            Modifier::Gt(v) => self.min = Some(Bound::Exclusive(v)),
            Modifier::GtEq(v) => self.min = Some(Bound::Inclusive(v)),
            Modifier::Lt(v) => self.max = Some(Bound::Exclusive(v)),
            Modifier::LtEq(v) => self.max = Some(Bound::Inclusive(v)),
            Modifier::Eq(v) => {
                self.max = Some(Bound::Inclusive(v.clone()));
                self.min = Some(Bound::Inclusive(v));
            }
            Modifier::Limit(n) => self.limit = n,
            Modifier::Offset(n) => self.offset = n,
            Modifier::Reverse => self.reverse = !self.reverse,
        }
        self
    }

    /// 단일 token key
    pub fn key(self, token: impl Display) -> Self {
        self.apply(Modifier::Key(vec![token.to_string()]))
    }

    /// 여러 token을 구분자로 이어 붙인 key
    pub fn key_parts<I>(self, tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let tokens = tokens.into_iter().map(|t| t.to_string()).collect();
        self.apply(Modifier::Key(tokens))
    }

    pub fn key_delimiter(self, delimiter: impl Into<String>) -> Self {
        self.apply(Modifier::KeyDelimiter(delimiter.into()))
    }

    pub fn key_prefix(self, prefix: impl Into<String>) -> Self {
        self.apply(Modifier::KeyPrefix(prefix.into()))
    }

    pub fn gt(self, v: impl Into<Score>) -> Self {
        self.apply(Modifier::Gt(v.into()))
    }

    pub fn gt_eq(self, v: impl Into<Score>) -> Self {
        self.apply(Modifier::GtEq(v.into()))
    }

    pub fn lt(self, v: impl Into<Score>) -> Self {
        self.apply(Modifier::Lt(v.into()))
    }

    pub fn lt_eq(self, v: impl Into<Score>) -> Self {
        self.apply(Modifier::LtEq(v.into()))
    }

    pub fn eq(self, v: impl Into<Score>) -> Self {
        self.apply(Modifier::Eq(v.into()))
    }

    pub fn limit(self, n: i64) -> Self {
        self.apply(Modifier::Limit(n))
    }

    pub fn offset(self, n: i64) -> Self {
        self.apply(Modifier::Offset(n))
    }

    pub fn reverse(self) -> Self {
        self.apply(Modifier::Reverse)
    }

    /// Score 범위를 사용하는 쿼리인지
    pub fn is_scored(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// 명시적 prefix가 없을 때만 store의 prefix를 주입한 복사본
    pub fn with_default_prefix(&self, prefix: &str, prefix_delimiter: &str) -> Self {
        let mut query = self.clone();
        if query.key.prefix.as_deref().is_none_or(str::is_empty) {
            query.key.prefix = Some(prefix.to_string());
            if query.key.prefix_delimiter.is_none() {
                query.key.prefix_delimiter = Some(prefix_delimiter.to_string());
            }
        }
        query
    }
}
