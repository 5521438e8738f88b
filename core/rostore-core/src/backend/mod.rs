//! Backend module — 정렬 집합을 지원하는 키-값 백엔드 연결 계약
//!
//! Store는 이 트레이트에만 의존합니다 (Dependency Inversion Principle).
//!
//! # Contract
//!
//! - `execute`: 단일 명령 실행
//! - `pipeline`: 여러 명령을 한 번의 왕복으로 전송, 명령별 실패는 `Reply::Error`
//! - `transaction`: 전부 적용되거나 전혀 적용되지 않음 (MULTI/EXEC)
//! - 연결 반환은 `Drop`으로 처리 (모든 종료 경로에서 보장)

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::{MemoryBackend, MemoryConnection};

use crate::codec::RawFields;
use crate::error::{StoreError, StoreResult};
use crate::query::Command;
use std::fmt;

/// 백엔드 응답
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nil,
    Status(String),
    Int(i64),
    Bulk(String),
    Array(Vec<Reply>),
    /// 명령 단위 오류 (WRONGTYPE 등)
    Error(String),
}

impl Reply {
    fn kind(&self) -> String {
        match self {
            Reply::Nil => "nil".to_string(),
            Reply::Status(s) => format!("status {s:?}"),
            Reply::Int(v) => format!("integer {v}"),
            Reply::Bulk(s) => format!("bulk {s:?}"),
            Reply::Array(items) => format!("array of {}", items.len()),
            Reply::Error(e) => format!("error {e:?}"),
        }
    }

    fn unexpected(self, cmd: &Command, expected: &'static str) -> StoreError {
        if let Reply::Error(message) = self {
            return StoreError::backend(cmd.to_string(), BackendFailure(message));
        }
        StoreError::UnexpectedReply {
            command: cmd.to_string(),
            expected,
            actual: self.kind(),
        }
    }

    /// 명령 단위 오류를 `StoreError`로 변환
    pub fn check(self, cmd: &Command) -> StoreResult<Reply> {
        match self {
            Reply::Error(message) => Err(StoreError::backend(cmd.to_string(), BackendFailure(message))),
            other => Ok(other),
        }
    }

    pub fn into_int(self, cmd: &Command) -> StoreResult<i64> {
        match self {
            Reply::Int(v) => Ok(v),
            Reply::Bulk(s) | Reply::Status(s) => {
                s.parse().map_err(|_| StoreError::UnexpectedReply {
                    command: cmd.to_string(),
                    expected: "integer",
                    actual: format!("bulk {s:?}"),
                })
            }
            other => Err(other.unexpected(cmd, "integer")),
        }
    }

    pub fn into_strings(self, cmd: &Command) -> StoreResult<Vec<String>> {
        match self {
            Reply::Nil => Ok(Vec::new()),
            Reply::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Reply::Bulk(s) | Reply::Status(s) => Ok(s),
                    Reply::Int(v) => Ok(v.to_string()),
                    other => Err(other.unexpected(cmd, "array of strings")),
                })
                .collect(),
            other => Err(other.unexpected(cmd, "array of strings")),
        }
    }

    /// HGETALL 응답 (field, value 교차 배열) → 필드 맵
    pub fn into_field_map(self, cmd: &Command) -> StoreResult<RawFields> {
        let flat = self.into_strings(cmd)?;
        if flat.len() % 2 != 0 {
            return Err(StoreError::UnexpectedReply {
                command: cmd.to_string(),
                expected: "even number of field/value items",
                actual: format!("array of {}", flat.len()),
            });
        }
        let mut fields = RawFields::with_capacity(flat.len() / 2);
        let mut iter = flat.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            fields.insert(field, value);
        }
        Ok(fields)
    }
}

/// 백엔드가 보고한 오류 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure(pub String);

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BackendFailure {}

/// 단독 점유되는 백엔드 연결
pub trait Connection {
    /// 단일 명령 실행
    fn execute(&mut self, cmd: &Command) -> StoreResult<Reply>;

    /// 파이프라인 실행 — 입력 순서대로 응답 하나씩
    fn pipeline(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>>;

    /// 원자적 트랜잭션 실행 — 입력 순서대로 응답 하나씩
    ///
    /// 하나라도 실패하면 아무것도 적용되지 않습니다.
    fn transaction(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>>;
}

/// 연결 공급자 (커넥션 풀 등)
pub trait ConnectionProvider: Send + Sync {
    type Conn: Connection;

    /// 연결 획득. 반환은 `Drop` 시점
    fn acquire(&self) -> StoreResult<Self::Conn>;
}

impl<P: ConnectionProvider> ConnectionProvider for std::sync::Arc<P> {
    type Conn = P::Conn;

    fn acquire(&self) -> StoreResult<Self::Conn> {
        (**self).acquire()
    }
}
