//! Redis backend (feature `redis`)
//!
//! `redis` 크레이트의 동기 연결 위에 [`Connection`] 계약을 구현합니다.
//! 트랜잭션은 atomic pipeline (MULTI/EXEC)으로 전송됩니다.

use super::{Connection, ConnectionProvider, Reply};
use crate::error::{StoreError, StoreResult};
use crate::query::{Arg, Command};
use tracing::debug;

/// `redis::Client` 기반 연결 공급자
#[derive(Debug, Clone)]
pub struct RedisProvider {
    client: redis::Client,
}

impl RedisProvider {
    /// `redis://host:port/db` 형식의 URL로 생성 (연결은 acquire 시점)
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::backend(format!("invalid redis url {url:?}"), e))?;
        Ok(Self { client })
    }

    pub fn from_client(client: redis::Client) -> Self {
        Self { client }
    }
}

impl ConnectionProvider for RedisProvider {
    type Conn = RedisConnection;

    fn acquire(&self) -> StoreResult<RedisConnection> {
        let inner = self
            .client
            .get_connection()
            .map_err(|e| StoreError::backend("failed to acquire a connection", e))?;
        debug!("acquired redis connection");
        Ok(RedisConnection { inner })
    }
}

/// 단일 Redis 연결. Drop 시 닫힘
pub struct RedisConnection {
    inner: redis::Connection,
}

fn to_redis_cmd(cmd: &Command) -> redis::Cmd {
    let mut out = redis::cmd(cmd.name);
    for arg in &cmd.args {
        match arg {
            Arg::Str(s) => out.arg(s.as_str()),
            Arg::Int(v) => out.arg(*v),
            Arg::Float(v) => out.arg(*v),
        };
    }
    out
}

fn to_reply(value: redis::Value) -> Reply {
    match value {
        redis::Value::Nil => Reply::Nil,
        redis::Value::Int(v) => Reply::Int(v),
        redis::Value::BulkString(bytes) => Reply::Bulk(String::from_utf8_lossy(&bytes).into_owned()),
        redis::Value::SimpleString(s) => Reply::Status(s),
        redis::Value::Okay => Reply::Status("OK".to_string()),
        redis::Value::Array(items) | redis::Value::Set(items) => {
            Reply::Array(items.into_iter().map(to_reply).collect())
        }
        redis::Value::Map(pairs) => Reply::Array(
            pairs
                .into_iter()
                .flat_map(|(k, v)| [to_reply(k), to_reply(v)])
                .collect(),
        ),
        redis::Value::Double(v) => Reply::Bulk(v.to_string()),
        redis::Value::Boolean(b) => Reply::Int(i64::from(b)),
        other => Reply::Status(format!("{other:?}")),
    }
}

impl Connection for RedisConnection {
    fn execute(&mut self, cmd: &Command) -> StoreResult<Reply> {
        match to_redis_cmd(cmd).query::<redis::Value>(&mut self.inner) {
            Ok(value) => Ok(to_reply(value)),
            // 서버가 보낸 명령 오류는 응답으로 전달
            Err(e) if e.code().is_some() => Ok(Reply::Error(e.to_string())),
            Err(e) => Err(StoreError::backend(cmd.to_string(), e)),
        }
    }

    fn pipeline(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>> {
        if cmds.is_empty() {
            return Ok(Vec::new());
        }
        let mut pipe = redis::pipe();
        for cmd in cmds {
            pipe.add_command(to_redis_cmd(cmd));
        }
        let values: Vec<redis::Value> = pipe
            .query(&mut self.inner)
            .map_err(|e| StoreError::backend(format!("pipeline of {}", cmds.len()), e))?;
        Ok(values.into_iter().map(to_reply).collect())
    }

    fn transaction(&mut self, cmds: &[Command]) -> StoreResult<Vec<Reply>> {
        if cmds.is_empty() {
            return Ok(Vec::new());
        }
        let mut pipe = redis::pipe();
        pipe.atomic();
        for cmd in cmds {
            pipe.add_command(to_redis_cmd(cmd));
        }
        let values: Vec<redis::Value> = pipe
            .query(&mut self.inner)
            .map_err(|e| StoreError::backend(format!("transaction of {}", cmds.len()), e))?;
        let replies: Vec<Reply> = values.into_iter().map(to_reply).collect();
        if let Some(Reply::Error(message)) = replies.iter().find(|r| matches!(r, Reply::Error(_))) {
            return Err(StoreError::backend(
                "transaction reported a command error",
                super::BackendFailure(message.clone()),
            ));
        }
        Ok(replies)
    }
}
