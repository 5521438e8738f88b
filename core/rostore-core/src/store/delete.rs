//! Store Delete Operations

use super::{Open, Store, UnitOfWork};
use crate::backend::{Connection, ConnectionProvider};
use crate::error::StoreResult;
use crate::query::{Command, Query, names};
use crate::record::Record;
use tracing::{debug, instrument};

impl<T: Record, P: ConnectionProvider> Store<T, P> {
    // ════════════════════════════════════════════
    // DELETE Operations
    // ════════════════════════════════════════════

    /// 레코드와 인덱스 소속, 역색인 집합을 삭제합니다.
    ///
    /// 존재하지 않는 레코드 삭제는 성공합니다 (no-op).
    pub fn delete(&self, record: &T) -> StoreResult<()> {
        self.delete_all(std::slice::from_ref(record))
    }

    /// 여러 레코드를 하나의 트랜잭션으로 삭제
    pub fn delete_all(&self, records: &[T]) -> StoreResult<()> {
        let keys = records
            .iter()
            .map(|record| self.key_of(record))
            .collect::<StoreResult<Vec<_>>>()?;
        self.delete_keys(&keys)
    }

    /// Primary key 목록으로 삭제
    ///
    /// 인덱스는 각 key의 역색인 집합에서 찾습니다.
    #[instrument(skip_all, fields(prefix = self.keys.prefix(), keys = keys.len()))]
    pub fn delete_keys(&self, keys: &[String]) -> StoreResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.provider.acquire()?;

        // 1. 역색인 조회 (파이프라인 1회)
        let reads: Vec<Command> = keys
            .iter()
            .map(|key| Command::new(names::SMEMBERS).arg(self.keys.reverse_index_key(key)))
            .collect();
        let memberships = conn
            .pipeline(&reads)?
            .into_iter()
            .zip(&reads)
            .map(|(reply, cmd)| reply.into_strings(cmd))
            .collect::<StoreResult<Vec<_>>>()?;

        // 2. 인덱스별 ZREM + DEL
        let plan = self.maintainer.cleanup(keys, &memberships);
        let mut unit: UnitOfWork<Open> = UnitOfWork::new();
        unit.extend(plan.commands);
        debug!(commands = unit.len(), "submitting delete");
        unit.commit(&mut conn)?;
        Ok(())
    }

    /// 쿼리 결과 key를 모두 삭제. 결과가 없으면 아무것도 전송하지 않음
    pub fn delete_by_query(&self, query: &Query) -> StoreResult<usize> {
        let keys = self.list_keys(query)?;
        self.delete_keys(&keys)?;
        Ok(keys.len())
    }
}
