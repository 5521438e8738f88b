//! Store Put Operations

use super::{Open, Store, UnitOfWork};
use crate::backend::{Connection, ConnectionProvider};
use crate::error::StoreResult;
use crate::index::{IndexMaintainer, IndexPlan};
use crate::query::{Command, names};
use crate::record::Record;
use ahash::AHashMap;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

impl<T: Record, P: ConnectionProvider> Store<T, P> {
    // ════════════════════════════════════════════
    // PUT Operations
    // ════════════════════════════════════════════

    /// 레코드 하나를 저장하고 인덱스를 갱신합니다.
    pub fn put(&self, record: &T) -> StoreResult<()> {
        self.put_all(std::slice::from_ref(record))
    }

    /// 여러 레코드를 하나의 트랜잭션으로 저장합니다.
    ///
    /// 모든 레코드를 먼저 검증하므로, 하나라도 유효하지 않으면
    /// 아무 명령도 전송되지 않습니다. 같은 key가 여러 번 나오면
    /// 마지막 레코드가 남습니다.
    #[instrument(skip_all, fields(prefix = self.keys.prefix(), records = records.len()))]
    pub fn put_all(&self, records: &[T]) -> StoreResult<()> {
        let plans = self.plan_all(records)?;
        if plans.is_empty() {
            return Ok(());
        }
        let mut conn = self.provider.acquire()?;
        self.submit_plans(&mut conn, &plans)
    }

    /// 호출자가 소유한 연결로 저장 (연결 수명은 호출자가 관리)
    #[instrument(skip_all, fields(prefix = self.keys.prefix(), records = records.len()))]
    pub fn put_with_conn<C: Connection>(&self, conn: &mut C, records: &[T]) -> StoreResult<()> {
        let plans = self.plan_all(records)?;
        if plans.is_empty() {
            return Ok(());
        }
        self.submit_plans(conn, &plans)
    }

    fn plan_all(&self, records: &[T]) -> StoreResult<Vec<IndexPlan>> {
        records
            .iter()
            .map(|record| self.maintainer.apply(record))
            .collect()
    }

    fn submit_plans<C: Connection>(&self, conn: &mut C, plans: &[IndexPlan]) -> StoreResult<()> {
        // 1. 이전 인덱스 소속 조회 (파이프라인 1회)
        let reads: Vec<Command> = plans
            .iter()
            .map(|plan| Command::new(names::SMEMBERS).arg(&plan.reverse_key))
            .collect();
        let replies = conn.pipeline(&reads)?;

        let mut known: AHashMap<&str, BTreeSet<String>> = AHashMap::with_capacity(plans.len());
        for ((plan, reply), cmd) in plans.iter().zip(replies).zip(&reads) {
            let previous = reply.into_strings(cmd)?;
            known
                .entry(plan.key.as_str())
                .or_insert_with(|| previous.into_iter().collect());
        }

        // 2. 오래된 소속 제거 + 쓰기를 한 작업 단위로
        let mut unit: UnitOfWork<Open> = UnitOfWork::new();
        for plan in plans {
            let previous = known.entry(plan.key.as_str()).or_default();
            unit.extend(IndexMaintainer::stale(plan, previous.iter()));
            unit.extend(plan.commands().cloned());
            *previous = plan.index_keys.clone();
        }

        debug!(commands = unit.len(), "submitting put");
        unit.commit(conn)?;
        Ok(())
    }
}
