//! Store Get Operations

use super::Store;
use crate::backend::{BackendFailure, Connection, ConnectionProvider, Reply};
use crate::codec::RawFields;
use crate::error::{StoreError, StoreResult};
use crate::query::{Command, names};
use crate::record::Record;
use tracing::{debug, instrument};

impl<T: Record, P: ConnectionProvider> Store<T, P> {
    // ════════════════════════════════════════════
    // GET Operations
    // ════════════════════════════════════════════

    /// 레코드의 key로 해시를 읽어 제자리에서 디코딩합니다.
    ///
    /// 해시가 없으면 레코드는 그대로 유지됩니다
    /// (빈 필드 맵은 아무 필드도 덮어쓰지 않음).
    pub fn get(&self, record: &mut T) -> StoreResult<()> {
        let key = self.key_of(record)?;
        let cmd = Command::new(names::HGETALL).arg(&key);
        let mut conn = self.provider.acquire()?;
        let fields = conn.execute(&cmd)?.into_field_map(&cmd)?;
        record.apply_field_map(&key, &fields)
    }

    /// 여러 레코드를 파이프라인 한 번으로 읽습니다.
    ///
    /// 결과는 입력과 같은 순서의 레코드별 결과입니다.
    /// 파이프라인 전송 자체가 실패하면 모든 항목이 같은 원인으로 실패합니다.
    #[instrument(skip_all, fields(prefix = self.keys.prefix(), records = records.len()))]
    pub fn get_many(&self, records: &mut [T]) -> Vec<StoreResult<()>> {
        let mut results: Vec<StoreResult<()>> = Vec::with_capacity(records.len());
        let mut pending = Vec::new();
        for (i, record) in records.iter().enumerate() {
            match self.key_of(record) {
                Ok(key) => {
                    pending.push((i, key));
                    results.push(Ok(()));
                }
                Err(e) => results.push(Err(e)),
            }
        }
        if pending.is_empty() {
            return results;
        }

        let keys: Vec<String> = pending.iter().map(|(_, key)| key.clone()).collect();
        match self.fetch(&keys) {
            Ok(fetched) => {
                for ((i, key), fields) in pending.into_iter().zip(fetched) {
                    results[i] = fields.and_then(|f| records[i].apply_field_map(&key, &f));
                }
            }
            Err(e) => {
                debug!(error = %e, "pipelined read failed");
                let message = e.to_string();
                for (i, _) in pending {
                    results[i] = Err(StoreError::backend(
                        "pipelined read failed",
                        BackendFailure(message.clone()),
                    ));
                }
            }
        }
        results
    }

    /// Key별 필드 맵 (파이프라인 `HGETALL`)
    pub(crate) fn fetch(&self, keys: &[String]) -> StoreResult<Vec<StoreResult<RawFields>>> {
        let mut conn = self.provider.acquire()?;
        fetch_with(&mut conn, keys)
    }
}

pub(crate) fn fetch_with<C: Connection>(
    conn: &mut C,
    keys: &[String],
) -> StoreResult<Vec<StoreResult<RawFields>>> {
    let cmds: Vec<Command> = keys
        .iter()
        .map(|key| Command::new(names::HGETALL).arg(key))
        .collect();
    let replies: Vec<Reply> = conn.pipeline(&cmds)?;
    Ok(replies
        .into_iter()
        .zip(&cmds)
        .map(|(reply, cmd)| reply.into_field_map(cmd))
        .collect())
}
