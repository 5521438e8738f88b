//! Store List / Count Operations

use super::Store;
use super::get::fetch_with;
use crate::backend::{Connection, ConnectionProvider};
use crate::error::StoreResult;
use crate::query::{Query, QueryKind};
use crate::record::Record;
use tracing::{debug, instrument, warn};

impl<T: Record, P: ConnectionProvider> Store<T, P> {
    // ════════════════════════════════════════════
    // LIST Operations
    // ════════════════════════════════════════════

    /// 쿼리 결과 key 순서대로 레코드를 읽습니다.
    ///
    /// 인덱스에는 있지만 해시가 없는 key는 `T::default()`로 채워집니다
    /// (결과 길이는 항상 key 개수와 같음).
    #[instrument(skip_all, fields(prefix = self.keys.prefix()))]
    pub fn list(&self, query: &Query) -> StoreResult<Vec<T>> {
        let cmd = self.compile(QueryKind::List, query)?;
        let mut conn = self.provider.acquire()?;
        let keys = conn.execute(&cmd)?.into_strings(&cmd)?;
        debug!(%cmd, keys = keys.len(), "resolved list keys");
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let fetched = fetch_with(&mut conn, &keys)?;
        let mut records = Vec::with_capacity(keys.len());
        for (key, fields) in keys.iter().zip(fetched) {
            let fields = fields?;
            if fields.is_empty() {
                warn!(key = %key, "indexed key has no stored hash");
            }
            let mut record = T::default();
            record.apply_field_map(key, &fields)?;
            records.push(record);
        }
        Ok(records)
    }

    /// 쿼리가 가리키는 primary key 목록만 반환 (해시는 읽지 않음)
    pub fn list_keys(&self, query: &Query) -> StoreResult<Vec<String>> {
        let cmd = self.compile(QueryKind::List, query)?;
        let mut conn = self.provider.acquire()?;
        conn.execute(&cmd)?.into_strings(&cmd)
    }

    // ════════════════════════════════════════════
    // COUNT Operations
    // ════════════════════════════════════════════

    /// 쿼리 범위에 속하는 멤버 수
    ///
    /// `limit`, `offset`, `reverse`는 무시됩니다.
    pub fn count(&self, query: &Query) -> StoreResult<u64> {
        let cmd = self.compile(QueryKind::Count, query)?;
        let mut conn = self.provider.acquire()?;
        let n = conn.execute(&cmd)?.into_int(&cmd)?;
        // 음수 응답은 0으로 취급
        Ok(u64::try_from(n).unwrap_or(0))
    }
}
