//! IndexMaintainer — 레코드 → 저장/인덱스 명령 계획
//!
//! 레코드 하나가 쓰는 키:
//!
//! ```text
//! {prefix}:{suffix}                 hash      필드 맵
//! {prefix}/{index}                  zset      member = primary key, score = 인덱스 값
//! {prefix}:{suffix}:scoreSetKeys    set       레코드가 속한 index key 목록 (역색인)
//! ```
//!
//! 역색인 집합은 레코드가 속한 인덱스와 정확히 일치해야 합니다.
//! 삭제는 역색인으로 인덱스를 찾으므로 선언된 인덱스 목록이 필요 없습니다.

use crate::codec::FieldMap;
use crate::error::{StoreError, StoreResult};
use crate::keys::KeyBuilder;
use crate::query::{Arg, Command, names};
use crate::record::Record;
use crate::score::Score;
use std::collections::{BTreeMap, BTreeSet};

/// 레코드 하나를 저장하기 위한 명령 계획
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPlan {
    /// Primary key
    pub key: String,
    /// 역색인 집합 key
    pub reverse_key: String,
    /// `DEL key` + `HSET key …` (해시 저장 비활성 시 비어 있음)
    pub hash_writes: Vec<Command>,
    /// 인덱스마다 `ZADD index score key`
    pub index_writes: Vec<Command>,
    /// `DEL rev` + `SADD rev index…`
    pub reverse_index_writes: Vec<Command>,
    /// 이 레코드가 속하는 index key
    pub index_keys: BTreeSet<String>,
}

impl IndexPlan {
    /// 트랜잭션에 넣을 순서대로
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.hash_writes
            .iter()
            .chain(&self.index_writes)
            .chain(&self.reverse_index_writes)
    }
}

/// 삭제 계획: 인덱스별 `ZREM` 묶음 + `DEL`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovalPlan {
    pub commands: Vec<Command>,
}

impl RemovalPlan {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Put/Delete 명령 계획기
#[derive(Debug, Clone)]
pub struct IndexMaintainer {
    keys: KeyBuilder,
    hash_store_enabled: bool,
}

impl IndexMaintainer {
    pub fn new(keys: KeyBuilder, hash_store_enabled: bool) -> Self {
        Self {
            keys,
            hash_store_enabled,
        }
    }

    pub fn keys(&self) -> &KeyBuilder {
        &self.keys
    }

    /// 레코드의 저장 계획 생성. 명령을 보내기 전에 모든 검증을 수행
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: `key_suffix()`가 비어 있음
    /// - `MissingScoreMap`: `score_map()`이 `None`
    /// - `InvalidIndexName`: 빈 인덱스 이름
    /// - `InvalidScore`: 유한한 숫자가 아닌 score
    pub fn apply<T: Record>(&self, record: &T) -> StoreResult<IndexPlan> {
        let key = self.keys.primary_key(&record.key_suffix())?;
        let Some(scores) = record.score_map() else {
            return Err(StoreError::MissingScoreMap { key });
        };

        let mut index_writes = Vec::with_capacity(scores.len());
        let mut index_keys = BTreeSet::new();
        for (name, score) in &scores {
            if name.is_empty() {
                return Err(StoreError::InvalidIndexName { key });
            }
            let value = score.to_f64().map_err(|reason| StoreError::InvalidScore {
                key: key.clone(),
                index: name.clone(),
                value: score.to_string(),
                reason,
            })?;
            // 텍스트 score는 파싱된 값으로 전송
            let arg = match score {
                Score::Text(_) => Arg::Float(value),
                other => other.to_arg(),
            };
            let index_key = self.keys.index_key(name);
            index_writes.push(
                Command::new(names::ZADD)
                    .arg(&index_key)
                    .arg(arg)
                    .arg(&key),
            );
            index_keys.insert(index_key);
        }

        let hash_writes = if self.hash_store_enabled {
            hash_writes(&key, record)
        } else {
            Vec::new()
        };

        let reverse_key = self.keys.reverse_index_key(&key);
        let mut reverse_index_writes = vec![Command::new(names::DEL).arg(&reverse_key)];
        if !index_keys.is_empty() {
            reverse_index_writes.push(
                Command::new(names::SADD)
                    .arg(&reverse_key)
                    .args(index_keys.iter()),
            );
        }

        Ok(IndexPlan {
            key,
            reverse_key,
            hash_writes,
            index_writes,
            reverse_index_writes,
            index_keys,
        })
    }

    /// 이전에는 속했지만 새 계획에는 없는 인덱스에서 레코드 제거
    pub fn stale<'a, I>(plan: &IndexPlan, previous: I) -> Vec<Command>
    where
        I: IntoIterator<Item = &'a String>,
    {
        previous
            .into_iter()
            .filter(|index_key| !plan.index_keys.contains(*index_key))
            .map(|index_key| Command::new(names::ZREM).arg(index_key).arg(&plan.key))
            .collect()
    }

    /// 삭제 계획. `memberships[i]`는 `keys[i]`의 역색인 집합 내용
    ///
    /// 같은 인덱스에서 제거되는 key는 한 `ZREM`으로 묶입니다.
    pub fn cleanup(&self, keys: &[String], memberships: &[Vec<String>]) -> RemovalPlan {
        if keys.is_empty() {
            return RemovalPlan::default();
        }

        let mut by_index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, members) in keys.iter().zip(memberships) {
            for index_key in members {
                let entry = by_index.entry(index_key.as_str()).or_default();
                if !entry.contains(&key.as_str()) {
                    entry.push(key.as_str());
                }
            }
        }

        let mut commands: Vec<Command> = by_index
            .into_iter()
            .map(|(index_key, members)| Command::new(names::ZREM).arg(index_key).args(members))
            .collect();

        let mut del = Command::new(names::DEL);
        for key in keys {
            del = del.arg(key).arg(self.keys.reverse_index_key(key));
        }
        commands.push(del);

        RemovalPlan { commands }
    }
}

fn hash_writes<T: FieldMap>(key: &str, record: &T) -> Vec<Command> {
    let fields = record.to_field_map();
    let mut writes = vec![Command::new(names::DEL).arg(key)];
    if !fields.is_empty() {
        let mut hset = Command::new(names::HSET).arg(key);
        for (field, value) in fields {
            hset = hset.arg(field).arg(value);
        }
        writes.push(hset);
    }
    writes
}
