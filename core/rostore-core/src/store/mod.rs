//! Store façade — 한 레코드 타입에 대한 Put/Get/List/Count/Delete
//!
//! 연산은 `put`, `get`, `list`, `delete` 모듈에 나뉘어 구현됩니다.
//! 모든 입력 검증과 쿼리 컴파일은 연결을 획득하기 전에 끝납니다.

pub mod delete;
pub mod get;
pub mod list;
pub mod put;
pub mod unit_of_work;

pub use unit_of_work::{Committed, Discarded, Open, UnitOfWork, UnitState};

use crate::backend::ConnectionProvider;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::index::IndexMaintainer;
use crate::keys::KeyBuilder;
use crate::query::{Command, Query, QueryKind, compile};
use crate::record::Record;
use std::fmt;
use std::marker::PhantomData;
use tracing::info;

/// 레코드 타입 `T`의 저장소
///
/// 상태를 갖지 않으며 (설정과 공급자만 보유) 스레드 간 공유할 수 있습니다.
pub struct Store<T: Record, P: ConnectionProvider> {
    provider: P,
    config: StoreConfig,
    keys: KeyBuilder,
    maintainer: IndexMaintainer,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, P: ConnectionProvider> Store<T, P> {
    /// 설정 검증 후 Store 생성
    pub fn new(provider: P, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let keys = KeyBuilder::new(&config, T::type_name());
        let maintainer = IndexMaintainer::new(keys.clone(), config.hash_store_enabled);
        info!(
            prefix = keys.prefix(),
            hash_store = config.hash_store_enabled,
            "store created"
        );
        Ok(Self {
            provider,
            config,
            keys,
            maintainer,
            _record: PhantomData,
        })
    }

    /// 기본 설정으로 생성
    pub fn with_defaults(provider: P) -> StoreResult<Self> {
        Self::new(provider, StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn keys(&self) -> &KeyBuilder {
        &self.keys
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 레코드의 primary key
    pub fn key_of(&self, record: &T) -> StoreResult<String> {
        self.keys.primary_key(&record.key_suffix())
    }

    /// Prefix가 없는 쿼리에 store prefix를 주입한 뒤 컴파일
    pub(crate) fn compile(&self, kind: QueryKind, query: &Query) -> StoreResult<Command> {
        let query = query.with_default_prefix(self.keys.prefix(), self.keys.score_key_delimiter());
        compile(kind, &query)
    }
}

impl<T: Record, P: ConnectionProvider + fmt::Debug> fmt::Debug for Store<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("type", &T::type_name())
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish()
    }
}
