//! # rostore — Redis 정렬 집합 인덱스 기반 객체 저장소
//!
//! rostore는 도메인 레코드를 해시로 저장하고, 레코드가 선언한 score로
//! 정렬 집합(sorted set) 인덱스를 유지하는 타입 안전 저장소입니다.
//!
//! ## 주요 특징
//!
//! - **자동 인덱스 유지**: Put/Delete 시 인덱스와 역색인이 함께 갱신
//! - **원자적 쓰기**: 한 번의 Put/Delete는 하나의 트랜잭션 (MULTI/EXEC)
//! - **Query Builder**: score 범위, 페이지네이션, 역순 조회
//! - **Typestate UnitOfWork**: 이중 커밋을 컴파일 타임에 방지
//! - **교체 가능한 백엔드**: 인메모리 백엔드 내장, `redis` feature로 Redis 연결
//!
//! ## 빠른 시작
//!
//! ```rust
//! use rostore_core::{FieldMap, MemoryBackend, Query, Record, ScoreMap, Store};
//!
//! #[derive(Debug, Default, FieldMap)]
//! struct Post {
//!     id: u64,
//!     title: String,
//!     updated_at: i64,
//! }
//!
//! impl Record for Post {
//!     fn key_suffix(&self) -> String {
//!         self.id.to_string()
//!     }
//!
//!     fn score_map(&self) -> Option<ScoreMap> {
//!         let mut scores = ScoreMap::new();
//!         scores.insert("recent".to_string(), self.updated_at.into());
//!         Some(scores)
//!     }
//! }
//!
//! # fn main() -> rostore_core::StoreResult<()> {
//! let store: Store<Post, _> = Store::with_defaults(MemoryBackend::new())?;
//!
//! // 저장: Post:1 해시 + Post/recent 인덱스
//! store.put(&Post { id: 1, title: "hello".to_string(), updated_at: 10 })?;
//! store.put(&Post { id: 2, title: "world".to_string(), updated_at: 20 })?;
//!
//! // 최신순 조회
//! let posts = store.list(&Query::new().key("recent").reverse())?;
//! assert_eq!(posts[0].title, "world");
//!
//! // score 범위 개수
//! assert_eq!(store.count(&Query::new().key("recent").gt(10))?, 1);
//!
//! // 삭제
//! store.delete(&Post { id: 1, ..Default::default() })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Key 구조
//!
//! ```text
//! Post:1                 hash   레코드 필드
//! Post/recent            zset   member = Post:1, score = updated_at
//! Post:1:scoreSetKeys    set    Post:1이 속한 index key
//! ```
//!
//! ## 모듈 구조
//!
//! - [`store`] — Store façade ([`Store`]) 와 [`store::UnitOfWork`]
//! - [`query`] — Query 모델과 컴파일러
//! - [`index`] — 인덱스 유지 계획
//! - [`keys`] — key 명명 규칙
//! - [`backend`] — 연결 계약과 인메모리 / Redis 백엔드
//! - [`codec`] — 레코드 ↔ 필드 맵

// derive 매크로가 생성하는 `::rostore_core::…` 경로를 크레이트 내부에서도 사용
extern crate self as rostore_core;

pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod keys;
pub mod logging;
pub mod query;
pub mod record;
pub mod score;
pub mod store;

// ════════════════════════════════════════════
// Public API
// ════════════════════════════════════════════

pub use backend::{Connection, ConnectionProvider, MemoryBackend, Reply};
pub use codec::{FieldMap, FieldValue};
pub use config::StoreConfig;
pub use error::{QueryError, StoreError, StoreResult};
pub use query::{Modifier, Query, QueryKind};
pub use record::Record;
pub use rostore_derive::FieldMap;
pub use score::{Score, ScoreMap};
pub use store::Store;

#[cfg(feature = "redis")]
pub use backend::redis::RedisProvider;
