//! 통합 테스트 공용 모델

#![allow(dead_code)]

use rostore_core::{FieldMap, MemoryBackend, Record, ScoreMap, Store, StoreConfig};

pub const HOUR: i64 = 3600;
pub const NOW: i64 = 1_700_000_000;

#[derive(Debug, Default, Clone, PartialEq, FieldMap)]
pub struct Post {
    pub id: u64,
    #[rostore(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    pub body: String,
    #[rostore(rename = "createdAt")]
    pub created_at: i64,
    #[rostore(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Record for Post {
    fn key_suffix(&self) -> String {
        if self.id == 0 {
            String::new()
        } else {
            self.id.to_string()
        }
    }

    fn score_map(&self) -> Option<ScoreMap> {
        let mut scores = ScoreMap::new();
        scores.insert("recent".to_string(), self.updated_at.into());
        scores.insert(format!("user:{}", self.user_id), self.updated_at.into());
        Some(scores)
    }
}

/// score_map()을 구현하지 않은 레코드
#[derive(Debug, Default, Clone, FieldMap)]
pub struct Unindexed {
    pub id: u64,
}

impl Record for Unindexed {
    fn key_suffix(&self) -> String {
        self.id.to_string()
    }
}

pub fn post(id: u64, user_id: u64, updated_at: i64) -> Post {
    Post {
        id,
        user_id,
        title: format!("post {id}"),
        body: format!("body of post {id}"),
        created_at: updated_at - HOUR,
        updated_at,
    }
}

/// NOW 기준 -2h..+2h 다섯 개 (id 1..=5, user 1/2 번갈아)
pub fn timeline() -> Vec<Post> {
    [-2, -1, 0, 1, 2]
        .into_iter()
        .enumerate()
        .map(|(i, h)| post(i as u64 + 1, (i as u64 % 2) + 1, NOW + h * HOUR))
        .collect()
}

pub fn store() -> (MemoryBackend, Store<Post, MemoryBackend>) {
    store_with(StoreConfig::default())
}

pub fn store_with(config: StoreConfig) -> (MemoryBackend, Store<Post, MemoryBackend>) {
    rostore_core::logging::init_test();
    let backend = MemoryBackend::new();
    let store = Store::new(backend.clone(), config).expect("valid config");
    (backend, store)
}

pub fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}
