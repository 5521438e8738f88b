//! Record 트레이트 — store에 저장 가능한 도메인 객체

use crate::codec::FieldMap;
use crate::score::ScoreMap;

/// Store에 저장되는 레코드
///
/// `score_map()`의 기본 구현은 `None`을 반환하며, 이 경우 Put은
/// `MissingScoreMap`으로 실패합니다. 인덱스를 사용하지 않는 레코드는
/// 빈 맵을 반환해야 합니다.
///
/// # Example
///
/// ```rust
/// use rostore_core::{FieldMap, Record, ScoreMap};
///
/// #[derive(Debug, Default, FieldMap)]
/// struct Post {
///     id: u64,
///     user_id: u64,
///     updated_at: i64,
/// }
///
/// impl Record for Post {
///     fn key_suffix(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn score_map(&self) -> Option<ScoreMap> {
///         let mut scores = ScoreMap::new();
///         scores.insert("recent".to_string(), self.updated_at.into());
///         scores.insert(format!("user:{}", self.user_id), self.updated_at.into());
///         Some(scores)
///     }
/// }
///
/// assert_eq!(Post::type_name(), "Post");
/// ```
pub trait Record: FieldMap + Default {
    /// 기본 key prefix로 쓰이는 타입 이름 (경로와 제네릭 인자 제외)
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// 타입 내에서 레코드를 식별하는 key 접미사 (비어 있으면 안 됨)
    fn key_suffix(&self) -> String;

    /// 인덱스 이름 → score
    fn score_map(&self) -> Option<ScoreMap> {
        None
    }
}

/// `a::b::Post<c::D>` → `Post`
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
