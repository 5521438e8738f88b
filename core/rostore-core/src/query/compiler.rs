//! QueryCompiler — Query를 단일 백엔드 명령으로 변환
//!
//! ```text
//! List  unscored : ZRANGE / ZREVRANGE             key offset end
//! List  scored   : ZRANGEBYSCORE                  key min max [LIMIT offset limit]
//!                  ZREVRANGEBYSCORE               key max min [LIMIT offset limit]
//! Count unscored : ZCARD                          key
//! Count scored   : ZCOUNT                         key min max
//! ```
//!
//! 네트워크를 사용하지 않는 순수 함수입니다.

use super::command::{Arg, Command, names};
use super::{Bound, Query, QueryKind};
use crate::error::{QueryError, StoreResult};
use crate::score::Score;
use tracing::trace;

const POS_INF: &str = "+inf";
const NEG_INF: &str = "-inf";

/// Query를 `kind`에 맞는 명령으로 컴파일
pub fn compile(kind: QueryKind, query: &Query) -> StoreResult<Command> {
    let key = query.key.build()?;
    let cmd = match kind {
        QueryKind::List => compile_list(key, query)?,
        QueryKind::Count => compile_count(key, query)?,
    };
    trace!(%cmd, "compiled query");
    Ok(cmd)
}

fn compile_list(key: String, query: &Query) -> Result<Command, QueryError> {
    let cmd = if query.is_scored() {
        let (min, max) = score_range(query)?;
        let cmd = if query.reverse {
            Command::new(names::ZREVRANGEBYSCORE).arg(key).arg(max).arg(min)
        } else {
            Command::new(names::ZRANGEBYSCORE).arg(key).arg(min).arg(max)
        };
        // 기본값(offset 0, limit -1)이면 LIMIT 절 생략
        if query.offset != 0 || query.limit != -1 {
            cmd.arg(names::LIMIT).arg(query.offset).arg(query.limit)
        } else {
            cmd
        }
    } else {
        let name = if query.reverse {
            names::ZREVRANGE
        } else {
            names::ZRANGE
        };
        Command::new(name)
            .arg(key)
            .arg(query.offset)
            .arg(range_end(query.offset, query.limit))
    };
    Ok(cmd)
}

fn compile_count(key: String, query: &Query) -> Result<Command, QueryError> {
    if query.reverse || query.offset != 0 || query.limit != -1 {
        trace!(
            limit = query.limit,
            offset = query.offset,
            reverse = query.reverse,
            "count ignores pagination and order"
        );
    }
    let cmd = if query.is_scored() {
        let (min, max) = score_range(query)?;
        Command::new(names::ZCOUNT).arg(key).arg(min).arg(max)
    } else {
        Command::new(names::ZCARD).arg(key)
    };
    Ok(cmd)
}

/// Rank range 끝 인덱스. limit <= 0 (무제한 -1 포함)은 그대로 전달
///
/// `i64::MAX`에서 포화됩니다.
pub fn range_end(offset: i64, limit: i64) -> i64 {
    if limit > 0 {
        offset.saturating_add(limit - 1)
    } else {
        limit
    }
}

fn score_range(query: &Query) -> Result<(Arg, Arg), QueryError> {
    let min = match &query.min {
        Some(bound) => bound_arg(bound)?,
        None => Arg::from(NEG_INF),
    };
    let max = match &query.max {
        Some(bound) => bound_arg(bound)?,
        None => Arg::from(POS_INF),
    };
    Ok((min, max))
}

/// 경계 표기: inclusive는 숫자 그대로, exclusive는 `(` 접두사
fn bound_arg(bound: &Bound) -> Result<Arg, QueryError> {
    match bound {
        Bound::Inclusive(score) => bound_value(score),
        Bound::Exclusive(score) => Ok(Arg::Str(format!("({}", bound_value(score)?))),
    }
}

/// 숫자가 아니거나 NaN인 경계는 거부. ±inf는 허용
fn bound_value(score: &Score) -> Result<Arg, QueryError> {
    let invalid = |reason: String| QueryError::InvalidBound {
        value: score.to_string(),
        reason,
    };
    let value = match score {
        Score::Int(_) | Score::UInt(_) => return Ok(score.to_arg()),
        Score::Float(v) => *v,
        Score::Text(s) => s.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?,
    };
    if value.is_nan() {
        return Err(invalid("value is not a number".to_string()));
    }
    let arg = if value == f64::INFINITY {
        Arg::from(POS_INF)
    } else if value == f64::NEG_INFINITY {
        Arg::from(NEG_INF)
    } else {
        Arg::Float(value)
    };
    Ok(arg)
}
