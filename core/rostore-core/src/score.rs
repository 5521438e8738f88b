//! Score values for sorted-set indices

use crate::query::Arg;
use std::collections::BTreeMap;
use std::fmt;

/// Named scores a record contributes to its indices (index name → score).
pub type ScoreMap = BTreeMap<String, Score>;

/// A score as supplied by a record or a query bound.
///
/// The backend stores every score as a 64-bit float; integers are kept in
/// their exact textual form on the wire so that the backend performs the
/// conversion, as it does for any other client.
#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Score supplied as text, validated by parsing
    Text(String),
}

impl Score {
    /// Numeric value, or the reason it is not a finite `f64`.
    pub fn to_f64(&self) -> Result<f64, String> {
        let value = match self {
            Score::Int(v) => *v as f64,
            Score::UInt(v) => *v as f64,
            Score::Float(v) => *v,
            Score::Text(s) => s.trim().parse::<f64>().map_err(|e| e.to_string())?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err("value is not a finite number".to_string())
        }
    }

    /// Command argument form of this score.
    pub fn to_arg(&self) -> Arg {
        match self {
            Score::Int(v) => Arg::Int(*v),
            Score::UInt(v) => match i64::try_from(*v) {
                Ok(v) => Arg::Int(v),
                Err(_) => Arg::Str(v.to_string()),
            },
            Score::Float(v) => Arg::Float(*v),
            Score::Text(s) => Arg::Str(s.clone()),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Int(v) => write!(f, "{v}"),
            Score::UInt(v) => write!(f, "{v}"),
            Score::Float(v) => write!(f, "{v}"),
            Score::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(impl From<$t> for Score {
            fn from(v: $t) -> Self {
                Score::$variant(<$target>::from(v))
            }
        })*
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64);
impl_from_int!(UInt, u64; u8, u16, u32, u64);

impl From<usize> for Score {
    fn from(v: usize) -> Self {
        Score::UInt(v as u64)
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Score::Float(v)
    }
}

impl From<f32> for Score {
    fn from(v: f32) -> Self {
        Score::Float(f64::from(v))
    }
}

impl From<&str> for Score {
    fn from(v: &str) -> Self {
        Score::Text(v.to_string())
    }
}

impl From<String> for Score {
    fn from(v: String) -> Self {
        Score::Text(v)
    }
}
