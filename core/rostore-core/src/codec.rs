//! Field-map codec — 레코드 ↔ 평탄한 문자열 필드 맵
//!
//! 해시에 저장되는 레코드는 `field → string` 목록으로 인코딩됩니다.
//! 디코딩은 맵에 존재하는 필드만 덮어씁니다 (없는 필드는 현재 값 유지).
//! 보통 `#[derive(FieldMap)]`으로 구현합니다.

use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;

/// 인코딩된 필드 목록 (필드 선언 순서 유지)
pub type FieldValues = Vec<(String, String)>;

/// 해시에서 읽어온 필드 맵
pub type RawFields = HashMap<String, String>;

/// 레코드 전체 codec
pub trait FieldMap {
    /// 레코드를 필드 목록으로 인코딩
    fn to_field_map(&self) -> FieldValues;

    /// 필드 맵을 현재 레코드에 적용
    ///
    /// `key`는 오류 메시지용 primary key입니다.
    fn apply_field_map(&mut self, key: &str, fields: &RawFields) -> StoreResult<()>;
}

/// 단일 필드 값 codec
pub trait FieldValue: Sized {
    /// 오류 메시지에 표시되는 타입 이름
    const TYPE_NAME: &'static str;

    /// `None`이면 필드를 저장하지 않음
    fn encode(&self) -> Option<String>;

    fn decode(raw: &str) -> Result<Self, String>;
}

/// 필드 하나를 디코딩하고 실패 시 `TypeMismatch`로 변환
pub fn decode_field<T: FieldValue>(key: &str, field: &str, raw: &str) -> StoreResult<T> {
    T::decode(raw).map_err(|_| StoreError::TypeMismatch {
        key: key.to_string(),
        field: field.to_string(),
        expected: T::TYPE_NAME.to_string(),
        actual: raw.to_string(),
    })
}

macro_rules! impl_field_value_parse {
    ($($t:ty),*) => {
        $(impl FieldValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn encode(&self) -> Option<String> {
                Some(self.to_string())
            }

            fn decode(raw: &str) -> Result<Self, String> {
                raw.parse::<$t>().map_err(|e| e.to_string())
            }
        })*
    };
}

impl_field_value_parse!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char);

impl FieldValue for String {
    const TYPE_NAME: &'static str = "String";

    fn encode(&self) -> Option<String> {
        Some(self.clone())
    }

    fn decode(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl FieldValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn encode(&self) -> Option<String> {
        Some(if *self { "1" } else { "0" }.to_string())
    }

    fn decode(raw: &str) -> Result<Self, String> {
        match raw {
            "1" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(format!("invalid bool {other:?}")),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn encode(&self) -> Option<String> {
        self.as_ref().and_then(FieldValue::encode)
    }

    fn decode(raw: &str) -> Result<Self, String> {
        T::decode(raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Manual {
        id: u64,
        title: String,
        note: Option<String>,
    }

    impl FieldMap for Manual {
        fn to_field_map(&self) -> FieldValues {
            let mut fields = Vec::new();
            if let Some(v) = self.id.encode() {
                fields.push(("id".to_string(), v));
            }
            if let Some(v) = self.title.encode() {
                fields.push(("title".to_string(), v));
            }
            if let Some(v) = self.note.encode() {
                fields.push(("note".to_string(), v));
            }
            fields
        }

        fn apply_field_map(&mut self, key: &str, fields: &RawFields) -> StoreResult<()> {
            if let Some(raw) = fields.get("id") {
                self.id = decode_field(key, "id", raw)?;
            }
            if let Some(raw) = fields.get("title") {
                self.title = decode_field(key, "title", raw)?;
            }
            if let Some(raw) = fields.get("note") {
                self.note = decode_field(key, "note", raw)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_none_fields_are_omitted() {
        let m = Manual {
            id: 1,
            title: "t".to_string(),
            note: None,
        };
        let fields = m.to_field_map();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("id".to_string(), "1".to_string()));
    }

    #[test]
    fn test_apply_overwrites_present_fields_only() {
        let mut m = Manual {
            id: 1,
            title: "kept".to_string(),
            note: None,
        };
        let raw: RawFields = [("note".to_string(), "hi".to_string())].into_iter().collect();
        m.apply_field_map("Manual:1", &raw).unwrap();
        assert_eq!(m.title, "kept");
        assert_eq!(m.note.as_deref(), Some("hi"));
    }

    #[test]
    fn test_type_mismatch() {
        let mut m = Manual::default();
        let raw: RawFields = [("id".to_string(), "abc".to_string())].into_iter().collect();
        let err = m.apply_field_map("Manual:1", &raw).unwrap_err();
        match err {
            StoreError::TypeMismatch {
                key,
                field,
                expected,
                actual,
            } => {
                assert_eq!(key, "Manual:1");
                assert_eq!(field, "id");
                assert_eq!(expected, "u64");
                assert_eq!(actual, "abc");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_decodes_through_inner_type() {
        assert_eq!(Option::<String>::decode(""), Ok(Some(String::new())));
        assert!(Option::<u64>::decode("").is_err());
        assert_eq!(Option::<u64>::decode("7"), Ok(Some(7)));

        let mut m = Manual {
            note: Some("old".to_string()),
            ..Default::default()
        };
        let raw: RawFields = [("note".to_string(), String::new())].into_iter().collect();
        m.apply_field_map("Manual:1", &raw).unwrap();
        assert_eq!(m.note.as_deref(), Some(""));
    }

    #[test]
    fn test_bool_codec() {
        assert_eq!(true.encode().as_deref(), Some("1"));
        assert_eq!(bool::decode("0"), Ok(false));
        assert_eq!(bool::decode("true"), Ok(true));
        assert!(bool::decode("yes").is_err());
    }
}
