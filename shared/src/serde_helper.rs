//! 后端负载的宽松反序列化辅助函数
//!
//! 后端有的接口返回数字 id，有的返回字符串 id，客户端统一为 `String`。

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

/// 将数字或字符串 id 统一反序列化为 `String`
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// `id` 的可选版本，null 或缺失得到 `None`
pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(StringOrNumber::into_string))
}

/// null 视为空列表
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "opt_id")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        tags: Vec<String>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let p: Probe = serde_json::from_str(r#"{"id": 42, "parent": "7"}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.parent.as_deref(), Some("7"));

        let p: Probe = serde_json::from_str(r#"{"id": "abc", "parent": null}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert!(p.parent.is_none());
    }

    #[test]
    fn test_null_list_becomes_empty() {
        let p: Probe = serde_json::from_str(r#"{"id": 1, "tags": null}"#).unwrap();
        assert!(p.tags.is_empty());
    }
}
