//! 提单实体字段

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 解析失败时 `error` 字段的固定标记
pub const PARSE_FAILURE_MARKER: &str = "Failed to parse JSON";

/// 从单据中抽取的五个实体字段
///
/// 找不到的字段约定为空字符串，而不是 null 或缺失。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingEntity {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub bill_of_lading_number: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub container_number: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub consignee_name: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub consignee_address: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub date_of_export: String,
}

/// null 视为空串，未加引号的数字和布尔值按原样转成字符串
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "object" }),
            &"a string or scalar",
        )),
    }
}

/// 实体抽取结果
///
/// `Unparsed` 是"错误形态"的记录：携带去掉代码围栏后的原始回复，
/// 让调用方能区分"字段缺失"和"整体解析失败"。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityOutcome {
    Extracted(ShippingEntity),
    Unparsed { error: String, raw_response: String },
}

impl EntityOutcome {
    pub fn unparsed(raw_response: impl Into<String>) -> Self {
        EntityOutcome::Unparsed {
            error: PARSE_FAILURE_MARKER.to_string(),
            raw_response: raw_response.into(),
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, EntityOutcome::Extracted(_))
    }

    pub fn entity(&self) -> Option<&ShippingEntity> {
        match self {
            EntityOutcome::Extracted(entity) => Some(entity),
            EntityOutcome::Unparsed { .. } => None,
        }
    }
}

impl Default for EntityOutcome {
    fn default() -> Self {
        EntityOutcome::Extracted(ShippingEntity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let entity: ShippingEntity = serde_json::from_value(json!({
            "bill_of_lading_number": "MAEU123456789",
            "container_number": null
        }))
        .unwrap();
        assert_eq!(entity.bill_of_lading_number, "MAEU123456789");
        assert_eq!(entity.container_number, "");
        assert_eq!(entity.date_of_export, "");
    }

    #[test]
    fn test_unquoted_scalars_are_kept_as_text() {
        let entity: ShippingEntity = serde_json::from_value(json!({
            "bill_of_lading_number": 123456789,
            "container_number": "MSCU7654321",
            "date_of_export": 20240115
        }))
        .unwrap();
        assert_eq!(entity.bill_of_lading_number, "123456789");
        assert_eq!(entity.container_number, "MSCU7654321");
        assert_eq!(entity.date_of_export, "20240115");
    }

    #[test]
    fn test_nested_field_value_is_rejected() {
        let result: Result<ShippingEntity, _> = serde_json::from_value(json!({
            "consignee_address": {"street": "1 Harbour Rd"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unparsed_serializes_error_shape() {
        let json = serde_json::to_value(EntityOutcome::unparsed("not json")).unwrap();
        assert_eq!(json, json!({"error": PARSE_FAILURE_MARKER, "raw_response": "not json"}));
    }

    #[test]
    fn test_extracted_serializes_flat() {
        let json = serde_json::to_value(EntityOutcome::default()).unwrap();
        assert_eq!(json["consignee_name"], "");
        assert!(json.get("error").is_none());
    }
}
