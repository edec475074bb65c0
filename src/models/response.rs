use serde::Serialize;

use crate::models::entity::EntityOutcome;
use crate::models::series::NumericSeries;

/// 一次请求的完整响应
///
/// 所有字段始终存在；来源文档缺失时为空值。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResponse {
    pub general_entity: EntityOutcome,
    pub gross_weight_list: Vec<f64>,
    pub average_gross_weight: Option<f64>,
    pub price_list: Vec<f64>,
    pub average_price: Option<f64>,
    pub line_item_count: String,
}

impl ExtractionResponse {
    pub fn new(
        general_entity: EntityOutcome,
        gross_weight: NumericSeries,
        price: NumericSeries,
        line_item_count: String,
    ) -> Self {
        Self {
            general_entity,
            gross_weight_list: gross_weight.values,
            average_gross_weight: gross_weight.mean,
            price_list: price.values,
            average_price: price.mean,
            line_item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_present_when_empty() {
        let json = serde_json::to_value(ExtractionResponse::default()).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "general_entity",
            "gross_weight_list",
            "average_gross_weight",
            "price_list",
            "average_price",
            "line_item_count",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert!(json["average_price"].is_null());
    }
}
