//! 模型回复解析
//!
//! 模型输出是自由文本，这里把它尽力还原成结构化数据。
//! 每个函数只接收原始回复字符串，与实际的 LLM 调用无关，便于单独测试。

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{EntityOutcome, ShippingEntity};

/// 开头的代码围栏，允许带语言标记（如 ```json）
static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*\s*").expect("valid leading fence pattern"));

/// 结尾的代码围栏
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid trailing fence pattern"));

/// 去掉首尾空白以及 Markdown 代码围栏
pub fn strip_code_fence(reply: &str) -> String {
    let text = reply.trim();
    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.trim().to_string()
}

/// 解析实体抽取的回复
///
/// 永不失败：JSON 无法解析时返回携带原始文本的错误形态记录。
pub fn parse_entity_reply(reply: &str) -> EntityOutcome {
    let cleaned = strip_code_fence(reply);
    match serde_json::from_str::<ShippingEntity>(&cleaned) {
        Ok(entity) => EntityOutcome::Extracted(entity),
        Err(_) => EntityOutcome::unparsed(cleaned),
    }
}

/// 数值列表中出现无法解析的项
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无法解析数值: '{token}'")]
pub struct InvalidNumber {
    pub token: String,
}

/// 解析形如 `[1, 2.5, 3]` 的数值列表回复
///
/// 只去掉最外层的一个 `[` 和一个 `]`；去掉后为空表示空列表。
/// 任何一项不是有限浮点数都整体失败，不返回部分结果。
pub fn parse_number_list(reply: &str) -> Result<Vec<f64>, InvalidNumber> {
    let text = reply.trim();
    let text = text.strip_prefix('[').unwrap_or(text);
    let text = text.strip_suffix(']').unwrap_or(text);

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(str::trim)
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| InvalidNumber {
                    token: token.to_string(),
                })
        })
        .collect()
}
