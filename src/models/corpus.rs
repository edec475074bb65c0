//! 单次请求的文档语料
//!
//! 每种文档类型一个槽位；槽位只在对应文档被提供且抽取未硬失败时存在。

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// 语料槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKey {
    PdfText,
    ExcelText,
}

impl CorpusKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CorpusKey::PdfText => "pdf_text",
            CorpusKey::ExcelText => "excel_text",
        }
    }
}

impl fmt::Display for CorpusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 被跳过的文档及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub name: String,
    pub reason: String,
}

/// 文档语料
///
/// 构建阶段逐个写入，构建完成后只读。
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentCorpus {
    texts: BTreeMap<CorpusKey, String>,
    #[serde(skip)]
    skipped: Vec<SkippedDocument>,
}

impl DocumentCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入槽位，返回被覆盖的旧文本
    pub fn insert(&mut self, key: CorpusKey, text: String) -> Option<String> {
        self.texts.insert(key, text)
    }

    pub fn record_skipped(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedDocument {
            name: name.into(),
            reason: reason.into(),
        });
    }

    pub fn get(&self, key: CorpusKey) -> Option<&str> {
        self.texts.get(&key).map(String::as_str)
    }

    /// 槽位存在且不是空白文本
    pub fn non_blank(&self, key: CorpusKey) -> Option<&str> {
        self.get(key).filter(|text| !text.trim().is_empty())
    }

    pub fn contains(&self, key: CorpusKey) -> bool {
        self.texts.contains_key(&key)
    }

    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
