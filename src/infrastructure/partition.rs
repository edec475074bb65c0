//! 文档切分能力（OCR / 版面解析）
//!
//! 把文档字节切分成有序的内容元素。上层只依赖 [`Partitioner`] 这个签名，
//! 可以替换为任何 OCR 引擎；[`LocalPartitioner`] 是内置的纯 Rust 实现：
//!
//! - PDF `OcrOnly`：整份文档的文字层识别（pdf-extract），按段落切分
//! - PDF `HiRes`：逐页版面抽取（lopdf），每页一个元素
//! - 表格（任意策略）：每个工作表一个标题元素 + 一个表格元素（calamine）

use std::fmt;
use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};

use calamine::{Reader, Sheets, Xls, Xlsx};
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::DocumentFormat;

/// 切分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// 由后端自行决定（表格类文档使用）
    Auto,
    /// 只做文字识别，不做版面分析
    OcrOnly,
    /// 版面感知的高精度识别
    HiRes,
}

impl PartitionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PartitionStrategy::Auto => "auto",
            PartitionStrategy::OcrOnly => "ocr_only",
            PartitionStrategy::HiRes => "hi_res",
        }
    }
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 元素类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementCategory {
    Title,
    NarrativeText,
    Table,
}

/// 切分出的内容元素
///
/// `Display` 输出纯文本，`Serialize` 是字典形式。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub category: ElementCategory,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
}

impl Element {
    pub fn new(category: ElementCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            page_number: None,
            page_name: None,
        }
    }

    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = Some(page_name.into());
        self
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// 文档切分能力
///
/// 实现方可以是阻塞的；调用方负责把它放到阻塞线程池中执行。
pub trait Partitioner: Send + Sync {
    fn partition(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
        strategy: PartitionStrategy,
        languages: &[String],
    ) -> AppResult<Vec<Element>>;
}

/// 内置的纯 Rust 切分实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPartitioner;

impl LocalPartitioner {
    pub fn new() -> Self {
        Self
    }

    fn partition_pdf_text_layer(&self, bytes: &[u8]) -> AppResult<Vec<Element>> {
        // pdf-extract 遇到畸形字体表时会 panic
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| AppError::partition_failed("pdf", "ocr_only", "文字层解析崩溃"))?
            .map_err(|e| AppError::partition_failed("pdf", "ocr_only", e.to_string()))?;

        let elements: Vec<Element> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .map(|paragraph| Element::new(ElementCategory::NarrativeText, paragraph))
            .collect();

        debug!("文字层识别得到 {} 个段落", elements.len());
        Ok(elements)
    }

    fn partition_pdf_pages(&self, bytes: &[u8]) -> AppResult<Vec<Element>> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| AppError::partition_failed("pdf", "hi_res", e.to_string()))?;

        let mut elements = Vec::new();
        for page_number in doc.get_pages().keys().copied() {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|e| AppError::partition_failed("pdf", "hi_res", e.to_string()))?;
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            elements.push(Element::new(ElementCategory::NarrativeText, text).with_page_number(page_number));
        }

        debug!("逐页抽取得到 {} 个页面元素", elements.len());
        Ok(elements)
    }

    fn partition_spreadsheet(&self, bytes: &[u8], format: DocumentFormat) -> AppResult<Vec<Element>> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Sheets<Cursor<&[u8]>> = match format {
            DocumentFormat::Xlsx => Xlsx::new(cursor)
                .map(Sheets::Xlsx)
                .map_err(|e| AppError::partition_failed("xlsx", "auto", e.to_string()))?,
            DocumentFormat::Xls => Xls::new(cursor)
                .map(Sheets::Xls)
                .map_err(|e| AppError::partition_failed("xls", "auto", e.to_string()))?,
            DocumentFormat::Pdf => {
                return Err(AppError::partition_failed("pdf", "auto", "不是表格文档"));
            }
        };

        let mut elements = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| AppError::partition_failed(format.as_str(), "auto", e.to_string()))?;

            let rows: Vec<String> = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
                .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
                .map(|cells| cells.join("\t"))
                .collect();

            if rows.is_empty() {
                continue;
            }

            elements.push(Element::new(ElementCategory::Title, sheet_name.as_str()).with_page_name(sheet_name.as_str()));
            elements.push(Element::new(ElementCategory::Table, rows.join("\n")).with_page_name(sheet_name.as_str()));
        }

        debug!("表格切分得到 {} 个元素", elements.len());
        Ok(elements)
    }
}

impl Partitioner for LocalPartitioner {
    fn partition(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
        strategy: PartitionStrategy,
        languages: &[String],
    ) -> AppResult<Vec<Element>> {
        // 文字层抽取不需要语言模型，语言提示仅用于日志
        debug!("切分文档: 格式={}, 策略={}, 语言={:?}", format, strategy, languages);

        if format.is_spreadsheet() {
            return self.partition_spreadsheet(bytes, format);
        }

        match strategy {
            PartitionStrategy::HiRes => self.partition_pdf_pages(bytes),
            PartitionStrategy::OcrOnly | PartitionStrategy::Auto => self.partition_pdf_text_layer(bytes),
        }
    }
}
