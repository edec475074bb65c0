//! 文本抽取适配器 - 业务能力层
//!
//! 把一个文档（PDF 或表格）压平成一段纯文本。
//!
//! - 表格：切分后按原顺序用换行拼接各元素
//! - PDF：先 `ocr_only`，出错或为空则退回 `hi_res`；两者都失败返回空串

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::{Element, PartitionStrategy, Partitioner};
use crate::models::DocumentFormat;

/// 文本抽取适配器
///
/// 职责：
/// - 隐藏各格式的切分差异
/// - 不修改输入
/// - 不认识语料槽位
#[derive(Clone)]
pub struct TextExtractor {
    partitioner: Arc<dyn Partitioner>,
    languages: Vec<String>,
}

impl TextExtractor {
    pub fn new(partitioner: Arc<dyn Partitioner>, languages: Vec<String>) -> Self {
        Self {
            partitioner,
            languages,
        }
    }

    /// 抽取文本；无法抽取时返回空串
    pub fn extract_text(&self, bytes: &[u8], format: DocumentFormat) -> String {
        self.try_extract_text(bytes, format).unwrap_or_else(|e| {
            warn!("⚠️ 文本抽取失败，按空文本处理: {}", e);
            String::new()
        })
    }

    /// 抽取文本
    ///
    /// PDF 的失败在内部回退处理，永远返回 `Ok`；
    /// 表格切分失败返回 `Err`，由调用方决定是否写入语料。
    pub fn try_extract_text(&self, bytes: &[u8], format: DocumentFormat) -> AppResult<String> {
        if format.is_spreadsheet() {
            self.extract_spreadsheet(bytes, format)
        } else {
            Ok(self.extract_pdf(bytes))
        }
    }

    fn extract_spreadsheet(&self, bytes: &[u8], format: DocumentFormat) -> AppResult<String> {
        let elements = self.partition(bytes, format, PartitionStrategy::Auto)?;
        debug!("表格切分完成，共 {} 个元素", elements.len());
        Ok(join_elements(&elements))
    }

    fn extract_pdf(&self, bytes: &[u8]) -> String {
        match self.partition(bytes, DocumentFormat::Pdf, PartitionStrategy::OcrOnly) {
            Ok(elements) if !elements.is_empty() => {
                debug!("OCR 策略成功，共 {} 个元素", elements.len());
                return join_elements(&elements).trim().to_string();
            }
            Ok(_) => info!("OCR 策略未识别到内容，改用 hi_res"),
            Err(e) => warn!("OCR 策略失败: {}", e),
        }

        match self.partition(bytes, DocumentFormat::Pdf, PartitionStrategy::HiRes) {
            Ok(elements) => {
                debug!("hi_res 策略完成，共 {} 个元素", elements.len());
                join_elements(&elements).trim().to_string()
            }
            Err(e) => {
                warn!("⚠️ hi_res OCR 失败: {}", e);
                String::new()
            }
        }
    }

    /// 调用切分能力；后端 panic 按该策略失败处理
    fn partition(&self, bytes: &[u8], format: DocumentFormat, strategy: PartitionStrategy) -> AppResult<Vec<Element>> {
        catch_unwind(AssertUnwindSafe(|| {
            self.partitioner.partition(bytes, format, strategy, &self.languages)
        }))
        .unwrap_or_else(|payload| {
            Err(AppError::partition_failed(
                format.as_str(),
                strategy.as_str(),
                format!("切分后端崩溃: {}", panic_message(payload.as_ref())),
            ))
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn join_elements(elements: &[Element]) -> String {
    elements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
