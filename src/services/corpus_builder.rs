//! 语料组装 - 业务能力层
//!
//! 按文件后缀把每个文档分派给文本抽取适配器，结果写入对应槽位：
//! `.pdf` → `pdf_text`，`.xlsx`/`.xls` → `excel_text`。
//! 不支持或不在白名单中的文档直接跳过，不报错。

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{is_extension_allowed, Config};
use crate::error::{AppError, AppResult};
use crate::models::{Document, DocumentCorpus};
use crate::services::text_extraction::TextExtractor;
use crate::utils::truncate_text;

/// 语料组装器
pub struct CorpusBuilder {
    extractor: TextExtractor,
    allowed_document_types: Vec<String>,
}

impl CorpusBuilder {
    pub fn new(extractor: TextExtractor, config: &Config) -> Self {
        Self {
            extractor,
            allowed_document_types: config.allowed_document_types.clone(),
        }
    }

    /// 组装一次请求的语料
    ///
    /// 文档按给定顺序处理；同一槽位出现多次时后者覆盖前者。
    /// 切分在阻塞线程池中执行。
    pub async fn build(&self, documents: Vec<Document>) -> AppResult<DocumentCorpus> {
        let mut corpus = DocumentCorpus::new();

        for document in documents {
            let Some(format) = document.format() else {
                warn!("⚠️ 跳过不支持的文档: {}", document.name);
                corpus.record_skipped(&document.name, "unsupported extension");
                continue;
            };

            if !is_extension_allowed(&self.allowed_document_types, Path::new(&document.name)) {
                warn!("⚠️ 跳过不在白名单中的文档: {}", document.name);
                corpus.record_skipped(&document.name, "extension not allowed");
                continue;
            }

            let key = format.corpus_key();
            info!("📄 抽取文档 {} ({}) → {}", document.name, format, key);

            let extractor = self.extractor.clone();
            let Document { name, bytes } = document;
            let extracted = tokio::task::spawn_blocking(move || extractor.try_extract_text(&bytes, format))
                .await
                .map_err(|e| AppError::Other(format!("文本抽取任务异常终止 ({}): {}", name, e)))?;

            match extracted {
                Ok(text) => {
                    debug!("{} 抽取结果: {}", key, truncate_text(&text, 200));
                    info!("✓ {} 抽取完成，{} 字符", key, text.chars().count());
                    if corpus.insert(key, text).is_some() {
                        warn!("⚠️ {} 已存在，被 {} 覆盖", key, name);
                    }
                }
                Err(e) => {
                    warn!("⚠️ 文档抽取失败，跳过 {}: {}", name, e);
                    corpus.record_skipped(&name, e.to_string());
                }
            }
        }

        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{Element, ElementCategory, PartitionStrategy, Partitioner};
    use crate::models::{CorpusKey, DocumentFormat};
    use std::sync::Arc;

    /// 把文档字节原样当作文本返回；以 "FAIL" 开头的表格切分失败
    struct EchoPartitioner;

    impl Partitioner for EchoPartitioner {
        fn partition(
            &self,
            bytes: &[u8],
            format: DocumentFormat,
            strategy: PartitionStrategy,
            _languages: &[String],
        ) -> AppResult<Vec<Element>> {
            let text = String::from_utf8_lossy(bytes).to_string();
            if format.is_spreadsheet() && text.starts_with("FAIL") {
                return Err(AppError::partition_failed(format.as_str(), strategy.as_str(), "corrupt workbook"));
            }
            Ok(vec![Element::new(ElementCategory::NarrativeText, text)])
        }
    }

    fn builder(config: &Config) -> CorpusBuilder {
        let extractor = TextExtractor::new(Arc::new(EchoPartitioner), config.ocr_languages.clone());
        CorpusBuilder::new(extractor, config)
    }

    #[tokio::test]
    async fn test_pdf_and_spreadsheet_land_in_own_slots() {
        let corpus = builder(&Config::default())
            .build(vec![
                Document::new("bill_of_lading.pdf", b"B/L No: MEDU1234567".to_vec()),
                Document::new("invoice.xlsx", b"Total Gross Weight (KG): 100".to_vec()),
            ])
            .await
            .unwrap();

        assert_eq!(corpus.get(CorpusKey::PdfText), Some("B/L No: MEDU1234567"));
        assert_eq!(corpus.get(CorpusKey::ExcelText), Some("Total Gross Weight (KG): 100"));
        assert!(corpus.skipped().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_documents_are_skipped() {
        let corpus = builder(&Config::default())
            .build(vec![
                Document::new("photo.png", b"png".to_vec()),
                Document::new("notes.docx", b"docx".to_vec()),
            ])
            .await
            .unwrap();

        assert!(corpus.is_empty());
        assert_eq!(corpus.skipped().len(), 2);
        assert_eq!(corpus.skipped()[0].name, "photo.png");
    }

    #[tokio::test]
    async fn test_allow_list_is_respected() {
        let config = Config {
            allowed_document_types: vec![".pdf".to_string(), ".xlsx".to_string()],
            ..Config::default()
        };
        let corpus = builder(&config)
            .build(vec![Document::new("legacy.xls", b"old invoice".to_vec())])
            .await
            .unwrap();

        assert!(!corpus.contains(CorpusKey::ExcelText));
        assert_eq!(corpus.skipped()[0].reason, "extension not allowed");
    }

    #[tokio::test]
    async fn test_failed_spreadsheet_leaves_slot_absent() {
        let corpus = builder(&Config::default())
            .build(vec![Document::new("invoice.xlsx", b"FAIL".to_vec())])
            .await
            .unwrap();

        assert!(!corpus.contains(CorpusKey::ExcelText));
        assert_eq!(corpus.skipped().len(), 1);
    }

    #[tokio::test]
    async fn test_later_document_overwrites_slot() {
        let corpus = builder(&Config::default())
            .build(vec![
                Document::new("first.pdf", b"first".to_vec()),
                Document::new("second.PDF", b"second".to_vec()),
            ])
            .await
            .unwrap();

        assert_eq!(corpus.get(CorpusKey::PdfText), Some("second"));
    }

    /// PDF 一律 panic，表格原样返回
    struct PdfCrashPartitioner;

    impl Partitioner for PdfCrashPartitioner {
        fn partition(
            &self,
            bytes: &[u8],
            format: DocumentFormat,
            _strategy: PartitionStrategy,
            _languages: &[String],
        ) -> AppResult<Vec<Element>> {
            if format == DocumentFormat::Pdf {
                panic!("ocr engine crashed");
            }
            Ok(vec![Element::new(
                ElementCategory::NarrativeText,
                String::from_utf8_lossy(bytes).to_string(),
            )])
        }
    }

    #[tokio::test]
    async fn test_crashing_pdf_backend_yields_empty_pdf_text() {
        let config = Config::default();
        let extractor = TextExtractor::new(Arc::new(PdfCrashPartitioner), config.ocr_languages.clone());
        let corpus = CorpusBuilder::new(extractor, &config)
            .build(vec![
                Document::new("a.pdf", b"%PDF".to_vec()),
                Document::new("b.xlsx", b"Total Value (USD): 50".to_vec()),
            ])
            .await
            .unwrap();

        assert_eq!(corpus.get(CorpusKey::PdfText), Some(""));
        assert_eq!(corpus.get(CorpusKey::ExcelText), Some("Total Value (USD): 50"));
    }
}
