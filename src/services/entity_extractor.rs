//! 实体字段抽取 - 业务能力层
//!
//! 只负责"从单据文本中取出五个提单字段"这一能力。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::CompletionService;
use crate::error::AppResult;
use crate::models::{CorpusKey, DocumentCorpus, EntityOutcome};
use crate::services::prompts::entity_prompt;
use crate::services::reply_parser::parse_entity_reply;
use crate::utils::truncate_text;

/// 实体字段抽取器
pub struct EntityExtractor {
    service: Arc<dyn CompletionService>,
}

impl EntityExtractor {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// 抽取实体字段
    ///
    /// 所有非空槽位按 `pdf_text`、`excel_text` 的顺序带标签拼入提示词；
    /// 两者都没有时不调用模型，直接返回全空记录。
    /// 回复无法解析时返回错误形态记录而不是 `Err`。
    pub async fn extract(&self, corpus: &DocumentCorpus) -> AppResult<EntityOutcome> {
        let sections = labelled_sections(corpus);
        if sections.is_empty() {
            info!("语料中没有可用文本，跳过实体抽取");
            return Ok(EntityOutcome::default());
        }

        info!("🤖 从 {} 个槽位抽取实体字段...", sections.len());
        let completion = self.service.generate(&entity_prompt(&sections.join("\n\n"))).await?;
        debug!("实体抽取回复: {}", truncate_text(&completion.text, 300));

        let outcome = parse_entity_reply(&completion.text);
        if outcome.is_extracted() {
            info!("✓ 实体字段解析成功");
        } else {
            warn!("⚠️ 实体抽取回复不是合法 JSON，返回原始文本");
        }
        Ok(outcome)
    }
}

fn labelled_sections(corpus: &DocumentCorpus) -> Vec<String> {
    [CorpusKey::PdfText, CorpusKey::ExcelText]
        .into_iter()
        .filter_map(|key| corpus.non_blank(key).map(|text| format!("{}:\n{}", key, text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Completion;
    use crate::models::PARSE_FAILURE_MARKER;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 固定回复的补全服务，记录收到的提示词
    struct FixedReply {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedReply {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for FixedReply {
        async fn generate(&self, prompt: &str) -> AppResult<Completion> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Completion::new(self.reply.clone()))
        }
    }

    fn corpus_with(key: CorpusKey, text: &str) -> DocumentCorpus {
        let mut corpus = DocumentCorpus::new();
        corpus.insert(key, text.to_string());
        corpus
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let service = FixedReply::new("```json\n{\"bill_of_lading_number\": \"MEDU1234567\", \"consignee_name\": \"Acme\"}\n```");
        let extractor = EntityExtractor::new(service.clone());

        let outcome = extractor
            .extract(&corpus_with(CorpusKey::PdfText, "B/L MEDU1234567"))
            .await
            .unwrap();

        let entity = outcome.entity().expect("entity should parse");
        assert_eq!(entity.bill_of_lading_number, "MEDU1234567");
        assert_eq!(entity.consignee_name, "Acme");
        assert_eq!(entity.container_number, "");
        assert!(service.prompts.lock().unwrap()[0].contains("B/L MEDU1234567"));
    }

    #[tokio::test]
    async fn test_non_json_reply_becomes_error_shape() {
        let extractor = EntityExtractor::new(FixedReply::new("Sorry, no shipping data here."));
        let outcome = extractor
            .extract(&corpus_with(CorpusKey::PdfText, "blurry scan"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            EntityOutcome::Unparsed {
                error: PARSE_FAILURE_MARKER.to_string(),
                raw_response: "Sorry, no shipping data here.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_excel_only_corpus_is_used() {
        let service = FixedReply::new("{}");
        let extractor = EntityExtractor::new(service.clone());
        extractor
            .extract(&corpus_with(CorpusKey::ExcelText, "Consignee: Acme"))
            .await
            .unwrap();

        assert!(service.prompts.lock().unwrap()[0].contains("Consignee: Acme"));
    }

    #[tokio::test]
    async fn test_prompt_carries_both_slots() {
        let service = FixedReply::new("{}");
        let extractor = EntityExtractor::new(service.clone());
        let mut corpus = corpus_with(CorpusKey::PdfText, "BL MEDU1");
        corpus.insert(CorpusKey::ExcelText, "Consignee: Acme Imports".to_string());

        extractor.extract(&corpus).await.unwrap();

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("pdf_text:\nBL MEDU1"));
        assert!(prompts[0].contains("excel_text:\nConsignee: Acme Imports"));
    }

    #[tokio::test]
    async fn test_blank_slot_is_left_out_of_prompt() {
        let service = FixedReply::new("{}");
        let extractor = EntityExtractor::new(service.clone());
        let mut corpus = corpus_with(CorpusKey::PdfText, "   ");
        corpus.insert(CorpusKey::ExcelText, "Consignee: Acme".to_string());

        extractor.extract(&corpus).await.unwrap();

        let prompts = service.prompts.lock().unwrap();
        assert!(!prompts[0].contains("pdf_text:"));
        assert!(prompts[0].contains("excel_text:\nConsignee: Acme"));
    }

    #[tokio::test]
    async fn test_empty_corpus_skips_model() {
        let service = FixedReply::new("unused");
        let extractor = EntityExtractor::new(service.clone());
        let outcome = extractor.extract(&DocumentCorpus::new()).await.unwrap();

        assert_eq!(outcome, EntityOutcome::default());
        assert!(service.prompts.lock().unwrap().is_empty());
    }
}
