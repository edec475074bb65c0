use std::sync::Arc;

use tracing::info;

use crate::clients::CompletionService;
use crate::error::AppResult;
use crate::models::{CorpusKey, DocumentCorpus};
use crate::services::prompts::line_item_count_prompt;

/// 行项目计数
///
/// 只返回去掉首尾空白的回复原文，不做数字校验。
pub struct LineItemCounter {
    service: Arc<dyn CompletionService>,
}

impl LineItemCounter {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    pub async fn count(&self, corpus: &DocumentCorpus) -> AppResult<String> {
        let Some(text) = corpus.non_blank(CorpusKey::ExcelText) else {
            info!("excel_text 不可用，跳过行项目计数");
            return Ok(String::new());
        };

        info!("🤖 统计行项目数...");
        let completion = self.service.generate(&line_item_count_prompt(text)).await?;
        Ok(completion.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Completion;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl CompletionService for FixedReply {
        async fn generate(&self, _prompt: &str) -> AppResult<Completion> {
            Ok(Completion::new(self.0))
        }
    }

    #[tokio::test]
    async fn test_reply_is_returned_verbatim_trimmed() {
        let mut corpus = DocumentCorpus::new();
        corpus.insert(CorpusKey::ExcelText, "row 1\nrow 2".to_string());

        let counter = LineItemCounter::new(Arc::new(FixedReply("  about 12 items\n")));
        assert_eq!(counter.count(&corpus).await.unwrap(), "about 12 items");
    }

    #[tokio::test]
    async fn test_missing_excel_text_is_empty() {
        let counter = LineItemCounter::new(Arc::new(FixedReply("3")));
        assert_eq!(counter.count(&DocumentCorpus::new()).await.unwrap(), "");
    }
}
