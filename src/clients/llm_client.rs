//! LLM 补全服务客户端
//!
//! 上层只依赖 [`CompletionService`] 这一文本进、文本出的签名，
//! 便于在测试中替换为确定性的替身。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（Gemini、Azure、Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 一次补全调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 文本补全服务
///
/// 没有超时和重试：服务被视为总会响应。
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<Completion>;
}

/// 基于 OpenAI 兼容接口的 LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn generate(&self, prompt: &str) -> AppResult<Completion> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        Ok(Completion::new(content))
    }
}
