use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档读取/解析错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 数值汇总错误（模型输出不可用）
    #[error("汇总错误: {0}")]
    Aggregate(#[from] AggregateError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 文档错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 版面切分失败
    #[error("文档切分失败 ({format}, 策略: {strategy}): {source}")]
    PartitionFailed {
        format: String,
        strategy: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 请求构建失败
    #[error("LLM 请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
}

/// 数值序列汇总错误
///
/// 一旦出现，整个请求失败，不返回部分序列
#[derive(Debug, Error)]
pub enum AggregateError {
    /// 序列中存在无法解析为数字的项
    #[error("{label}: 无法解析数值 '{token}' (原始回复: {reply})")]
    InvalidToken {
        label: String,
        token: String,
        reply: String,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必需配置
    #[error("缺少必需配置: {var_name}")]
    Missing { var_name: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON序列化失败: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Document(DocumentError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(LlmError::RequestBuildFailed(err.to_string()))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Document(DocumentError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            message: source.to_string(),
        })
    }

    /// 创建文档切分错误
    pub fn partition_failed(
        format: impl Into<String>,
        strategy: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AppError::Document(DocumentError::PartitionFailed {
            format: format.into(),
            strategy: strategy.into(),
            source: source.into(),
        })
    }

    /// 是否属于上游模型输出不可用（而非内部故障）
    pub fn is_upstream_output_fault(&self) -> bool {
        matches!(self, AppError::Aggregate(_))
    }

    /// 进程退出码：模型输出不可用为 2，其余为 1
    pub fn exit_code(&self) -> u8 {
        if self.is_upstream_output_fault() {
            2
        } else {
            1
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
