//! # Shipdoc Extract
//!
//! 从提单（PDF）和发票（Excel）中抽取结构化字段和数值汇总
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 文档切分能力（OCR / 版面解析 / 表格读取）
//! - `clients/` - 文本补全服务（OpenAI 兼容接口）
//!
//! ### ② 业务能力层（Services）
//! - `TextExtractor` - 文档压平成文本，PDF 带策略回退
//! - `CorpusBuilder` - 按后缀分派并组装语料
//! - `EntityExtractor` - 五个提单字段
//! - `NumericAggregator` - 数值序列及平均值
//! - `LineItemCounter` - 行项目数
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 单次请求流水线
//! - `orchestrator/app` - 命令行应用生命周期
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{Completion, CompletionService, LlmClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{LocalPartitioner, Partitioner};
pub use models::{Document, DocumentCorpus, EntityOutcome, ExtractionResponse, NumericSeries};
pub use orchestrator::{App, DocumentPipeline};
