//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行、输出）
//! - 持有 LLM 客户端和切分能力
//!
//! ### `pipeline` - 单次请求流水线
//! - 组装语料
//! - 调度实体抽取、两次数值汇总和行项目计数
//! - 拼装完整响应，不因部分失败而省略字段
//!
//! ## 层次关系
//!
//! ```text
//! app (处理命令行给出的文件)
//!     ↓
//! pipeline (处理一次请求的 Vec<Document>)
//!     ↓
//! services (能力层：抽取 / 汇总 / 计数)
//!     ↓
//! clients + infrastructure (补全服务 / 文档切分)
//! ```

pub mod app;
pub mod pipeline;

// 重新导出主要类型
pub use app::App;
pub use pipeline::DocumentPipeline;
