//! 基础设施层
//!
//! 持有重量级的外部能力（OCR / 版面解析），只暴露能力，不认识业务字段。

pub mod partition;

pub use partition::{Element, ElementCategory, LocalPartitioner, PartitionStrategy, Partitioner};
