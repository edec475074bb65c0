//! 业务能力层
//!
//! 每个服务只描述"我能做什么"，不关心流程顺序。

pub mod corpus_builder;
pub mod entity_extractor;
pub mod line_item_counter;
pub mod numeric_aggregator;
pub mod prompts;
pub mod reply_parser;
pub mod text_extraction;

pub use corpus_builder::CorpusBuilder;
pub use entity_extractor::EntityExtractor;
pub use line_item_counter::LineItemCounter;
pub use numeric_aggregator::NumericAggregator;
pub use text_extraction::TextExtractor;
