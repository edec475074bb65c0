pub mod corpus;
pub mod document;
pub mod entity;
pub mod response;
pub mod series;

pub use corpus::{CorpusKey, DocumentCorpus, SkippedDocument};
pub use document::{Document, DocumentFormat};
pub use entity::{EntityOutcome, ShippingEntity, PARSE_FAILURE_MARKER};
pub use response::ExtractionResponse;
pub use series::NumericSeries;
