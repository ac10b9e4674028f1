//! Address Normalization Check Common Library
//!
//! 住所正規化APIの検証で使う型と採点ロジック（IOなし）

pub mod types;
pub mod error;
pub mod sheet;
pub mod columns;
pub mod schema;
pub mod scorer;
pub mod summary;
pub mod export;

pub use types::{ApiOutcome, NormalizationRequest, NormalizationResponse, NormalizationMetadata, NormalizedAddress};
pub use error::{Error, Result};
pub use sheet::{Cell, RawSheet, Sheet};
pub use columns::{ColumnIndexes, Field};
pub use schema::SheetSchema;
pub use scorer::{Correctness, PairColor, ScoredRow, score_row, read_request};
pub use summary::RunSummary;
