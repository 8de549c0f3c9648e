pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Document, SourceText};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
