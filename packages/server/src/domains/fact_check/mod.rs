pub mod cache;
pub mod errors;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod prompt;
pub mod scoring;
pub mod service;

// Re-export commonly used types
pub use errors::AnalysisError;
pub use models::{AnalysisRequest, AnalysisResult, Claim, Source, Verdict};
pub use service::FactCheckService;
