pub mod analysis;
pub mod claim;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use claim::{Claim, Source, Verdict};
