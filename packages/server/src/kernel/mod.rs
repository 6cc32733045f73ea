//! Kernel module - server infrastructure and dependencies.

pub mod gemini;
pub mod test_dependencies;
pub mod traits;

pub use test_dependencies::MockGenerativeAI;
pub use traits::*;
