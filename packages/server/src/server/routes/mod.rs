// HTTP routes
pub mod analysis;
pub mod health;
pub mod metrics;

pub use analysis::*;
pub use health::*;
pub use metrics::*;
