// AI-Powered Fact Checker - API Core
//
// Accepts text or images, asks Gemini (with Google Search grounding) to extract
// and verify factual claims, and returns a scored, structured result.
//
// Provider plumbing lives in the gemini-client package; the fact-check pipeline
// is in domains/fact_check.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
