//! Shared fixtures for fact-check integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use fact_check_core::common::ServiceMetrics;
use fact_check_core::domains::fact_check::cache::ResultCache;
use fact_check_core::domains::fact_check::FactCheckService;
use fact_check_core::kernel::MockGenerativeAI;

/// Model answer with three claims, fenced the way Gemini often returns it.
pub const THREE_CLAIMS_RESPONSE: &str = r#"```json
{
    "summaryVerdict": "Mixed credibility: some claims verified, others lack evidence.",
    "claims": [
        {
            "text": "Global temperatures have risen by 1.1°C since pre-industrial times.",
            "verdict": "TRUE",
            "explanation": "Consistent with NASA, NOAA and the IPCC Sixth Assessment Report.",
            "sources": [
                {"domain": "nasa.gov", "title": "Global Temperature | NASA", "url": "https://climate.nasa.gov/vital-signs/global-temperature/"},
                {"domain": "ipcc.ch", "title": "AR6 Climate Change 2021", "url": "https://www.ipcc.ch/report/ar6/wg1/"}
            ]
        },
        {
            "text": "Electric vehicles produce zero emissions throughout their lifecycle.",
            "verdict": "FALSE",
            "explanation": "Battery manufacturing and grid electricity produce emissions.",
            "sources": [
                {"domain": "epa.gov", "title": "Greenhouse Gas Emissions from EVs", "url": "https://www.epa.gov/greenvehicles"}
            ]
        },
        {
            "text": "AI models can now pass the Turing test consistently.",
            "verdict": "UNSURE",
            "explanation": "Some systems pass limited versions; there is no consensus.",
            "sources": []
        }
    ]
}
```"#;

pub const SEARCH_QUERIES: &[&str] = &["global temperature rise since preindustrial", "ev lifecycle emissions"];

/// Service around `mock` with caching off.
pub fn service_with(mock: &MockGenerativeAI) -> (FactCheckService, Arc<ServiceMetrics>) {
    let metrics = Arc::new(ServiceMetrics::new());
    let service = FactCheckService::new(Arc::new(mock.clone()), metrics.clone());
    (service, metrics)
}

/// Service around `mock` with a result cache.
pub fn cached_service_with(mock: &MockGenerativeAI) -> (FactCheckService, Arc<ServiceMetrics>) {
    let (service, metrics) = service_with(mock);
    (
        service.with_cache(ResultCache::new(Duration::from_secs(60), 16)),
        metrics,
    )
}
