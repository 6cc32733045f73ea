//! Raw claim records to validated [`Claim`]s.

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::models::{Claim, Source, Verdict};
use super::scoring::calculate_credibility_score;

/// Convert raw claim records into claims plus their credibility score.
///
/// Entries that are not JSON objects are dropped and excluded from scoring.
/// Positions are 1-based over the original sequence, so ids of surviving
/// claims keep the index they had in the model's answer.
pub fn normalize_claims(raw_claims: &[Value]) -> (Vec<Claim>, f64) {
    let mut claims = Vec::with_capacity(raw_claims.len());
    let mut retained: Vec<&Map<String, Value>> = Vec::with_capacity(raw_claims.len());

    for (idx, raw) in raw_claims.iter().enumerate() {
        let Some(record) = raw.as_object() else {
            debug!(position = idx + 1, "Dropping non-object claim entry");
            continue;
        };

        claims.push(Claim {
            id: claim_id(idx + 1),
            text: string_field(record, "text"),
            verdict: Verdict::from_label(record.get("verdict").and_then(Value::as_str)),
            explanation: string_field(record, "explanation"),
            sources: normalize_sources(record.get("sources")),
        });
        retained.push(record);
    }

    let score = calculate_credibility_score(&retained);
    (claims, score)
}

/// `c{position}-{8 hex chars}`; the random suffix keeps ids unique for identical claims.
fn claim_id(position: usize) -> String {
    format!("c{}-{}", position, id_suffix())
}

/// Fresh id for an already issued one, keeping its `c{position}` prefix.
pub fn reissue_claim_id(id: &str) -> String {
    let prefix = id.split_once('-').map(|(prefix, _)| prefix).unwrap_or(id);
    format!("{}-{}", prefix, id_suffix())
}

fn id_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    suffix
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Well-formed sources in order; anything else is skipped.
fn normalize_sources(raw: Option<&Value>) -> Vec<Source> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| match serde_json::from_value::<Source>(entry.clone()) {
            Ok(source) => Some(source),
            Err(e) => {
                debug!(error = %e, "Dropping malformed source");
                None
            }
        })
        .collect()
}
