//! Credibility score from a verdict distribution.

use serde_json::{Map, Value};

/// Score a sequence of verdict labels.
///
/// `((#TRUE + 0.5 * #UNSURE) / total) * 100`, rounded to one decimal place
/// (ties to even).
/// Labels that are absent or not an exact keyword count toward the total only.
/// An empty sequence scores `0.0`.
pub fn score_verdicts<'a, I>(verdicts: I) -> f64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let (mut total, mut true_count, mut unsure_count) = (0usize, 0usize, 0usize);
    for verdict in verdicts {
        total += 1;
        match verdict {
            Some("TRUE") => true_count += 1,
            Some("UNSURE") => unsure_count += 1,
            _ => {}
        }
    }

    if total == 0 {
        return 0.0;
    }

    let score = (true_count as f64 + unsure_count as f64 * 0.5) / total as f64 * 100.0;
    round_to_tenth(score)
}

/// Round a non-negative value to one decimal place, ties to even.
///
/// Decides on the exact decimal expansion of the double rather than on
/// `value * 10.0`, so `0.05` (stored slightly above the tie) rounds up.
fn round_to_tenth(value: f64) -> f64 {
    // 40 places is far past where any score in [0, 100] departs from a tie
    let repr = format!("{:.40}", value);
    let Some((whole, frac)) = repr.split_once('.') else {
        return value;
    };
    let Ok(whole) = whole.parse::<u64>() else {
        return value;
    };

    let mut digits = frac.bytes().map(|b| b - b'0');
    let tenth = digits.next().unwrap_or(0) as u64;
    let truncated = whole * 10 + tenth;

    let round_up = match digits.next().unwrap_or(0) {
        0..=4 => false,
        5 => digits.any(|d| d != 0) || truncated % 2 == 1,
        _ => true,
    };

    let tenths = if round_up { truncated + 1 } else { truncated };
    tenths as f64 / 10.0
}

/// Score raw claim records by their `verdict` field.
pub fn calculate_credibility_score(claims: &[&Map<String, Value>]) -> f64 {
    score_verdicts(
        claims
            .iter()
            .map(|claim| claim.get("verdict").and_then(Value::as_str)),
    )
}
