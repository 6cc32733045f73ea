use serde::{Deserialize, Serialize};

/// Fact-check outcome for a single claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    True,
    False,
    #[default]
    Unsure,
}

impl Verdict {
    /// Parse a model-supplied label. Anything but an exact keyword is `Unsure`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("TRUE") => Verdict::True,
            Some("FALSE") => Verdict::False,
            _ => Verdict::Unsure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::Unsure => "UNSURE",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Citation backing a verdict.
///
/// Missing fields deserialize as empty strings; a field of the wrong type
/// fails the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Source {
    pub domain: String,
    pub title: String,
    pub url: String,
}

/// A single factual assertion with its verdict and evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique within one result, e.g. `c2-1f9a0b3c`
    pub id: String,
    pub text: String,
    pub verdict: Verdict,
    pub explanation: String,
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::from_label(Some("TRUE")), Verdict::True);
        assert_eq!(Verdict::from_label(Some("FALSE")), Verdict::False);
        assert_eq!(Verdict::from_label(Some("UNSURE")), Verdict::Unsure);
        assert_eq!(Verdict::from_label(Some("MOSTLY TRUE")), Verdict::Unsure);
        assert_eq!(Verdict::from_label(None), Verdict::Unsure);
    }

    #[test]
    fn test_verdict_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Verdict::False).unwrap(), json!("FALSE"));
        assert_eq!(Verdict::Unsure.to_string(), "UNSURE");
    }

    #[test]
    fn test_source_defaults_missing_fields() {
        let source: Source = serde_json::from_value(json!({"url": "https://nasa.gov"})).unwrap();
        assert_eq!(source.url, "https://nasa.gov");
        assert_eq!(source.domain, "");
        assert!(serde_json::from_value::<Source>(json!({"url": 42})).is_err());
    }
}
