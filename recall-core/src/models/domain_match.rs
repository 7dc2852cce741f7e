use serde::{Deserialize, Serialize};

/// Best-matching semantic domain for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMatch {
    /// Domain name, e.g. "domestic" or "technical".
    pub domain: String,
    /// Accumulated term-match weight. 2 units per root term, 3 per subtype
    /// term; higher means a stronger match.
    pub confidence: u32,
    /// Subtype names whose terms matched, in match order.
    pub subtypes: Vec<String>,
    /// Static specificity rank; breaks ties toward more specific domains.
    pub specificity: u8,
}

impl DomainMatch {
    /// Most specific matched subtype, else the domain itself.
    /// Used to canonicalize categorical query nouns.
    pub fn canonical_term(&self) -> &str {
        self.subtypes.first().map(String::as_str).unwrap_or(&self.domain)
    }
}
