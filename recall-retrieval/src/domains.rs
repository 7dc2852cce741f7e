//! Static semantic domain table.
//!
//! Maps domain concepts to root terms, subtype term groups, and a
//! specificity rank. Drives query expansion, domain-aware scoring bonuses,
//! and categorical noun canonicalization.

use recall_core::models::DomainMatch;

/// One knowledge-base entry. Root terms identify the domain broadly;
/// subtype terms are more specific and score higher.
pub struct SemanticDomain {
    pub name: &'static str,
    pub root_terms: &'static [&'static str],
    pub subtypes: &'static [(&'static str, &'static [&'static str])],
    /// Tie-break rank: a technical/esoteric domain outranks a generic one.
    pub specificity: u8,
}

/// Root term containment weight.
const ROOT_TERM_WEIGHT: u32 = 2;
/// Subtype term containment weight.
const SUBTYPE_TERM_WEIGHT: u32 = 3;

pub static DOMAINS: &[SemanticDomain] = &[
    SemanticDomain {
        name: "wellness",
        root_terms: &["wellness", "health", "wellbeing", "vitality", "lifestyle"],
        subtypes: &[
            ("physical", &["fitness", "exercise", "workout", "training", "sports", "movement"]),
            ("mental", &["mindfulness", "meditation", "therapy", "psychology", "emotional"]),
            ("medical", &["symptoms", "diagnosis", "treatment", "medicine", "conditions"]),
            ("nutrition", &["diet", "food", "recipes", "meal planning", "supplements"]),
        ],
        specificity: 2,
    },
    SemanticDomain {
        name: "relationships",
        root_terms: &["relationships", "social", "connections", "people", "community"],
        subtypes: &[
            ("intimate", &["partner", "dating", "marriage", "romance", "love"]),
            ("family", &["family", "parents", "children", "siblings", "relatives"]),
            ("social", &["friends", "networking", "social life", "community", "groups"]),
            ("professional", &["colleagues", "mentors", "contacts", "networking", "collaborators"]),
        ],
        specificity: 3,
    },
    SemanticDomain {
        name: "personal",
        root_terms: &["personal", "self", "individual", "private", "inner"],
        subtypes: &[
            ("journal", &["diary", "journal", "reflection", "thoughts", "feelings"]),
            ("growth", &["goals", "habits", "improvement", "development", "learning"]),
            ("identity", &["values", "beliefs", "personality", "self-image", "purpose"]),
            ("memories", &["past", "history", "experiences", "stories", "nostalgia"]),
        ],
        specificity: 2,
    },
    SemanticDomain {
        name: "career",
        root_terms: &["career", "professional", "work", "job", "occupation"],
        subtypes: &[
            ("development", &["skills", "training", "advancement", "promotion", "growth"]),
            ("workplace", &["office", "team", "culture", "environment", "remote"]),
            ("leadership", &["management", "leadership", "delegation", "strategy", "vision"]),
            ("transition", &["job search", "interview", "resume", "career change", "retirement"]),
        ],
        specificity: 5,
    },
    SemanticDomain {
        name: "business",
        root_terms: &["business", "enterprise", "company", "startup", "commercial"],
        subtypes: &[
            ("operations", &["processes", "workflow", "efficiency", "logistics", "supply chain"]),
            ("sales", &["sales", "leads", "conversion", "pipeline", "customers"]),
            ("marketing", &["marketing", "branding", "advertising", "content", "social media"]),
            ("strategy", &["planning", "analysis", "competition", "market", "growth"]),
        ],
        specificity: 6,
    },
    SemanticDomain {
        name: "finance",
        root_terms: &["finance", "money", "economic", "financial", "wealth"],
        subtypes: &[
            ("personal", &["budget", "savings", "expenses", "debt", "credit"]),
            ("investment", &["stocks", "bonds", "crypto", "portfolio", "returns"]),
            ("business", &["revenue", "profit", "cash flow", "accounting", "taxes"]),
            ("planning", &["retirement", "insurance", "estate", "goals", "security"]),
        ],
        specificity: 7,
    },
    SemanticDomain {
        name: "creative",
        root_terms: &["creative", "artistic", "art", "creativity", "expression"],
        subtypes: &[
            ("visual", &["drawing", "painting", "design", "photography", "sculpture"]),
            ("writing", &["stories", "poetry", "fiction", "journalism", "blogging"]),
            ("performing", &["music", "dance", "theater", "acting", "performance"]),
            ("crafts", &["handmade", "diy", "crafting", "making", "building"]),
        ],
        specificity: 6,
    },
    SemanticDomain {
        name: "media",
        root_terms: &["media", "entertainment", "content", "digital", "multimedia"],
        subtypes: &[
            ("consumption", &["movies", "shows", "books", "podcasts", "videos"]),
            ("creation", &["filming", "editing", "production", "streaming", "publishing"]),
            ("gaming", &["games", "gaming", "esports", "play", "virtual"]),
            ("social", &["platforms", "posts", "followers", "engagement", "viral"]),
        ],
        specificity: 3,
    },
    SemanticDomain {
        name: "academic",
        root_terms: &["academic", "scholarly", "research", "study", "education"],
        subtypes: &[
            ("sciences", &["physics", "chemistry", "biology", "mathematics", "research"]),
            ("humanities", &["history", "philosophy", "literature", "languages", "culture"]),
            ("social", &["sociology", "anthropology", "politics", "economics", "geography"]),
            ("applied", &["engineering", "medicine", "law", "architecture", "education"]),
        ],
        specificity: 8,
    },
    SemanticDomain {
        name: "technical",
        root_terms: &["technical", "technology", "digital", "computing", "systems"],
        subtypes: &[
            ("development", &["programming", "coding", "software", "apps", "debugging"]),
            ("infrastructure", &["networks", "servers", "cloud", "devops", "security"]),
            ("data", &["database", "analytics", "ai", "machine learning", "visualization"]),
            ("hardware", &["devices", "components", "iot", "robotics", "electronics"]),
        ],
        specificity: 8,
    },
    SemanticDomain {
        name: "domestic",
        root_terms: &["domestic", "home", "household", "living", "daily"],
        subtypes: &[
            ("home", &["decoration", "organization", "cleaning", "maintenance", "improvement"]),
            ("cooking", &["recipes", "baking", "kitchen", "ingredients", "techniques"]),
            ("garden", &["plants", "gardening", "landscaping", "outdoor", "growing"]),
            ("pets", &["animals", "pet care", "training", "veterinary", "adoption"]),
        ],
        specificity: 4,
    },
    SemanticDomain {
        name: "travel",
        root_terms: &["travel", "journey", "trip", "adventure", "exploration"],
        subtypes: &[
            ("planning", &["itinerary", "booking", "budget", "research", "preparation"]),
            ("destinations", &["places", "countries", "cities", "attractions", "local"]),
            ("experiences", &["culture", "food", "activities", "tours", "memories"]),
            ("logistics", &["transport", "accommodation", "documents", "packing", "safety"]),
        ],
        specificity: 5,
    },
    SemanticDomain {
        name: "spiritual",
        root_terms: &["spiritual", "religious", "faith", "sacred", "divine"],
        subtypes: &[
            ("practice", &["prayer", "worship", "ritual", "ceremony", "devotion"]),
            ("study", &["scripture", "theology", "doctrine", "teachings", "wisdom"]),
            ("mystical", &["meditation", "enlightenment", "consciousness", "transcendence", "awakening"]),
            ("community", &["congregation", "fellowship", "service", "mission", "charity"]),
        ],
        specificity: 7,
    },
    SemanticDomain {
        name: "esoteric",
        root_terms: &["esoteric", "occult", "mystical", "metaphysical", "arcane"],
        subtypes: &[
            ("divination", &["tarot", "astrology", "numerology", "oracle", "readings"]),
            ("magick", &["ritual", "spells", "energy", "manifestation", "alchemy"]),
            ("systems", &["kabbalah", "hermeticism", "gnosticism", "thelema", "chaos"]),
            ("phenomena", &["psychic", "paranormal", "supernatural", "ufo", "cryptids"]),
        ],
        specificity: 9,
    },
    SemanticDomain {
        name: "nature",
        root_terms: &["nature", "environment", "natural", "outdoor", "ecological"],
        subtypes: &[
            ("exploration", &["hiking", "camping", "wilderness", "adventure", "survival"]),
            ("conservation", &["ecology", "sustainability", "climate", "protection", "green"]),
            ("observation", &["wildlife", "birds", "plants", "weather", "seasons"]),
            ("activities", &["fishing", "hunting", "foraging", "bushcraft", "outdoor sports"]),
        ],
        specificity: 5,
    },
    SemanticDomain {
        name: "civic",
        root_terms: &["civic", "public", "community", "society", "collective"],
        subtypes: &[
            ("politics", &["government", "policy", "elections", "activism", "rights"]),
            ("service", &["volunteer", "charity", "nonprofit", "causes", "impact"]),
            ("local", &["neighborhood", "city", "council", "events", "issues"]),
            ("global", &["international", "humanitarian", "development", "peace", "justice"]),
        ],
        specificity: 4,
    },
];

/// Best-matching domain for free text, or `None` when no term matches.
///
/// Root-term containment scores [`ROOT_TERM_WEIGHT`]; each subtype term
/// scores [`SUBTYPE_TERM_WEIGHT`] and records the subtype name. Ties on
/// accumulated weight break toward the higher specificity rank.
pub fn detect(text: &str) -> Option<DomainMatch> {
    let lower = text.to_lowercase();

    let mut best: Option<DomainMatch> = None;
    for domain in DOMAINS {
        let mut confidence = 0u32;
        let mut subtypes: Vec<String> = Vec::new();

        for term in domain.root_terms {
            if lower.contains(term) {
                confidence += ROOT_TERM_WEIGHT;
            }
        }
        for (subtype, terms) in domain.subtypes {
            for term in *terms {
                if lower.contains(term) {
                    confidence += SUBTYPE_TERM_WEIGHT;
                    if !subtypes.iter().any(|s| s == subtype) {
                        subtypes.push((*subtype).to_string());
                    }
                }
            }
        }

        if confidence == 0 {
            continue;
        }

        let candidate = DomainMatch {
            domain: domain.name.to_string(),
            confidence,
            subtypes,
            specificity: domain.specificity,
        };
        let better = match &best {
            None => true,
            Some(current) => {
                candidate.confidence > current.confidence
                    || (candidate.confidence == current.confidence
                        && candidate.specificity > current.specificity)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    best
}

/// Legacy category aliases kept for ingestion compatibility.
pub fn legacy_category(category: &str) -> Option<&'static str> {
    match category {
        "workouts" | "training" | "exercises" | "lifts" => Some("physical"),
        "meals" | "food" | "foods" | "recipes" => Some("cooking"),
        "invoices" => Some("business"),
        "customers" | "clients" => Some("sales"),
        "contacts" => Some("professional"),
        _ => None,
    }
}

/// Term vocabulary of a subtype, by canonical subtype name.
/// Ambiguous names ("social" appears under two domains) resolve to the
/// first table entry; vocabularies overlap enough that it does not matter.
pub fn subtype_vocabulary(subtype: &str) -> Option<&'static [&'static str]> {
    for domain in DOMAINS {
        for (name, terms) in domain.subtypes {
            if *name == subtype {
                return Some(terms);
            }
        }
    }
    None
}

/// Fold common English plural endings: `ies`→`y`, `(consonant)es`→`e`,
/// trailing `s` dropped.
pub fn fold_plural(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("es") {
        // Only fold -es after a consonant ("recipes" → "recipe", but not "shoes").
        if let Some(last) = stem.chars().last() {
            if !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u') {
                return format!("{stem}e");
            }
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }
    word.to_string()
}

/// Normalize a captured category noun to its canonical form.
///
/// Strong semantic matches resolve to the most specific matched subtype;
/// otherwise plural folding applies, and the folded form is looked up in
/// the subtype term lists for a canonical subtype name.
pub fn normalize_category(category: &str) -> String {
    let lower = category.to_lowercase();

    if let Some(semantic) = detect(&lower) {
        if semantic.confidence >= 3 {
            return semantic.canonical_term().to_string();
        }
    }

    let folded = fold_plural(&lower);
    for domain in DOMAINS {
        for (subtype, terms) in domain.subtypes {
            if terms.contains(&folded.as_str()) {
                return (*subtype).to_string();
            }
        }
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cooking_queries_as_domestic() {
        let m = detect("what recipes do I have").unwrap();
        assert_eq!(m.domain, "domestic");
        assert!(m.subtypes.iter().any(|s| s == "cooking"));
    }

    #[test]
    fn specificity_breaks_ties_toward_esoteric() {
        // "meditation" appears in both wellness.mental and spiritual.mystical;
        // both accumulate one subtype hit, so specificity decides.
        let m = detect("meditation").unwrap();
        assert_eq!(m.domain, "spiritual");
    }

    #[test]
    fn unmatched_text_returns_none() {
        assert!(detect("zzz qqq xxyzzy").is_none());
    }

    #[test]
    fn plural_folding() {
        assert_eq!(fold_plural("categories"), "category");
        assert_eq!(fold_plural("recipes"), "recipe");
        assert_eq!(fold_plural("clients"), "client");
        assert_eq!(fold_plural("fish"), "fish");
    }

    #[test]
    fn normalize_resolves_canonical_subtype() {
        // "recipes" is a domestic.cooking subtype term.
        assert_eq!(normalize_category("recipes"), "cooking");
    }

    #[test]
    fn normalize_falls_back_to_plural_folding() {
        assert_eq!(normalize_category("widgets"), "widget");
    }

    #[test]
    fn legacy_map_covers_vault_staples() {
        assert_eq!(legacy_category("clients"), Some("sales"));
        assert_eq!(legacy_category("workouts"), Some("physical"));
        assert_eq!(legacy_category("unknown"), None);
    }
}
