//! Built-in word catalog: themed categories, startup endings and connectors

use crate::error::{DomainForgeError, Result};

/// Startup-style endings appended by the `word+ending` and `stem+ending` rules
pub const DEFAULT_ENDINGS: &[&str] = &["ly", "hub", "lab", "pro", "max", "ai", "io", "app", "sys", "net"];

/// Short joiners used by the `word+connector+word` rule
pub const CONNECTORS: &[&str] = &["and", "for", "the"];

/// Digits used by numeric integration (kept to one or two characters)
pub const NUMERIC_AFFIXES: &[&str] = &["1", "2", "3", "7", "24", "99"];

const DATA_WORDS: &[&str] = &[
    "data", "analytics", "insight", "metrics", "stats", "info", "intel", "facts",
    "records", "warehouse", "mart", "lake", "stream", "flow", "pipeline", "etl",
    "compute", "measure", "track", "monitor", "observe", "report", "dashboard",
    "visual", "chart", "graph", "trend", "pattern", "model", "neural", "deep",
    "smart", "cloud", "big", "fast", "instant", "quick", "rapid", "lean",
    "hub", "lab", "works", "studio", "forge", "craft", "engine", "core", "base",
];

const TECH_WORDS: &[&str] = &[
    "tech", "digital", "software", "code", "dev", "app", "web", "mobile", "cloud",
    "saas", "api", "system", "platform", "stack", "tool", "service", "startup",
    "venture", "product", "build", "create", "develop", "byte", "node", "pixel",
];

const BUSINESS_WORDS: &[&str] = &[
    "business", "company", "corp", "venture", "startup", "solutions", "services",
    "consult", "strategy", "growth", "success", "profit", "revenue", "sales",
    "market", "brand", "expert", "leader", "global", "premium", "prime", "elite",
];

const HEALTH_WORDS: &[&str] = &[
    "health", "medical", "wellness", "fitness", "care", "clinic", "doctor",
    "patient", "therapy", "medicine", "pharma", "biotech", "life", "living",
    "vital", "strong", "active", "energy", "pulse", "heal",
];

const FINANCE_WORDS: &[&str] = &[
    "finance", "money", "invest", "capital", "fund", "wealth", "profit", "bank",
    "credit", "loan", "payment", "pay", "crypto", "chain", "trading", "market",
    "stock", "asset", "coin", "ledger",
];

const EDUCATION_WORDS: &[&str] = &[
    "learn", "school", "course", "training", "teach", "student", "knowledge",
    "skill", "academy", "institute", "study", "research", "science", "scholar",
    "master", "mentor", "tutor", "class",
];

const CREATIVE_WORDS: &[&str] = &[
    "creative", "design", "art", "artist", "studio", "agency", "media", "content",
    "brand", "visual", "graphic", "pixel", "canvas", "story", "muse", "craft",
    "original", "vivid",
];

/// Themed word category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Data,
    Tech,
    Business,
    Health,
    Finance,
    Education,
    Creative,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Data,
        Category::Tech,
        Category::Business,
        Category::Health,
        Category::Finance,
        Category::Education,
        Category::Creative,
    ];

    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Category::Data => DATA_WORDS,
            Category::Tech => TECH_WORDS,
            Category::Business => BUSINESS_WORDS,
            Category::Health => HEALTH_WORDS,
            Category::Finance => FINANCE_WORDS,
            Category::Education => EDUCATION_WORDS,
            Category::Creative => CREATIVE_WORDS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Tech => "tech",
            Category::Business => "business",
            Category::Health => "health",
            Category::Finance => "finance",
            Category::Education => "education",
            Category::Creative => "creative",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                DomainForgeError::config(format!(
                    "unknown word category '{}' (available: {})",
                    s.trim(),
                    names.join(", ")
                ))
            })
    }
}
