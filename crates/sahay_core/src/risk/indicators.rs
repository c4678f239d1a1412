//! Declarative indicator scoring table.
//!
//! Each row maps one signal category to a weight and its phrase list.
//! New indicators are data changes here, not code changes: one generic
//! matching routine in `assessor` evaluates the whole table.
//!
//! Phrase conventions:
//! - Stored pre-normalized (lowercase, diacritic-folded, no apostrophes,
//!   single spaces) so matching is a plain substring search.
//! - Hinglish entries are matched verbatim; several are stem prefixes
//!   (`marna chahta`) so common transliteration suffix variants
//!   (`hoon`/`hu`) both match.
//! - A category contributes its weight at most once per message no matter
//!   how many of its phrases occur.

/// Signal category for a detected indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    SelfHarm,
    Hopelessness,
    Worthlessness,
    Isolation,
    AcuteDistress,
}

impl IndicatorCategory {
    /// Stable string token for logs and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorCategory::SelfHarm => "self-harm",
            IndicatorCategory::Hopelessness => "hopelessness",
            IndicatorCategory::Worthlessness => "worthlessness",
            IndicatorCategory::Isolation => "isolation",
            IndicatorCategory::AcuteDistress => "acute-distress",
        }
    }
}

/// All known categories (for exhaustive iteration in tests).
pub const CATEGORY_REGISTRY: &[IndicatorCategory] = &[
    IndicatorCategory::SelfHarm,
    IndicatorCategory::Hopelessness,
    IndicatorCategory::Worthlessness,
    IndicatorCategory::Isolation,
    IndicatorCategory::AcuteDistress,
];

/// Expected number of IndicatorCategory variants. Update when adding new
/// variants so the registry completeness check stays honest.
pub const EXPECTED_CATEGORY_COUNT: usize = 5;

/// One row of the scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorRule {
    pub category: IndicatorCategory,
    /// Contribution to the message score when any phrase matches.
    pub weight: u32,
    /// Pre-normalized phrases, checked by substring search.
    pub phrases: &'static [&'static str],
}

/// Revision tag of the built-in table, stamped into every logged event so
/// the audit record stays interpretable if weights change later.
pub const TABLE_REVISION: &str = "r1";

/// The built-in scoring table.
///
/// Weights are chosen against the fixed threshold table in `level`:
/// self-harm alone reaches `high`; self-harm plus hopelessness reaches
/// `severe`; a lone acute-distress phrase stays `low`.
pub const BUILTIN_INDICATOR_TABLE: &[IndicatorRule] = &[
    IndicatorRule {
        category: IndicatorCategory::SelfHarm,
        weight: 6,
        phrases: &[
            "kill myself",
            "end my life",
            "end it all",
            "want to die",
            "wanna die",
            "better off dead",
            "hurt myself",
            "cut myself",
            "suicide",
            // Passive ideation.
            "want to give up",
            "khudkushi",
            "marna chahta",
            "marna chahti",
            "jeena nahi",
        ],
    },
    IndicatorRule {
        category: IndicatorCategory::Hopelessness,
        weight: 4,
        phrases: &[
            "hopeless",
            "no way out",
            "give up",
            "no point anymore",
            "whats the point",
            "nothing will ever change",
            "no future",
            "koi umeed nahi",
            "sab khatam",
        ],
    },
    IndicatorRule {
        category: IndicatorCategory::Worthlessness,
        weight: 3,
        phrases: &[
            "worthless",
            "hate myself",
            "burden to everyone",
            "burden on everyone",
            "i am useless",
            "im useless",
            "good for nothing",
            "main bekar",
            "kisi kaam ka nahi",
        ],
    },
    IndicatorRule {
        category: IndicatorCategory::Isolation,
        weight: 2,
        phrases: &[
            "all alone",
            "nobody cares",
            "no one cares",
            "no one understands",
            "nobody understands",
            "no friends",
            "akela",
            "koi nahi samajhta",
        ],
    },
    IndicatorRule {
        category: IndicatorCategory::AcuteDistress,
        weight: 1,
        phrases: &[
            "cant cope",
            "cant breathe",
            "cant sleep",
            "cant take it",
            "overwhelmed",
            "breaking down",
            "panic attack",
            "bahut pareshan",
            "dar lag raha",
            "ghabrahat",
        ],
    },
];
