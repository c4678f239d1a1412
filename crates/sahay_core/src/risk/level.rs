//! Ordered risk severity classification and the score threshold table.

/// Ordered severity classification for one assessed message.
///
/// The derived `Ord` is load-bearing: escalation compares levels with
/// `>=`, never category strings. Variant order must stay ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    /// No distress signal detected.
    None,
    /// Faint signal; a single low message never escalates on its own.
    Low,
    /// Actionable signal; resources are shown and an event is logged.
    Moderate,
    /// Strong signal.
    High,
    /// Acute signal.
    Severe,
}

impl RiskLevel {
    /// Stable string token for logs and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }
}

/// All levels in ascending order (for exhaustive iteration in tests).
pub const ALL_LEVELS: &[RiskLevel] = &[
    RiskLevel::None,
    RiskLevel::Low,
    RiskLevel::Moderate,
    RiskLevel::High,
    RiskLevel::Severe,
];

/// Score thresholds, ordered ascending by minimum score.
///
/// A score maps to the last entry whose minimum it reaches:
/// 0 -> none, 1-2 -> low, 3-5 -> moderate, 6-9 -> high, 10+ -> severe.
pub const LEVEL_THRESHOLDS: &[(u32, RiskLevel)] = &[
    (0, RiskLevel::None),
    (1, RiskLevel::Low),
    (3, RiskLevel::Moderate),
    (6, RiskLevel::High),
    (10, RiskLevel::Severe),
];

/// Map a numeric score onto the threshold table.
pub fn level_for_score(score: u32) -> RiskLevel {
    let mut level = RiskLevel::None;
    for &(min_score, candidate) in LEVEL_THRESHOLDS {
        if score >= min_score {
            level = candidate;
        } else {
            break;
        }
    }
    level
}
