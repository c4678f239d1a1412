//! Message risk assessment: normalization, indicator matching, scoring.

pub mod assessor;
pub mod indicators;
pub mod level;
pub mod normalize;

pub use assessor::{Indicator, RiskAssessment, RiskAssessor, RiskAssessorMetrics};
pub use indicators::{
    BUILTIN_INDICATOR_TABLE, CATEGORY_REGISTRY, EXPECTED_CATEGORY_COUNT, IndicatorCategory,
    IndicatorRule, TABLE_REVISION,
};
pub use level::{ALL_LEVELS, LEVEL_THRESHOLDS, RiskLevel, level_for_score};
pub use normalize::normalize_message;
