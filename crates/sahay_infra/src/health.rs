//! Minimal health probe for the safety core.
//!
//! Reports process liveness, the build identifier, and the scoring-table
//! revision, so operators can confirm which table a deployment runs.

use sahay_core::risk::TABLE_REVISION;

/// Health response for operational checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// True when the process is up and healthy.
    pub ok: bool,
    /// Git commit SHA or build identifier.
    pub build_id: String,
    /// Revision of the active scoring table.
    pub table_revision: String,
}

impl HealthResponse {
    /// Create a healthy response with the given build_id.
    pub fn healthy(build_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            build_id: build_id.into(),
            table_revision: TABLE_REVISION.to_string(),
        }
    }

    /// Create an unhealthy response with the given build_id.
    pub fn unhealthy(build_id: impl Into<String>) -> Self {
        Self {
            ok: false,
            build_id: build_id.into(),
            table_revision: TABLE_REVISION.to_string(),
        }
    }
}

/// Check system health and return a HealthResponse.
///
/// The core is pure and has no connections to probe; process up means
/// healthy.
pub fn check_health(build_id: &str) -> HealthResponse {
    HealthResponse::healthy(build_id)
}

/// Exit code for healthy system.
pub const EXIT_HEALTHY: i32 = 0;
/// Exit code for unhealthy system.
pub const EXIT_UNHEALTHY: i32 = 1;

/// Get the exit code for a health response.
pub fn exit_code(response: &HealthResponse) -> i32 {
    if response.ok { EXIT_HEALTHY } else { EXIT_UNHEALTHY }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_response_has_required_fields() {
        let resp = HealthResponse::healthy("abc123");
        assert!(resp.ok);
        assert_eq!(resp.build_id, "abc123");
        assert_eq!(resp.table_revision, TABLE_REVISION);
    }

    #[test]
    fn unhealthy_response_has_required_fields() {
        let resp = HealthResponse::unhealthy("abc123");
        assert!(!resp.ok);
        assert_eq!(resp.build_id, "abc123");
    }

    #[test]
    fn check_health_returns_healthy() {
        let resp = check_health("build_xyz");
        assert!(resp.ok);
        assert_eq!(resp.build_id, "build_xyz");
    }

    #[test]
    fn exit_codes_map_from_ok() {
        assert_eq!(exit_code(&HealthResponse::healthy("t")), EXIT_HEALTHY);
        assert_eq!(exit_code(&HealthResponse::unhealthy("t")), EXIT_UNHEALTHY);
    }
}
