use thiserror::Error;

/// Fatal planning failures.
///
/// Only boundary problems are errors: an endpoint that cannot be matched, a
/// malformed style, or a request that makes no sense. Everything that merely
/// degrades a plan (too few candidates, an unsplittable day) is reported as a
/// [`PlanWarning`](crate::models::PlanWarning) on an otherwise usable plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Unresolvable {role} endpoint: '{reference}' not found in catalog")]
    UnresolvableEndpoint { role: String, reference: String },

    #[error("Invalid style config: {0}")]
    InvalidStyleConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid waypoint: {0}")]
    InvalidWaypoint(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

impl PlannerError {
    pub fn unresolvable(role: &str, reference: impl Into<String>) -> Self {
        PlannerError::UnresolvableEndpoint {
            role: role.to_string(),
            reference: reference.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_message_names_role_and_reference() {
        let err = PlannerError::unresolvable("start", "Chicagoo");
        assert_eq!(
            err.to_string(),
            "Unresolvable start endpoint: 'Chicagoo' not found in catalog"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: PlannerError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PlannerError::Serialization(_)));
    }
}
