use serde::Serialize;

/// Result of a stage that can fall back instead of failing.
///
/// `Degraded` still carries a usable value; `reason` says what went wrong on the
/// preferred path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { value: T },
    Degraded { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success { value }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Success { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    #[cfg(test)]
    pub fn into_value(self) -> T {
        match self {
            Outcome::Success { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Splits into the value and the degradation reason, if any.
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Outcome::Success { value } => (value, None),
            Outcome::Degraded { value, reason } => (value, Some(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_reason() {
        let outcome = Outcome::success(3);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
        assert_eq!(*outcome.value(), 3);
    }

    #[test]
    fn test_degraded_keeps_value_and_reason() {
        let outcome = Outcome::degraded("basic", "profile API returned nothing");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), Some("profile API returned nothing"));
        let (value, reason) = outcome.into_parts();
        assert_eq!(value, "basic");
        assert_eq!(reason.as_deref(), Some("profile API returned nothing"));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::degraded(1, "x")).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["reason"], "x");
    }
}
