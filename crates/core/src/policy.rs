//! Policy document kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of legal document a policy row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    TermsOfService,
    PrivacyPolicy,
}

impl PolicyType {
    pub const ALL: [PolicyType; 2] = [PolicyType::TermsOfService, PolicyType::PrivacyPolicy];

    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyType::TermsOfService => "TermsOfService",
            PolicyType::PrivacyPolicy => "PrivacyPolicy",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Invalid policy type '{s}'. Must be one of: TermsOfService, PrivacyPolicy"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(
            "PrivacyPolicy".parse::<PolicyType>().unwrap(),
            PolicyType::PrivacyPolicy
        );
        assert_eq!(
            "TermsOfService".parse::<PolicyType>().unwrap(),
            PolicyType::TermsOfService
        );
    }

    #[test]
    fn rejects_unknown_type() {
        assert!("Cookies".parse::<PolicyType>().is_err());
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&PolicyType::TermsOfService).unwrap();
        assert_eq!(json, "\"TermsOfService\"");
    }
}
