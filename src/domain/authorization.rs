//! Camera authorization status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Camera-use permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationStatus {
    Granted,
    Denied,
    Restricted,
    #[default]
    NotDetermined,
}

impl AuthorizationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Restricted => "restricted",
            Self::NotDetermined => "not-determined",
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "granted" | "authorized" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "restricted" => Ok(Self::Restricted),
            "not-determined" | "not_determined" => Ok(Self::NotDetermined),
            _ => Err(format!("Invalid authorization status: \"{}\"", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_statuses() {
        assert_eq!("granted".parse(), Ok(AuthorizationStatus::Granted));
        assert_eq!("Denied".parse(), Ok(AuthorizationStatus::Denied));
        assert_eq!("restricted".parse(), Ok(AuthorizationStatus::Restricted));
        assert_eq!(
            "not_determined".parse(),
            Ok(AuthorizationStatus::NotDetermined)
        );
        assert!("maybe".parse::<AuthorizationStatus>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for status in [
            AuthorizationStatus::Granted,
            AuthorizationStatus::Denied,
            AuthorizationStatus::Restricted,
            AuthorizationStatus::NotDetermined,
        ] {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }
}
