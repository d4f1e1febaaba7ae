use serde::{Deserialize, Serialize};

/// The strategy that decides which debt gets paid down first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PayoffMethod {
    /// Lowest balance first.
    Snowball,
    /// Highest interest rate first.
    #[default]
    Avalanche,
}

serde_plain::derive_display_from_serialize!(PayoffMethod);
serde_plain::derive_fromstr_from_deserialize!(PayoffMethod);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_avalanche() {
        assert_eq!(PayoffMethod::default(), PayoffMethod::Avalanche);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(PayoffMethod::Snowball.to_string(), "snowball");
        assert_eq!(
            PayoffMethod::from_str("avalanche").unwrap(),
            PayoffMethod::Avalanche
        );
        assert!(PayoffMethod::from_str("tsunami").is_err());
    }

    #[test]
    fn test_json_tag() {
        let json = serde_json::to_string(&PayoffMethod::Snowball).unwrap();
        assert_eq!(json, "\"snowball\"");
    }
}
