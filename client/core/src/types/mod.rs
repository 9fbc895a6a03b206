//! Data-transfer shapes mirrored from the backend

use std::fmt;

use serde::{Deserialize, Serialize};

mod campaign;
mod customer;
mod subscription;

pub use campaign::*;
pub use customer::*;
pub use subscription::*;

/// Opaque backend identifier, numeric or string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(u64),
    Str(String),
}

impl Id {
    pub fn is_blank(&self) -> bool {
        matches!(self, Id::Str(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{}", n),
            Id::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id::Num(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Str(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Str(value)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    /// Digits become [`Id::Num`], anything else [`Id::Str`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>().map(Id::Num).unwrap_or_else(|_| Id::Str(s.to_string())))
    }
}

/// Page/limit pair shared by list filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let ids: Vec<Id> = serde_json::from_str(r#"[12, "cmp_9f2"]"#).unwrap();
        assert_eq!(ids, vec![Id::Num(12), Id::Str("cmp_9f2".into())]);
        assert_eq!(ids[0].to_string(), "12");
        assert_eq!(ids[1].to_string(), "cmp_9f2");
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("17".parse::<Id>().unwrap(), Id::Num(17));
        assert_eq!("ab-17".parse::<Id>().unwrap(), Id::Str("ab-17".into()));
        assert!(Id::Str(" ".into()).is_blank());
        assert!(!Id::Num(0).is_blank());
    }
}
