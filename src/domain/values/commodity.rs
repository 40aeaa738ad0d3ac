use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a price series, e.g. "Wheat" or the general index "GOI".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commodity(String);

impl Commodity {
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err("Commodity name must not be empty".into());
        }
        if trimmed.contains(',') {
            return Err(format!("Commodity name must not contain ',': {trimmed}"));
        }
        Ok(Commodity(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The six price series tracked by the daily run, in processing order.
    pub fn defaults() -> Vec<Commodity> {
        ["GOI", "Wheat", "Maize", "Barley", "Soyabean", "Rice"]
            .into_iter()
            .map(|name| Commodity(name.to_string()))
            .collect()
    }

    /// Parse a comma separated list, preserving order.
    pub fn parse_list(s: &str) -> Result<Vec<Commodity>, String> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Commodity::new)
            .collect()
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Commodity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Commodity::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order() {
        let names: Vec<String> = Commodity::defaults().iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["GOI", "Wheat", "Maize", "Barley", "Soyabean", "Rice"]);
    }

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        let list = Commodity::parse_list(" Wheat, Maize,,Rice ").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].as_str(), "Wheat");
        assert_eq!(list[2].as_str(), "Rice");
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(Commodity::new("   ").is_err());
    }
}
