//! Company directory: display name to dual-class ticker pair

use serde::{Deserialize, Serialize};

use crate::common::errors::{ClientError, Result};
use crate::config::types::{CompanyEntry, DirectoryConfig};

/// Ordered pair of ticker symbols for one company
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerPair {
    /// Long candidate
    pub long: String,
    /// Short candidate
    pub short: String,
}

impl std::fmt::Display for TickerPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.long, self.short)
    }
}

/// Immutable, ordered mapping of company name to ticker pair
///
/// Enumeration order is the order entries were supplied in, which is also
/// the order suggestions are produced in. Entries with fewer than two
/// tickers are kept so that selecting them can be reported as a lookup
/// failure rather than an unknown company.
#[derive(Debug, Clone, Default)]
pub struct CompanyDirectory {
    entries: Vec<CompanyEntry>,
}

impl CompanyDirectory {
    /// Build a directory, dropping later duplicates of a name
    pub fn new(entries: impl IntoIterator<Item = CompanyEntry>) -> Self {
        let mut unique: Vec<CompanyEntry> = Vec::new();
        for entry in entries {
            if unique.iter().any(|e| e.name == entry.name) {
                tracing::warn!("Duplicate company '{}' ignored", entry.name);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(config.companies.iter().cloned())
    }

    /// Company names in enumeration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a company to its ticker pair
    ///
    /// Fails with `CompanyNotFound` for unknown names and `EmptyTickerPair`
    /// when the entry lacks a non-empty long and short ticker.
    pub fn lookup(&self, name: &str) -> Result<TickerPair> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ClientError::CompanyNotFound(name.to_string()))?;

        match entry.tickers.as_slice() {
            [long, short, ..] if !long.trim().is_empty() && !short.trim().is_empty() => {
                Ok(TickerPair {
                    long: long.clone(),
                    short: short.clone(),
                })
            }
            _ => Err(ClientError::EmptyTickerPair(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> CompanyDirectory {
        CompanyDirectory::new(vec![
            CompanyEntry::new("Alphabet", "GOOGL", "GOOG"),
            CompanyEntry {
                name: "Hollow Holdings".to_string(),
                tickers: vec![],
            },
            CompanyEntry::new("Alphabet", "XXX", "YYY"),
        ])
    }

    #[test]
    fn test_lookup() {
        let pair = directory().lookup("Alphabet").unwrap();
        assert_eq!(pair.long, "GOOGL");
        assert_eq!(pair.short, "GOOG");
        assert_eq!(pair.to_string(), "GOOGL/GOOG");
    }

    #[test]
    fn test_duplicates_keep_first() {
        let dir = directory();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.lookup("Alphabet").unwrap().long, "GOOGL");
    }

    #[test]
    fn test_lookup_failures() {
        let dir = directory();
        assert!(matches!(
            dir.lookup("Unknown Corp"),
            Err(ClientError::CompanyNotFound(_))
        ));
        assert!(matches!(
            dir.lookup("Hollow Holdings"),
            Err(ClientError::EmptyTickerPair(_))
        ));
        assert!(matches!(
            dir.lookup("alphabet"),
            Err(ClientError::CompanyNotFound(_))
        ));
    }

    #[test]
    fn test_default_directory_order() {
        let dir = CompanyDirectory::from_config(&DirectoryConfig::default());
        let names: Vec<&str> = dir.names().collect();
        assert_eq!(names.first(), Some(&"Alphabet"));
        assert_eq!(names.last(), Some(&"Moog"));
        assert!(!dir.is_empty());
    }
}
