// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use gig_evm::BusinessData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Design,
    Development,
    Marketing,
    Writing,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Design,
        Category::Development,
        Category::Marketing,
        Category::Writing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Development => "development",
            Category::Marketing => "marketing",
            Category::Writing => "writing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category '{s}'"))
    }
}

/// Category selector of the list view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(*wanted),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    #[default]
    Open,
    Closed,
}

impl GigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GigStatus::Open => "open",
            GigStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for GigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GigStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(GigStatus::Open),
            "closed" => Ok(GigStatus::Closed),
            _ => Err(format!("Unknown status '{s}'")),
        }
    }
}

/// A gig as shown by the client
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GigRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Key used to fetch the encrypted budget handle from the contract
    pub encrypted_budget: String,
    pub public_value1: u64,
    pub public_value2: u64,
    pub creator: Address,
    /// Epoch seconds
    pub timestamp: u64,
    pub is_verified: bool,
    pub decrypted_value: u64,
    pub category: Option<Category>,
    pub status: GigStatus,
}

impl GigRecord {
    pub fn from_business_data(id: &str, data: BusinessData) -> Self {
        Self {
            id: id.to_string(),
            title: data.name,
            description: data.description,
            encrypted_budget: id.to_string(),
            public_value1: data.public_value1,
            public_value2: data.public_value2,
            creator: data.creator,
            timestamp: data.timestamp,
            is_verified: data.is_verified,
            decrypted_value: data.decrypted_value,
            category: data.category.and_then(|c| c.parse().ok()),
            status: data
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// The verified budget, if any
    pub fn budget(&self) -> Option<u64> {
        self.is_verified.then_some(self.decrypted_value)
    }

    pub fn budget_label(&self) -> String {
        match self.budget() {
            Some(value) => format!("${value}"),
            None => "Encrypted".to_string(),
        }
    }

    pub fn short_creator(&self) -> String {
        short_address(&self.creator)
    }
}

/// `0x1234...abcd`
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    View,
    Create,
    Decrypt,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryAction::View => f.write_str("VIEW"),
            HistoryAction::Create => f.write_str("CREATE"),
            HistoryAction::Decrypt => f.write_str("DECRYPT"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityHistoryEntry {
    pub action: HistoryAction,
    pub gig_id: String,
    /// Epoch milliseconds
    pub timestamp: u64,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Design".parse::<Category>(), Ok(Category::Design));
        assert_eq!(" writing ".parse::<Category>(), Ok(Category::Writing));
        assert!("cooking".parse::<Category>().is_err());
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "marketing".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Marketing))
        );
    }

    #[test]
    fn test_filter_matches_unknown_category_only_for_all() {
        assert!(CategoryFilter::All.matches(None));
        assert!(!CategoryFilter::Only(Category::Design).matches(None));
        assert!(CategoryFilter::Only(Category::Design).matches(Some(Category::Design)));
    }

    #[test]
    fn test_from_business_data() {
        let creator: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        let gig = GigRecord::from_business_data(
            "gig-1",
            BusinessData {
                name: "Logo design".to_string(),
                description: "Need a logo".to_string(),
                public_value1: 500,
                creator,
                timestamp: 1_700_000_000,
                category: Some("design".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(gig.encrypted_budget, "gig-1");
        assert_eq!(gig.category, Some(Category::Design));
        assert_eq!(gig.status, GigStatus::Open);
        assert_eq!(gig.budget(), None);
        assert_eq!(gig.budget_label(), "Encrypted");
        assert_eq!(gig.short_creator(), "0xf39F...2266");
    }

    #[test]
    fn test_verified_budget_label() {
        let gig = GigRecord {
            is_verified: true,
            decrypted_value: 750,
            ..GigRecord::from_business_data("gig-2", BusinessData::default())
        };
        assert_eq!(gig.budget(), Some(750));
        assert_eq!(gig.budget_label(), "$750");
    }
}
