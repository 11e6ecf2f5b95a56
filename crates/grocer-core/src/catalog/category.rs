//! Category tags for catalog items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aisle a catalog item is shelved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fruits,
    Vegetables,
    Dairy,
    Bakery,
    Snacks,
    Beverages,
    Meat,
    Pantry,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Dairy,
        Category::Bakery,
        Category::Snacks,
        Category::Beverages,
        Category::Meat,
        Category::Pantry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Dairy => "dairy",
            Category::Bakery => "bakery",
            Category::Snacks => "snacks",
            Category::Beverages => "beverages",
            Category::Meat => "meat",
            Category::Pantry => "pantry",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Snacks => "Snacks",
            Category::Beverages => "Beverages",
            Category::Meat => "Meat",
            Category::Pantry => "Pantry",
        }
    }

    /// Parse a category tag, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Category::parse("Dairy"), Some(Category::Dairy));
        assert_eq!(Category::parse(" beverages "), Some(Category::Beverages));
        assert_eq!(Category::parse("toys"), None);
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&Category::Bakery).unwrap();
        assert_eq!(json, "\"bakery\"");
    }
}
