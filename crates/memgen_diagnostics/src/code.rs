//! Stable diagnostic identifiers such as `W101`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family a code belongs to; decides its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E` codes: the instance cannot be generated.
    Error,
    /// `W` codes: the instance is generated in a degraded form.
    Warning,
}

impl Category {
    /// The prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category plus a number, printed as a letter and three digits.
///
/// Generators declare their codes as constants so tools can match on them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The code family.
    pub category: Category,
    /// The number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Builds a code; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_with_prefix_and_padding() {
        assert_eq!(DiagnosticCode::new(Category::Warning, 101).to_string(), "W101");
        assert_eq!(DiagnosticCode::new(Category::Error, 3).to_string(), "E003");
    }

    #[test]
    fn json_shape() {
        let code = DiagnosticCode::new(Category::Error, 102);
        let json = serde_json::to_value(code).unwrap();
        assert_eq!(json["category"], "Error");
        assert_eq!(json["number"], 102);
    }
}
