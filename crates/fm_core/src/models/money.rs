use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole currency units (euro).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "€{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(Money(0).to_string(), "€0");
        assert_eq!(Money(999).to_string(), "€999");
        assert_eq!(Money(1_000).to_string(), "€1,000");
        assert_eq!(Money(167_500_000).to_string(), "€167,500,000");
    }
}
