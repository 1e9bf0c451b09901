//! Option letters for four-way multiple-choice questions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four option labels, `A` through `D`.
///
/// This is the only place an option index is mapped to a letter; prompts,
/// extractors and scoring all go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// All letters in label order.
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    /// Letter for a zero-based option index, `None` outside `0..=3`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based option index.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }

    /// Parse a token that is exactly one uppercase letter `A`-`D`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Letter::A),
            "B" => Some(Letter::B),
            "C" => Some(Letter::C),
            "D" => Some(Letter::D),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping_matches_label_order() {
        let labels = "ABCD";
        for (i, expected) in labels.chars().enumerate() {
            let letter = Letter::from_index(i).expect("index in range");
            assert_eq!(letter.as_char(), expected);
            assert_eq!(letter.index(), i);
        }
        assert_eq!(Letter::from_index(4), None);
    }

    #[test]
    fn test_from_token_is_exact() {
        assert_eq!(Letter::from_token("C"), Some(Letter::C));
        assert_eq!(Letter::from_token("c"), None);
        assert_eq!(Letter::from_token(" C"), None);
        assert_eq!(Letter::from_token("CD"), None);
        assert_eq!(Letter::from_token("E"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Letter::D.to_string(), "D");
    }
}
