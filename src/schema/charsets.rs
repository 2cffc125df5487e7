use serde::{Deserialize, Serialize};

const NUMERIC: &str = "0123456789";
const ALPHA_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const ALPHA_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHA_ALL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHA_NUM: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Named character sets available to character and string members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    Numeric,
    AlphaLower,
    AlphaUpper,
    AlphaAll,
    #[default]
    AlphaNum,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Numeric => NUMERIC,
            Charset::AlphaLower => ALPHA_LOWER,
            Charset::AlphaUpper => ALPHA_UPPER,
            Charset::AlphaAll => ALPHA_ALL,
            Charset::AlphaNum => ALPHA_NUM,
        }
    }

    pub fn chars(&self) -> Vec<char> {
        self.as_str().chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_sizes() {
        assert_eq!(Charset::Numeric.chars().len(), 10);
        assert_eq!(Charset::AlphaLower.chars().len(), 26);
        assert_eq!(Charset::AlphaAll.chars().len(), 52);
        assert_eq!(Charset::default().chars().len(), 62);
    }

    #[test]
    fn test_charset_deserializes_snake_case() {
        let set: Charset = serde_json::from_str("\"alpha_lower\"").unwrap();
        assert_eq!(set, Charset::AlphaLower);
    }
}
