use super::traits::{ensure_len, unsupported, Resolver};
use crate::error::{CodecError, Result};
use crate::schema::Charset;
use crate::types::{Kind, Range, Value};

/// Headroom above the last index so the final character is reachable by interpolation.
const INDEX_HEADROOM: f64 = 0.999_999;

/// Single-slot resolver picking a character out of a fixed, ordered set.
#[derive(Debug, Clone)]
pub struct CharResolver {
    charset: Vec<char>,
}

impl CharResolver {
    pub fn new(charset: Vec<char>) -> Self {
        Self { charset }
    }

    pub fn from_charset(charset: Charset) -> Self {
        Self::new(charset.chars())
    }

    pub fn charset(&self) -> &[char] {
        &self.charset
    }
}

impl Resolver for CharResolver {
    fn len(&self) -> usize {
        1
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        if *target != Kind::Char {
            return Err(unsupported(target, "CharResolver"));
        }
        ensure_len(1, gene.len())?;
        let count = self.charset.len();
        if count == 0 {
            return Err(CodecError::Decode("Character set is empty".to_string()));
        }
        let index = (Range::new(0.0, count as f64).clamp(gene[0]) as usize).min(count - 1);
        Ok(Value::Char(self.charset[index]))
    }

    fn domain(&self, ranges: &mut [Range]) {
        ranges[0] = Range::new(0.0, self.charset.len() as f64 + INDEX_HEADROOM);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        ensure_len(1, gene.len())?;
        let c = match representative {
            Value::Char(c) => *c,
            other => {
                return Err(CodecError::Encode(format!(
                    "CharResolver cannot encode {}",
                    other.describe()
                )))
            }
        };
        let index = self
            .charset
            .iter()
            .position(|x| *x == c)
            .ok_or_else(|| CodecError::Encode(format!("Character {:?} is not in the set", c)))?;
        gene[0] = index as f64;
        Ok(())
    }
}
