use super::traits::{ensure_len, unsupported, Resolver};
use crate::error::{CodecError, Result};
use crate::types::{Kind, Range, Value};

/// Single-slot resolver for numbers and booleans.
///
/// The slot is clamped to `[min, max]` (unless `clamped` is off) and then to the
/// target kind's representable range before narrowing. Booleans ignore the
/// bounds entirely: a raw slot value `>= 0` is `true`.
#[derive(Debug, Clone)]
pub struct NumericResolver {
    pub min: f64,
    pub max: f64,
    pub clamped: bool,
    kind: Option<Kind>,
}

impl Default for NumericResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericResolver {
    /// Unbounded resolver.
    pub fn new() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            clamped: true,
            kind: None,
        }
    }

    pub fn with_range(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::new()
        }
    }

    pub fn unclamped(mut self) -> Self {
        self.clamped = false;
        self
    }

    /// Records the declared kind so infinite bounds report its limits in `domain`.
    pub fn for_kind(mut self, kind: &Kind) -> Self {
        if kind.is_numeric() {
            self.kind = Some(kind.clone());
        }
        self
    }

    fn narrow(target: &Kind, val: f64) -> Result<Value> {
        let fit = |lo: f64, hi: f64| val.max(lo).min(hi);
        let value = match target {
            Kind::I8 => Value::I8(fit(i8::MIN as f64, i8::MAX as f64) as i8),
            Kind::U8 => Value::U8(fit(u8::MIN as f64, u8::MAX as f64) as u8),
            Kind::I16 => Value::I16(fit(i16::MIN as f64, i16::MAX as f64) as i16),
            Kind::U16 => Value::U16(fit(u16::MIN as f64, u16::MAX as f64) as u16),
            Kind::I32 => Value::I32(fit(i32::MIN as f64, i32::MAX as f64) as i32),
            Kind::U32 => Value::U32(fit(u32::MIN as f64, u32::MAX as f64) as u32),
            Kind::I64 => Value::I64(fit(i64::MIN as f64, i64::MAX as f64) as i64),
            Kind::U64 => Value::U64(fit(u64::MIN as f64, u64::MAX as f64) as u64),
            Kind::F32 => Value::F32(fit(f32::MIN as f64, f32::MAX as f64) as f32),
            Kind::F64 => Value::F64(val),
            other => return Err(unsupported(other, "NumericResolver")),
        };
        Ok(value)
    }
}

impl Resolver for NumericResolver {
    fn len(&self) -> usize {
        1
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        ensure_len(1, gene.len())?;
        let raw = gene[0];
        if *target == Kind::Bool {
            return Ok(Value::Bool(raw >= 0.0));
        }
        let val = if self.clamped {
            Range::new(self.min, self.max).clamp(raw)
        } else {
            raw
        };
        Self::narrow(target, val)
    }

    fn domain(&self, ranges: &mut [Range]) {
        let (lo, hi) = self
            .kind
            .as_ref()
            .and_then(Kind::numeric_bounds)
            .unwrap_or((f64::MIN, f64::MAX));
        let min = if self.min == f64::NEG_INFINITY { lo } else { self.min };
        let max = if self.max == f64::INFINITY { hi } else { self.max };
        ranges[0] = Range::new(min, max);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        ensure_len(1, gene.len())?;
        gene[0] = representative.as_f64().ok_or_else(|| {
            CodecError::Encode(format!(
                "NumericResolver cannot encode {}",
                representative.describe()
            ))
        })?;
        Ok(())
    }
}
