use crate::schema::{Instance, TypeDef};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Closed interval over the reals.
///
/// Bounds are not required to be ordered: clamping against a range whose
/// `min > max` clamps against the swapped bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Identity element for [`Range::combine`].
    pub const EMPTY: Range = Range {
        min: f64::MAX,
        max: f64::MIN,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, x: f64) -> f64 {
        let (lo, hi) = if self.min > self.max {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        x.max(lo).min(hi)
    }

    /// Linear interpolation between the bounds, `t` in `[0, 1]`.
    pub fn lerp(&self, t: f64) -> f64 {
        self.clamp(self.min + t * (self.max - self.min))
    }

    /// Smallest range covering both `self` and `other`.
    pub fn combine(&self, other: Range) -> Range {
        Range::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// Declared type of a phenotype member.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Char,
    Str,
    List(Box<Kind>),
    Object(Arc<TypeDef>),
}

impl Kind {
    pub fn list(element: Kind) -> Self {
        Kind::List(Box::new(element))
    }

    pub fn object(def: &Arc<TypeDef>) -> Self {
        Kind::Object(Arc::clone(def))
    }

    /// Representable range of a numeric kind, `None` for everything else.
    pub fn numeric_bounds(&self) -> Option<(f64, f64)> {
        let bounds = match self {
            Kind::I8 => (i8::MIN as f64, i8::MAX as f64),
            Kind::U8 => (u8::MIN as f64, u8::MAX as f64),
            Kind::I16 => (i16::MIN as f64, i16::MAX as f64),
            Kind::U16 => (u16::MIN as f64, u16::MAX as f64),
            Kind::I32 => (i32::MIN as f64, i32::MAX as f64),
            Kind::U32 => (u32::MIN as f64, u32::MAX as f64),
            Kind::I64 => (i64::MIN as f64, i64::MAX as f64),
            Kind::U64 => (u64::MIN as f64, u64::MAX as f64),
            Kind::F32 => (f32::MIN as f64, f32::MAX as f64),
            Kind::F64 => (f64::MIN, f64::MAX),
            _ => return None,
        };
        Some(bounds)
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_bounds().is_some()
    }

    /// Value a freshly instantiated member holds before any resolver sets it.
    pub fn default_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::I8 => Value::I8(0),
            Kind::U8 => Value::U8(0),
            Kind::I16 => Value::I16(0),
            Kind::U16 => Value::U16(0),
            Kind::I32 => Value::I32(0),
            Kind::U32 => Value::U32(0),
            Kind::I64 => Value::I64(0),
            Kind::U64 => Value::U64(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
            Kind::Char => Value::Char('\0'),
            Kind::Str => Value::Str(String::new()),
            Kind::List(_) => Value::List(Vec::new()),
            Kind::Object(_) => Value::Null,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::I8 => write!(f, "i8"),
            Kind::U8 => write!(f, "u8"),
            Kind::I16 => write!(f, "i16"),
            Kind::U16 => write!(f, "u16"),
            Kind::I32 => write!(f, "i32"),
            Kind::U32 => write!(f, "u32"),
            Kind::I64 => write!(f, "i64"),
            Kind::U64 => write!(f, "u64"),
            Kind::F32 => write!(f, "f32"),
            Kind::F64 => write!(f, "f64"),
            Kind::Char => write!(f, "char"),
            Kind::Str => write!(f, "string"),
            Kind::List(element) => write!(f, "{}[]", element),
            Kind::Object(def) => write!(f, "{}", def.name()),
        }
    }
}

/// Runtime phenotype value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unset object reference.
    Null,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    List(Vec<Value>),
    Object(Instance),
}

impl Value {
    /// Numeric view used when writing a scalar into a gene slot.
    ///
    /// Booleans map to `1.0` / `-1.0` so they decode back to the same flag.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { -1.0 }),
            Value::I8(v) => Some(*v as f64),
            Value::U8(v) => Some(*v as f64),
            Value::I16(v) => Some(*v as f64),
            Value::U16(v) => Some(*v as f64),
            Value::I32(v) => Some(*v as f64),
            Value::U32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::U64(v) => Some(*v as f64),
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(items) => format!("list of {}", items.len()),
            Value::Object(instance) => instance.type_name().to_string(),
            other => format!("{:?}", other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::List(items) => serializer.collect_seq(items),
            Value::Object(instance) => instance.serialize(serializer),
        }
    }
}
