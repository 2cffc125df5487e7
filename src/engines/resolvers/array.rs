use super::character::CharResolver;
use super::numeric::NumericResolver;
use super::traits::{ensure_len, unsupported, Resolver};
use crate::engines::generation::gene_consumer::{GeneConsumer, SlotWriter};
use crate::error::{CodecError, Result};
use crate::types::{Kind, Range, Value};
use std::sync::Arc;

/// Variable-length homogeneous sequence.
///
/// Layout: `min_len` mandatory elements back to back, then `max_len - min_len`
/// optional groups of one toggle slot followed by one element. A toggle
/// `>= 0` marks its element present.
#[derive(Debug, Clone)]
pub struct ArrayResolver {
    element: Arc<dyn Resolver>,
    min_len: usize,
    max_len: usize,
    toggle: NumericResolver,
    len: usize,
}

impl ArrayResolver {
    pub fn new(element: Arc<dyn Resolver>, min_len: usize, max_len: usize) -> Result<Self> {
        if max_len < min_len {
            return Err(CodecError::Schema(format!(
                "Array maximum length {} is below its minimum length {}",
                max_len, min_len
            )));
        }
        let width = element.len();
        let len = min_len * width + (max_len - min_len) * (width + 1);
        Ok(Self {
            element,
            min_len,
            max_len,
            toggle: NumericResolver::with_range(-1.0, 1.0),
            len,
        })
    }

    pub fn element(&self) -> &Arc<dyn Resolver> {
        &self.element
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn resolve_elements(&self, element_kind: &Kind, gene: &[f64]) -> Result<Vec<Value>> {
        ensure_len(self.len, gene.len())?;
        let width = self.element.len();
        let mut consumer = GeneConsumer::new(gene);
        let mut items = Vec::with_capacity(self.max_len);

        for _ in 0..self.min_len {
            items.push(self.element.resolve(element_kind, consumer.take(width))?);
        }
        for _ in self.min_len..self.max_len {
            let toggle = consumer.take(1);
            let slots = consumer.take(width);
            if self.toggle.resolve(&Kind::Bool, toggle)? == Value::Bool(true) {
                items.push(self.element.resolve(element_kind, slots)?);
            }
        }
        Ok(items)
    }

    fn encode_elements(&self, items: &[Value], gene: &mut [f64]) -> Result<()> {
        ensure_len(self.len, gene.len())?;
        if items.len() < self.min_len {
            return Err(CodecError::Encode(format!(
                "Sequence of {} elements is shorter than the minimum length {}",
                items.len(),
                self.min_len
            )));
        }
        if items.len() > self.max_len {
            log::warn!(
                "Dropping {} elements beyond the maximum length {}",
                items.len() - self.max_len,
                self.max_len
            );
        }

        let width = self.element.len();
        let mut writer = SlotWriter::new(&mut gene[..self.len]);
        let mut realized = items.iter();

        for item in realized.by_ref().take(self.min_len) {
            self.element.encode(item, writer.take(width))?;
        }
        for _ in self.min_len..self.max_len {
            let toggle = writer.take(1);
            let slots = writer.take(width);
            match realized.next() {
                Some(item) => {
                    self.toggle.encode(&Value::Bool(true), toggle)?;
                    self.element.encode(item, slots)?;
                }
                None => self.toggle.encode(&Value::Bool(false), toggle)?,
            }
        }
        Ok(())
    }
}

impl Resolver for ArrayResolver {
    fn len(&self) -> usize {
        self.len
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        match target {
            Kind::List(element_kind) => Ok(Value::List(self.resolve_elements(element_kind, gene)?)),
            other => Err(unsupported(other, "ArrayResolver")),
        }
    }

    fn domain(&self, ranges: &mut [Range]) {
        let width = self.element.len();
        let mut writer = SlotWriter::new(&mut ranges[..self.len]);
        for _ in 0..self.min_len {
            self.element.domain(writer.take(width));
        }
        for _ in self.min_len..self.max_len {
            self.toggle.domain(writer.take(1));
            self.element.domain(writer.take(width));
        }
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        match representative {
            Value::List(items) => self.encode_elements(items, gene),
            other => Err(CodecError::Encode(format!(
                "ArrayResolver cannot encode {}",
                other.describe()
            ))),
        }
    }
}

/// Array of characters decoded into text.
#[derive(Debug, Clone)]
pub struct StringResolver {
    inner: ArrayResolver,
}

impl StringResolver {
    pub fn new(charset: Vec<char>, min_len: usize, max_len: usize) -> Result<Self> {
        let element: Arc<dyn Resolver> = Arc::new(CharResolver::new(charset));
        Ok(Self {
            inner: ArrayResolver::new(element, min_len, max_len)?,
        })
    }

    pub fn min_len(&self) -> usize {
        self.inner.min_len
    }

    pub fn max_len(&self) -> usize {
        self.inner.max_len
    }
}

impl Resolver for StringResolver {
    fn len(&self) -> usize {
        self.inner.len
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        if *target != Kind::Str {
            return Err(unsupported(target, "StringResolver"));
        }
        self.inner
            .resolve_elements(&Kind::Char, gene)?
            .into_iter()
            .map(|item| match item {
                Value::Char(c) => Ok(c),
                other => Err(CodecError::Decode(format!(
                    "Expected a character, got {}",
                    other.describe()
                ))),
            })
            .collect::<Result<String>>()
            .map(Value::Str)
    }

    fn domain(&self, ranges: &mut [Range]) {
        self.inner.domain(ranges);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        match representative {
            Value::Str(text) => {
                let items: Vec<Value> = text.chars().map(Value::Char).collect();
                self.inner.encode_elements(&items, gene)
            }
            other => Err(CodecError::Encode(format!(
                "StringResolver cannot encode {}",
                other.describe()
            ))),
        }
    }
}
