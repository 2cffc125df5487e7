/// Deterministically hands out consecutive slot regions of a gene
///
/// Composite resolvers walk their children with a consumer so that every child
/// sees the same region in `resolve`, `encode` and `domain`.
pub struct GeneConsumer<'a, T> {
    gene: &'a [T],
    position: usize,
}

impl<'a, T> GeneConsumer<'a, T> {
    pub fn new(gene: &'a [T]) -> Self {
        Self { gene, position: 0 }
    }

    /// Consume the next `n` slots.
    ///
    /// Panics if fewer than `n` slots remain; callers size the gene up front.
    pub fn take(&mut self, n: usize) -> &'a [T] {
        let slots = &self.gene[self.position..self.position + n];
        self.position += n;
        slots
    }

    /// Check if slots remaining
    pub fn has_slots(&self) -> bool {
        self.position < self.gene.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Mutable counterpart of [`GeneConsumer`], used when writing ranges or encodings.
pub struct SlotWriter<'a, T> {
    rest: &'a mut [T],
    position: usize,
}

impl<'a, T> SlotWriter<'a, T> {
    pub fn new(slots: &'a mut [T]) -> Self {
        Self {
            rest: slots,
            position: 0,
        }
    }

    /// Claim the next `n` slots. Panics if fewer than `n` remain.
    pub fn take(&mut self, n: usize) -> &'a mut [T] {
        let rest = std::mem::take(&mut self.rest);
        let (head, tail) = rest.split_at_mut(n);
        self.rest = tail;
        self.position += n;
        head
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
