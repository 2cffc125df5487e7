use crate::engines::assembly::ResolverDeriver;
use crate::engines::generation::{genome::Gene, operators};
use crate::engines::resolvers::Resolver;
use crate::error::{CodecError, Result};
use crate::schema::TypeDef;
use crate::types::{Kind, Range, Value};
use rand::Rng;
use std::sync::Arc;

/// Entry point pairing a resolver tree with the kind it decodes into.
#[derive(Debug, Clone)]
pub struct PhenotypeMapper {
    resolver: Arc<dyn Resolver>,
    target: Kind,
}

impl PhenotypeMapper {
    pub fn new(resolver: Arc<dyn Resolver>, target: Kind) -> Self {
        Self { resolver, target }
    }

    /// Derives the tree for `def`, choosing among `subtypes` when any are given.
    pub fn for_type(
        deriver: &ResolverDeriver,
        def: &Arc<TypeDef>,
        subtypes: &[Arc<TypeDef>],
    ) -> Result<Self> {
        let resolver = if subtypes.is_empty() {
            deriver.derive(def)?
        } else {
            deriver.derive_polymorphic(def, subtypes)?
        };
        log::debug!(
            "Mapper for {} uses {} gene slots",
            def.name(),
            resolver.len()
        );
        Ok(Self::new(resolver, Kind::object(def)))
    }

    pub fn gene_len(&self) -> usize {
        self.resolver.len()
    }

    pub fn domain(&self) -> Vec<Range> {
        self.resolver.domain_vec()
    }

    /// Main entry point: create the phenotype from a gene of exactly [`Self::gene_len`] slots
    pub fn decode(&self, gene: &[f64]) -> Result<Value> {
        if gene.len() != self.gene_len() {
            return Err(CodecError::GeneLength {
                expected: self.gene_len(),
                actual: gene.len(),
            });
        }
        self.resolver.resolve(&self.target, gene)
    }

    pub fn encode(&self, phenotype: &Value) -> Result<Gene> {
        self.resolver.encode_vec(phenotype)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Gene {
        operators::sample_gene(&self.domain(), rng)
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }

    pub fn target(&self) -> &Kind {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Instance, MemberSpec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn point() -> Arc<TypeDef> {
        TypeDef::builder("Point")
            .member(MemberSpec::new("x", Kind::I32).with_range(-3.0, 3.0))
            .member(MemberSpec::new("y", Kind::I32).with_range(-3.0, 3.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_decode_requires_exact_length() {
        let mapper = PhenotypeMapper::for_type(&ResolverDeriver::default(), &point(), &[]).unwrap();
        assert_eq!(mapper.gene_len(), 2);
        assert!(matches!(
            mapper.decode(&[0.0, 0.0, 0.0]),
            Err(CodecError::GeneLength { expected: 2, actual: 3 })
        ));
        assert!(mapper.decode(&[0.0]).is_err());
    }

    #[test]
    fn test_sampled_genes_decode() {
        let def = point();
        let mapper = PhenotypeMapper::for_type(&ResolverDeriver::default(), &def, &[]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let gene = mapper.sample(&mut rng);
            let value = mapper.decode(&gene).unwrap();
            let instance = value.as_object().unwrap();
            match instance.get("x").unwrap() {
                Value::I32(x) => assert!((-3..=3).contains(x)),
                other => panic!("unexpected {:?}", other),
            }
        }

        let instance = Instance::new(&def)
            .unwrap()
            .with("x", Value::I32(-2))
            .unwrap()
            .with("y", Value::I32(1))
            .unwrap();
        let gene = mapper.encode(&Value::Object(instance.clone())).unwrap();
        assert_eq!(gene, vec![-2.0, 1.0]);
        assert_eq!(mapper.decode(&gene).unwrap(), Value::Object(instance));
    }
}
