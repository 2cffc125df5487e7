use phenocodec::engines::generation::operators::sample_gene;
use phenocodec::engines::resolvers::{
    ArrayResolver, CharResolver, CompositeResolver, ExtensionResolver, FieldBinding,
    NumericResolver, PolymorphicResolver, StringResolver,
};
use phenocodec::schema::{Charset, MemberSpec};
use phenocodec::{Kind, Range, Resolver, ResolverDeriver, SchemaRegistry, TypeDef};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const FILLER: f64 = 12345.0;

/// Runs `resolver` over buffers longer than `len()` and checks that only the
/// leading `len()` entries are read or written.
fn assert_owns_exactly_len(label: &str, resolver: &dyn Resolver, target: &Kind) {
    let len = resolver.len();
    let mut rng = StdRng::seed_from_u64(len as u64 + 1);

    let unset = Range::new(f64::NAN, f64::NAN);
    let mut ranges = vec![unset; len + 3];
    resolver.domain(&mut ranges);
    for (i, range) in ranges[..len].iter().enumerate() {
        assert!(
            !range.min.is_nan() && !range.max.is_nan(),
            "{}: slot {} of {} left unwritten",
            label,
            i,
            len
        );
    }
    for range in &ranges[len..] {
        assert!(range.min.is_nan() && range.max.is_nan(), "{}: wrote past len", label);
    }

    for _ in 0..10 {
        let gene = sample_gene(&ranges[..len], &mut rng);
        let value = resolver.resolve(target, &gene).unwrap();

        let mut padded = gene.clone();
        padded.extend([FILLER, -FILLER]);
        assert_eq!(resolver.resolve(target, &padded).unwrap(), value, "{}", label);

        let mut encoded = vec![FILLER; len + 2];
        resolver.encode(&value, &mut encoded).unwrap();
        assert_eq!(&encoded[len..], &[FILLER, FILLER], "{}: encoded past len", label);
        assert_eq!(resolver.resolve(target, &encoded).unwrap(), value, "{}", label);
    }
}

fn creature() -> (Arc<TypeDef>, Arc<TypeDef>, Arc<TypeDef>) {
    let creature = TypeDef::builder("Creature")
        .abstract_type()
        .member(MemberSpec::new("legs", Kind::U8))
        .build()
        .unwrap();
    let bird = TypeDef::builder("Bird")
        .extends(&creature)
        .member(MemberSpec::new("wingspan", Kind::F32))
        .member(MemberSpec::new("song", Kind::Str))
        .build()
        .unwrap();
    let fish = TypeDef::builder("Fish")
        .extends(&creature)
        .member(MemberSpec::new("fins", Kind::list(Kind::I16)))
        .build()
        .unwrap();
    (creature, bird, fish)
}

#[test]
fn test_scalar_resolvers_stay_in_their_slot() {
    assert_owns_exactly_len("numeric", &NumericResolver::with_range(1.0, 10.0), &Kind::I32);
    assert_owns_exactly_len(
        "unbounded numeric",
        &NumericResolver::new().for_kind(&Kind::I16),
        &Kind::I16,
    );
    assert_owns_exactly_len("flag", &NumericResolver::with_range(-1.0, 1.0), &Kind::Bool);
    assert_owns_exactly_len(
        "char",
        &CharResolver::from_charset(Charset::AlphaNum),
        &Kind::Char,
    );
}

#[test]
fn test_sequence_resolvers_stay_in_their_region() {
    let element = Arc::new(NumericResolver::with_range(-5.0, 5.0));
    assert_owns_exactly_len(
        "array",
        &ArrayResolver::new(element, 2, 5).unwrap(),
        &Kind::list(Kind::I64),
    );
    assert_owns_exactly_len(
        "string",
        &StringResolver::new(Charset::AlphaLower.chars(), 0, 4).unwrap(),
        &Kind::Str,
    );
}

#[test]
fn test_object_resolvers_stay_in_their_region() {
    let (creature, bird, fish) = creature();
    let base: Arc<dyn Resolver> = Arc::new(
        CompositeResolver::for_type(
            &creature,
            vec![FieldBinding::field(
                "legs",
                Arc::new(NumericResolver::with_range(0.0, 8.0)),
            )],
        )
        .unwrap(),
    );
    let birds = ExtensionResolver::new(
        Arc::clone(&base),
        vec![
            FieldBinding::field("wingspan", Arc::new(NumericResolver::with_range(0.1, 3.0))),
            FieldBinding::field(
                "song",
                Arc::new(StringResolver::new(Charset::AlphaLower.chars(), 1, 3).unwrap()),
            ),
        ],
    );
    assert_owns_exactly_len("composite", base.as_ref(), &Kind::object(&bird));
    assert_owns_exactly_len("extension", &birds, &Kind::object(&bird));

    let fishes = ExtensionResolver::new(
        base,
        vec![FieldBinding::field(
            "fins",
            Arc::new(
                ArrayResolver::new(Arc::new(NumericResolver::with_range(1.0, 4.0)), 0, 2)
                    .unwrap(),
            ),
        )],
    );
    let mut either = PolymorphicResolver::new();
    either.add_alternative(&bird, Arc::new(birds)).unwrap();
    either.add_alternative(&fish, Arc::new(fishes)).unwrap();
    assert_owns_exactly_len("polymorphic", &either, &Kind::object(&creature));

    let derived = ResolverDeriver::default()
        .derive_polymorphic(&creature, &[bird, fish])
        .unwrap();
    assert_owns_exactly_len("derived polymorphic", derived.as_ref(), &Kind::object(&creature));
}

#[test]
fn test_zoo_trees_stay_in_their_region() {
    let registry = SchemaRegistry::load("tests/data/zoo.toml").unwrap();
    let deriver = ResolverDeriver::default();

    for name in ["Zoo", "Keeper", "Dog", "Cat", "Puppy"] {
        let def = registry.require(name).unwrap();
        let resolver = deriver.derive(&def).unwrap();
        assert_owns_exactly_len(name, resolver.as_ref(), &Kind::object(&def));
    }

    let animal = registry.require("Animal").unwrap();
    let resolver = deriver
        .derive_polymorphic(&animal, &registry.descendants(&animal))
        .unwrap();
    assert_owns_exactly_len("Animal", resolver.as_ref(), &Kind::object(&animal));
}
