use phenocodec::engines::generation::{decode_batch, sample_population};
use phenocodec::{PhenotypeMapper, ResolverDeriver, SchemaRegistry, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn registry() -> SchemaRegistry {
    SchemaRegistry::load("tests/data/zoo.toml").expect("zoo schema loads")
}

fn mapper(name: &str) -> PhenotypeMapper {
    let registry = registry();
    let def = registry.require(name).unwrap();
    PhenotypeMapper::for_type(&ResolverDeriver::default(), &def, &[]).unwrap()
}

#[test]
fn test_decode_encode_decode_is_stable() {
    let mapper = mapper("Zoo");
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let gene = mapper.sample(&mut rng);
        let phenotype = mapper.decode(&gene).unwrap();
        let encoded = mapper.encode(&phenotype).unwrap();
        assert_eq!(encoded.len(), mapper.gene_len());
        assert_eq!(mapper.decode(&encoded).unwrap(), phenotype);
    }
}

#[test]
fn test_decoded_zoo_respects_metadata() {
    let mapper = mapper("Zoo");
    let genes = sample_population(&mapper, 100, Some(17));

    for decoded in decode_batch(&mapper, &genes) {
        let zoo = decoded.unwrap();
        let zoo = zoo.as_object().unwrap();

        let name = zoo.get("name").unwrap().as_str().unwrap();
        assert!((3..=8).contains(&name.chars().count()));
        assert!(name.chars().all(|c| c.is_ascii_uppercase()));

        match zoo.get("rating").unwrap() {
            Value::F32(r) => assert!((0.0..=5.0).contains(r)),
            other => panic!("rating decoded as {:?}", other),
        }
        // Not parameterized, so never touched by decoding
        assert_eq!(zoo.get("notes").unwrap(), &Value::Str(String::new()));

        let animals = zoo.get("animals").unwrap().as_list().unwrap();
        assert!((1..=4).contains(&animals.len()));
        for animal in animals {
            let animal = animal.as_object().unwrap();
            assert!(["Dog", "Cat", "Puppy"].contains(&animal.type_name()));
        }

        let keeper = zoo.get("keeper").unwrap().as_object().unwrap();
        match keeper.get("badge").unwrap() {
            Value::Char(c) => assert!(c.is_ascii_digit()),
            other => panic!("badge decoded as {:?}", other),
        }
        let shifts = keeper.get("shifts").unwrap().as_list().unwrap();
        assert!(shifts.len() <= 3);
        for shift in shifts {
            assert!(matches!(shift, Value::I16(d) if (1..=7).contains(d)));
        }
    }
}

#[test]
fn test_phenotype_serializes_with_type_tags() {
    let mapper = mapper("Keeper");
    let gene = vec![3.2, 12.0, 1.0, 2.0, -1.0, 5.0, 1.0, 9.0];
    assert_eq!(mapper.gene_len(), gene.len());

    let json = serde_json::to_value(mapper.decode(&gene).unwrap()).unwrap();
    assert_eq!(json["$type"], "Keeper");
    assert_eq!(json["badge"], "3");
    assert_eq!(json["years"], 12);
    assert_eq!(json["shifts"], serde_json::json!([2, 7]));
}
