use anyhow::{bail, Context};
use phenocodec::config::ConfigManager;
use phenocodec::engines::generation::{
    decode_batch, next_generation, sample_population, seeded_rng,
};
use phenocodec::{PhenotypeMapper, ResolverDeriver, SchemaRegistry, Value};
use serde::Serialize;
use std::path::Path;

const CONFIG_FILE: &str = "phenocodec.toml";
const OFFSPRING_FLAG: &str = "--offspring";

#[derive(Serialize)]
struct Sample<'a> {
    gene: &'a [f64],
    phenotype: Value,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().collect();
    let offspring = args.iter().any(|a| a == OFFSPRING_FLAG);
    args.retain(|a| a != OFFSPRING_FLAG);
    if args.len() < 3 {
        bail!(
            "usage: {} <schema.(toml|json)> <RootType> [count] [{}]",
            args[0],
            OFFSPRING_FLAG
        );
    }

    let manager = ConfigManager::new();
    let config_path = Path::new(CONFIG_FILE);
    manager.load_layered(config_path.exists().then_some(config_path))?;
    let config = manager.get()?;

    let registry = SchemaRegistry::load(&args[1])
        .with_context(|| format!("loading schema {}", args[1]))?;
    let root = registry.require(&args[2])?;
    let count = match args.get(3) {
        Some(raw) => raw.parse().with_context(|| format!("invalid count {}", raw))?,
        None => config.sampling.sample_count,
    };

    // Abstract roots choose among every registered concrete descendant
    let subtypes = if root.is_abstract() {
        registry.descendants(&root)
    } else {
        Vec::new()
    };
    let deriver = ResolverDeriver::new(config.derivation.clone());
    let mapper = PhenotypeMapper::for_type(&deriver, &root, &subtypes)?;
    log::info!(
        "Sampling {} phenotypes of {} over {} gene slots",
        count,
        root.name(),
        mapper.gene_len()
    );

    let mut genes = sample_population(&mapper, count, config.sampling.seed);
    if offspring {
        // Offspring draw from a stream distinct from the sampled parents
        let mut rng = seeded_rng(config.sampling.seed.map(|s| s.wrapping_add(1)));
        genes = next_generation(&mapper, &genes, config.sampling.mutation_rate, &mut rng);
        log::info!(
            "Printing offspring at mutation rate {}",
            config.sampling.mutation_rate
        );
    }
    for (gene, decoded) in genes.iter().zip(decode_batch(&mapper, &genes)) {
        let sample = Sample {
            gene,
            phenotype: decoded?,
        };
        println!("{}", serde_json::to_string(&sample)?);
    }
    Ok(())
}
