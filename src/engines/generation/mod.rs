pub mod batch;
pub mod gene_consumer;
pub mod genome;
pub mod mapper;
pub mod operators;

pub use batch::{decode_batch, next_generation, sample_population, seeded_rng};
pub use gene_consumer::{GeneConsumer, SlotWriter};
pub use genome::Gene;
pub use mapper::PhenotypeMapper;
