pub mod candidates;
pub mod corpus;
pub mod graphemic;
pub mod lexicon;
pub mod metrics;
pub mod model;
pub mod ngram;
pub mod paradigm;
pub mod phonetic;
pub mod pipeline;
pub mod resources;
pub mod score;
pub mod settings;
pub(crate) mod testutil;
pub mod tokenize;
pub mod trace_init;
