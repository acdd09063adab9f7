//! # Sapling solver
//! The command line driver of the Sapling search engine, together with the models it can search
//! over. The search engine itself lives in [`core`].
pub mod models;

pub use sapling_core as core;
