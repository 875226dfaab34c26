pub mod charset;
pub mod config;
pub mod entropy;
pub mod error;
pub mod generator;

pub use charset::{CharClass, Composition};
pub use config::Config;
pub use entropy::{random_index, EntropySource, KeystreamEntropy, OsEntropy};
pub use error::{Error, Result};
pub use generator::{generate, generate_with, random_characters, shuffle};
