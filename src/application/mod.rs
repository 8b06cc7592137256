//! Application Layer
//!
//! Use cases composed from the domain and infrastructure layers.

pub mod generate;

pub use generate::{build_template_data, generate, parse_since, GenerateOptions, GeneratedScript};
