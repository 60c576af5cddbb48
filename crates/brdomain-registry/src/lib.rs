pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::RegistryClient;
pub use error::RegistryError;
pub use extract::{extract_company, extract_ownership};
