mod errors;
pub mod pathmap;
pub mod urls;

pub use errors::Error;
