//! Error types produced by the configuration loader.

mod constructors;
mod conversions;
mod types;

pub use types::StrataError;

pub(crate) use constructors::classify_parse_error;

#[cfg(test)]
mod tests;
