//! Conversions from transport and library errors into `SpApiError`

pub mod conversions;

pub use conversions::InfraError;
