pub mod error;
pub mod config;
pub mod naming;
pub mod segment;
pub mod aperture;
pub mod polygon;
pub mod extractors;
pub mod aggregate;
pub mod session;
pub mod outputs;
