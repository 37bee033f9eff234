//! Wire types for the HTTP API.

pub mod games;

pub use games::Envelope;
