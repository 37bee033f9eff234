//! Infrastructure wiring: database connection and state assembly.

pub mod db;
pub mod state;
