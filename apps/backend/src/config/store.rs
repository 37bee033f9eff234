use crate::config::{must_var, opt_var};
use crate::error::AppError;

/// Backing store for game documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Database { url: String },
}

impl StoreKind {
    /// Reads `GAME_STORE` (`memory` or `database`, default `memory`).
    /// `database` requires `DATABASE_URL`.
    pub fn from_env() -> Result<Self, AppError> {
        let kind = opt_var("GAME_STORE").unwrap_or_else(|| "memory".to_string());
        match kind.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "database" | "db" => Ok(StoreKind::Database {
                url: must_var("DATABASE_URL")?,
            }),
            other => Err(AppError::config(format!(
                "GAME_STORE must be 'memory' or 'database', got '{other}'"
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Database { .. } => "database",
        }
    }
}

/// Reads `GAME_RNG_SEED`. Unset means entropy-seeded.
pub fn rng_seed_from_env() -> Result<Option<u64>, AppError> {
    opt_var("GAME_RNG_SEED")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| AppError::config(format!("GAME_RNG_SEED must be a u64, got '{raw}'")))
        })
        .transpose()
}
