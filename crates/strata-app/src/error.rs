//! Startup errors for the driver.

use strata_config::ConfigError;
use strata_voxel::RegistryError;

/// Anything that stops the simulation from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A palette block is missing from the registry.
    #[error("cannot resolve block palette: {0}")]
    Registry(#[from] RegistryError),
}
