//! Biome classification and incremental terrain rewriting around an observer.
//!
//! A [`BiomeShifter`] runs once per scheduler firing: it pushes every tracked
//! column one block deeper, repainting it with its biome's palette, then picks
//! a new surface point near the observer to start tracking.

mod biome;
mod climate;
mod error;
mod heightmap;
mod shifter;
mod surface;
mod system;
mod world;

pub use biome::{BiomeClassifier, BiomeTag, SEA_LEVEL, classify};
pub use climate::{ClimateFields, ConstantFields, FieldKind, FieldSampler, NoiseField};
pub use error::TerrainError;
pub use heightmap::{HeightmapParams, HeightmapSampler};
pub use shifter::{AdvanceReport, TerrainShifter, TrackedColumn, select_block};
pub use surface::{SurfaceHit, locate_surface};
pub use system::{BiomeShifter, TickReport};
pub use world::{Observer, World};
