//! Block types, the shifter's block palette, and an in-memory sparse world.

pub mod palette;
pub mod registry;
pub mod sparse;

pub use palette::BlockPalette;
pub use registry::{BlockRegistry, BlockTypeDef, BlockTypeId, Phase, RegistryError};
pub use sparse::SparseWorld;
