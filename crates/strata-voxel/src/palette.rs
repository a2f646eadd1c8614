//! The fixed set of block handles the shifter reads and writes.

use strata_config::PaletteConfig;

use crate::registry::{BlockRegistry, BlockTypeId, RegistryError};

/// Block handles resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPalette {
    pub air: BlockTypeId,
    pub stone: BlockTypeId,
    pub water: BlockTypeId,
    pub ice: BlockTypeId,
    pub sand: BlockTypeId,
    pub grass: BlockTypeId,
    pub snow: BlockTypeId,
    pub dirt: BlockTypeId,
}

impl BlockPalette {
    /// Resolves every configured name against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBlock`] for the first name the registry
    /// does not contain. Callers treat this as fatal.
    pub fn resolve(registry: &BlockRegistry, names: &PaletteConfig) -> Result<Self, RegistryError> {
        let palette = Self {
            air: registry.resolve(&names.air)?,
            stone: registry.resolve(&names.stone)?,
            water: registry.resolve(&names.water)?,
            ice: registry.resolve(&names.ice)?,
            sand: registry.resolve(&names.sand)?,
            grass: registry.resolve(&names.grass)?,
            snow: registry.resolve(&names.snow)?,
            dirt: registry.resolve(&names.dirt)?,
        };
        tracing::info!(blocks = registry.len(), "resolved block palette");
        Ok(palette)
    }

    /// `true` for water and ice, the blocks a rewrite must not bury.
    pub fn is_liquid(&self, block: BlockTypeId) -> bool {
        block == self.water || block == self.ice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_default_names() {
        let registry = BlockRegistry::with_core_blocks().unwrap();
        let palette = BlockPalette::resolve(&registry, &PaletteConfig::default()).unwrap();
        assert_eq!(palette.air, BlockTypeId::AIR);
        assert_eq!(Some(palette.stone), registry.lookup_by_name("core:stone"));
        assert_ne!(palette.water, palette.ice);
    }

    #[test]
    fn test_missing_block_is_error() {
        let registry = BlockRegistry::new();
        let result = BlockPalette::resolve(&registry, &PaletteConfig::default());
        assert!(matches!(result, Err(RegistryError::UnknownBlock(ref n)) if n == "core:stone"));
    }

    #[test]
    fn test_liquid_classification() {
        let registry = BlockRegistry::with_core_blocks().unwrap();
        let palette = BlockPalette::resolve(&registry, &PaletteConfig::default()).unwrap();
        assert!(palette.is_liquid(palette.water));
        assert!(palette.is_liquid(palette.ice));
        assert!(!palette.is_liquid(palette.sand));
        assert!(!palette.is_liquid(palette.air));
    }
}
