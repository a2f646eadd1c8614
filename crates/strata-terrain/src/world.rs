//! Host-facing traits: the block/biome store and the observer being followed.

use glam::{DVec3, IVec3};
use strata_voxel::{BlockTypeId, SparseWorld};

use crate::biome::BiomeTag;

/// Block and biome storage owned by the host.
pub trait World {
    fn get_block(&self, pos: IVec3) -> BlockTypeId;

    fn set_block(&mut self, pos: IVec3, block: BlockTypeId);

    fn set_biome(&mut self, pos: IVec3, biome: BiomeTag);

    fn biome_at(&self, pos: IVec3) -> Option<BiomeTag>;

    /// Writes `new` at `pos` only if the block there is still `expected`.
    ///
    /// Returns the block actually present on mismatch. Hosts with concurrent
    /// writers should override this with a real atomic operation.
    fn compare_and_set(
        &mut self,
        pos: IVec3,
        expected: BlockTypeId,
        new: BlockTypeId,
    ) -> Result<(), BlockTypeId> {
        let current = self.get_block(pos);
        if current != expected {
            return Err(current);
        }
        self.set_block(pos, new);
        Ok(())
    }
}

/// Anything with a position the shifter can work around.
pub trait Observer {
    fn position(&self) -> DVec3;
}

impl Observer for DVec3 {
    fn position(&self) -> DVec3 {
        *self
    }
}

impl World for SparseWorld<BiomeTag> {
    fn get_block(&self, pos: IVec3) -> BlockTypeId {
        self.block(pos)
    }

    fn set_block(&mut self, pos: IVec3, block: BlockTypeId) {
        self.put_block(pos, block);
    }

    fn set_biome(&mut self, pos: IVec3, biome: BiomeTag) {
        self.put_biome(pos, biome);
    }

    fn biome_at(&self, pos: IVec3) -> Option<BiomeTag> {
        self.biome(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_and_set_matches() {
        let mut world = SparseWorld::<BiomeTag>::new();
        let pos = IVec3::new(0, 5, 0);
        assert!(world.compare_and_set(pos, BlockTypeId::AIR, BlockTypeId(3)).is_ok());
        assert_eq!(world.get_block(pos), BlockTypeId(3));
    }

    #[test]
    fn test_compare_and_set_mismatch_leaves_block() {
        let mut world = SparseWorld::<BiomeTag>::new();
        let pos = IVec3::new(0, 5, 0);
        world.set_block(pos, BlockTypeId(2));
        let result = world.compare_and_set(pos, BlockTypeId::AIR, BlockTypeId(3));
        assert_eq!(result, Err(BlockTypeId(2)));
        assert_eq!(world.get_block(pos), BlockTypeId(2));
    }

    #[test]
    fn test_biome_roundtrip() {
        let mut world = SparseWorld::<BiomeTag>::new();
        world.set_biome(IVec3::ONE, BiomeTag::Snow);
        assert_eq!(world.biome_at(IVec3::ONE), Some(BiomeTag::Snow));
        assert_eq!(world.biome_at(IVec3::ZERO), None);
    }
}
