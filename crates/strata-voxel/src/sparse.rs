//! Hash-map backed block and biome storage.
//!
//! Every cell that was never written reads back as air. Biomes are stored per
//! block position and are generic so this crate stays independent of any
//! particular biome type.

use glam::IVec3;
use rustc_hash::FxHashMap;

use crate::registry::BlockTypeId;

/// A sparse voxel world with per-position biome tags.
#[derive(Clone, Debug)]
pub struct SparseWorld<B> {
    blocks: FxHashMap<IVec3, BlockTypeId>,
    biomes: FxHashMap<IVec3, B>,
}

impl<B: Copy> SparseWorld<B> {
    /// Creates an empty (all air) world.
    pub fn new() -> Self {
        Self {
            blocks: FxHashMap::default(),
            biomes: FxHashMap::default(),
        }
    }

    /// Returns the block at `pos`, or air if unset.
    pub fn block(&self, pos: IVec3) -> BlockTypeId {
        self.blocks.get(&pos).copied().unwrap_or(BlockTypeId::AIR)
    }

    /// Writes `block` at `pos`. Writing air removes the cell.
    pub fn put_block(&mut self, pos: IVec3, block: BlockTypeId) {
        if block == BlockTypeId::AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
    }

    /// Fills `x, z` from `bottom` to `top` inclusive with `block`.
    pub fn fill_column(&mut self, x: i32, z: i32, bottom: i32, top: i32, block: BlockTypeId) {
        for y in bottom..=top {
            self.put_block(IVec3::new(x, y, z), block);
        }
    }

    /// Returns the biome recorded at `pos`, if any.
    pub fn biome(&self, pos: IVec3) -> Option<B> {
        self.biomes.get(&pos).copied()
    }

    /// Records `biome` at `pos`.
    pub fn put_biome(&mut self, pos: IVec3, biome: B) {
        self.biomes.insert(pos, biome);
    }

    /// Iterates over every recorded biome.
    pub fn biomes(&self) -> impl Iterator<Item = (IVec3, B)> + '_ {
        self.biomes.iter().map(|(pos, biome)| (*pos, *biome))
    }

    /// Number of non-air cells.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl<B: Copy> Default for SparseWorld<B> {
    fn default() -> Self {
        Self::new()
    }
}
