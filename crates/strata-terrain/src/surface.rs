//! Bounded vertical search for the topmost non-air block of a column.

use glam::IVec3;
use strata_voxel::BlockTypeId;

use crate::error::TerrainError;
use crate::world::World;

/// A located surface block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceHit {
    /// Height of the topmost non-air block.
    pub y: i32,
    /// Vertical moves the search made.
    pub steps: u32,
}

/// Finds the surface of column `(x, z)` starting from `start_y`.
///
/// Climbs while inside solid blocks, then descends while in air. Both phases
/// share one budget of `limit` moves.
///
/// # Errors
///
/// Returns [`TerrainError::SurfaceNotFound`] when the budget runs out before
/// an air/solid boundary is found.
pub fn locate_surface<W: World + ?Sized>(
    world: &W,
    air: BlockTypeId,
    x: i32,
    start_y: i32,
    z: i32,
    limit: u32,
) -> Result<SurfaceHit, TerrainError> {
    let is_air = |y: i32| world.get_block(IVec3::new(x, y, z)) == air;
    let exhausted = |y: i32, steps: u32| TerrainError::SurfaceNotFound {
        x,
        z,
        last_y: y,
        steps,
    };

    let mut y = start_y;
    let mut steps = 0;

    while !is_air(y) {
        if steps == limit {
            return Err(exhausted(y, steps));
        }
        y += 1;
        steps += 1;
    }
    while is_air(y) {
        if steps == limit {
            return Err(exhausted(y, steps));
        }
        y -= 1;
        steps += 1;
    }

    Ok(SurfaceHit { y, steps })
}
