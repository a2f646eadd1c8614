//! Per-tick orchestration: advance tracked columns, then discover a new one.

use glam::IVec3;
use rand::Rng;
use strata_config::ShifterConfig;
use strata_voxel::BlockPalette;
use tracing::{debug, warn};

use crate::biome::BiomeTag;
use crate::climate::FieldSampler;
use crate::shifter::{AdvanceReport, TerrainShifter};
use crate::surface::locate_surface;
use crate::world::{Observer, World};

/// What one [`BiomeShifter::on_tick`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advance: AdvanceReport,
    /// Columns dropped for being too far from the observer.
    pub evicted: usize,
    /// Surface point picked this tick and its biome, if the surface search succeeded.
    pub discovered: Option<(IVec3, BiomeTag)>,
}

/// Drives a [`TerrainShifter`] around a moving observer.
pub struct BiomeShifter {
    shifter: TerrainShifter,
}

impl BiomeShifter {
    pub fn new(palette: BlockPalette, config: ShifterConfig) -> Self {
        Self {
            shifter: TerrainShifter::new(palette, config),
        }
    }

    pub fn shifter(&self) -> &TerrainShifter {
        &self.shifter
    }

    pub fn shifter_mut(&mut self) -> &mut TerrainShifter {
        &mut self.shifter
    }

    /// Runs one scheduler firing.
    ///
    /// Existing columns are advanced before the new point is added, so a
    /// freshly discovered column gets its first block on the following tick.
    pub fn on_tick<W, F, O, R>(
        &mut self,
        world: &mut W,
        fields: &F,
        observer: &O,
        rng: &mut R,
    ) -> TickReport
    where
        W: World + ?Sized,
        F: FieldSampler + ?Sized,
        O: Observer + ?Sized,
        R: Rng + ?Sized,
    {
        let advance = self.shifter.advance_all(world, fields);

        let center = observer.position();
        let radius = self.shifter.config().retire_radius;
        let evicted = if radius > 0.0 {
            self.shifter.evict_outside(center, radius)
        } else {
            0
        };

        let discovered = self.discover(world, fields, observer, rng);

        TickReport {
            advance,
            evicted,
            discovered,
        }
    }

    /// Picks a random surface point near the observer, tags its biome and tracks it.
    ///
    /// Landing on a column that is already tracked restarts it at the surface.
    pub fn discover<W, F, O, R>(
        &mut self,
        world: &mut W,
        fields: &F,
        observer: &O,
        rng: &mut R,
    ) -> Option<(IVec3, BiomeTag)>
    where
        W: World + ?Sized,
        F: FieldSampler + ?Sized,
        O: Observer + ?Sized,
        R: Rng + ?Sized,
    {
        let config = self.shifter.config();
        let radius = config.sample_radius;
        let limit = config.surface_search_limit;
        let air = self.shifter.palette().air;

        let position = observer.position();
        let (dx, dz) = if radius > 0.0 {
            (
                rng.random_range(-radius..radius),
                rng.random_range(-radius..radius),
            )
        } else {
            (0.0, 0.0)
        };
        let x = (position.x + dx).floor() as i32;
        let z = (position.z + dz).floor() as i32;
        let start_y = position.y.floor() as i32;

        let surface = match locate_surface(world, air, x, start_y, z, limit) {
            Ok(hit) => hit,
            Err(err) => {
                warn!(%err, "skipping discovery this tick");
                return None;
            }
        };

        let origin = IVec3::new(x, surface.y, z);
        let biome = self.shifter.classify_at(fields, x, surface.y, z);
        world.set_biome(origin, biome);
        let added = self.shifter.track(origin);
        debug!(?origin, %biome, added, search_steps = surface.steps, "discovered column");

        Some((origin, biome))
    }
}
