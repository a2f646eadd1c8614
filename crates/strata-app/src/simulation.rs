//! Headless world + shifter loop.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strata_config::{Config, WorldConfig};
use strata_terrain::{
    BiomeShifter, BiomeTag, ClimateFields, HeightmapParams, HeightmapSampler, Observer, TickReport,
};
use strata_voxel::{BlockPalette, BlockRegistry, SparseWorld};
use tracing::{debug, info};

use crate::error::AppError;
use crate::observer::PatrolObserver;
use crate::scheduler::PeriodicAction;

/// Action id the shifter is scheduled under.
pub const SHIFT_ACTION: &str = "biomeChange";

/// Observer walking speed, in blocks per second.
const PATROL_SPEED: f64 = 1.5;
/// Observer eye height above the terrain.
const EYE_HEIGHT: f64 = 1.6;

/// Running totals over every tick of a [`Simulation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub blocks_written: u64,
    pub columns_retired: u64,
    pub columns_evicted: u64,
    pub conflicts: u64,
    pub discoveries: u64,
    pub failed_searches: u64,
}

impl RunStats {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.blocks_written += report.advance.advanced as u64;
        self.columns_retired += report.advance.retired as u64;
        self.conflicts += report.advance.conflicts as u64;
        self.columns_evicted += report.evicted as u64;
        match report.discovered {
            Some(_) => self.discoveries += 1,
            None => self.failed_searches += 1,
        }
    }
}

/// Lays down terrain from `heightmap`: stone up to the surface, water up to
/// `config.water_level` wherever the surface is lower.
pub fn seed_world(
    world: &mut SparseWorld<BiomeTag>,
    heightmap: &HeightmapSampler,
    palette: &BlockPalette,
    config: &WorldConfig,
    floor: i32,
) {
    let extent = config.extent;
    for x in -extent..=extent {
        for z in -extent..=extent {
            let height = heightmap.column_height(x, z).max(floor);
            world.fill_column(x, z, floor, height, palette.stone);
            if height < config.water_level {
                world.fill_column(x, z, height + 1, config.water_level, palette.water);
            }
        }
    }
    debug!(extent, blocks = world.block_count(), "seeded world");
}

/// A seeded world, climate, observer and shifter, advanced in virtual time.
pub struct Simulation {
    config: Config,
    world: SparseWorld<BiomeTag>,
    heightmap: HeightmapSampler,
    fields: ClimateFields,
    observer: PatrolObserver,
    system: BiomeShifter,
    schedule: PeriodicAction,
    rng: ChaCha8Rng,
    stats: RunStats,
}

impl Simulation {
    /// Builds everything from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the core blocks cannot be registered or a palette block name
    /// is not in the registry.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let registry = BlockRegistry::with_core_blocks()?;
        Self::with_registry(config, &registry)
    }

    pub fn with_registry(config: Config, registry: &BlockRegistry) -> Result<Self, AppError> {
        let palette = BlockPalette::resolve(registry, &config.palette)?;

        let heightmap = HeightmapSampler::new(HeightmapParams {
            seed: config.world.seed,
            amplitude: config.world.height_amplitude,
            base_height: config.world.base_height,
            ..Default::default()
        });
        let mut world = SparseWorld::new();
        seed_world(
            &mut world,
            &heightmap,
            &palette,
            &config.world,
            config.shifter.min_world_y,
        );

        let mut observer = PatrolObserver::new(
            DVec3::new(0.5, 0.0, 0.5),
            f64::from(config.world.extent) * 0.5,
            PATROL_SPEED,
        );
        let start = observer.position();
        observer.set_height(ground_height(&heightmap, start));

        let fields = ClimateFields::new(&config.climate);
        let system = BiomeShifter::new(palette, config.shifter.clone());
        let schedule = PeriodicAction::new(
            SHIFT_ACTION,
            Duration::from_millis(config.shifter.period_ms),
        );
        let rng = ChaCha8Rng::seed_from_u64(config.shifter.seed);

        info!(
            extent = config.world.extent,
            sea_level = config.shifter.sea_level,
            period_ms = config.shifter.period_ms,
            "simulation ready"
        );

        Ok(Self {
            config,
            world,
            heightmap,
            fields,
            observer,
            system,
            schedule,
            rng,
            stats: RunStats::default(),
        })
    }

    /// Advances virtual time by `dt`, running the shifter once per scheduler firing.
    pub fn step(&mut self, dt: Duration) -> Vec<TickReport> {
        self.observer.step(dt.as_secs_f64());
        let here = self.observer.position();
        self.observer.set_height(ground_height(&self.heightmap, here));

        let firings = self.schedule.advance(dt);
        (0..firings).map(|_| self.tick()).collect()
    }

    /// Runs exactly `count` shifter ticks, one period apart.
    pub fn run_ticks(&mut self, count: u32) -> RunStats {
        let period = self.schedule.period();
        for _ in 0..count {
            self.step(period);
        }
        self.stats
    }

    fn tick(&mut self) -> TickReport {
        let report = self.system.on_tick(
            &mut self.world,
            &self.fields,
            &self.observer,
            &mut self.rng,
        );
        self.stats.record(&report);
        report
    }

    /// Count of block positions carrying each biome.
    pub fn biome_histogram(&self) -> BTreeMap<BiomeTag, usize> {
        let mut histogram = BTreeMap::new();
        for (_, biome) in self.world.biomes() {
            *histogram.entry(biome).or_insert(0) += 1;
        }
        histogram
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn tracked(&self) -> usize {
        self.system.shifter().len()
    }

    pub fn world(&self) -> &SparseWorld<BiomeTag> {
        &self.world
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn ground_height(heightmap: &HeightmapSampler, at: DVec3) -> f64 {
    let x = at.x.floor() as i32;
    let z = at.z.floor() as i32;
    f64::from(heightmap.column_height(x, z)) + EYE_HEIGHT
}

#[cfg(test)]
mod tests {
    use strata_config::PaletteConfig;
    use strata_voxel::RegistryError;

    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world.extent = 24;
        config.world.seed = 5;
        config.shifter.seed = 5;
        config.climate.seed = 5;
        config
    }

    #[test]
    fn test_seed_world_floods_low_columns() {
        let registry = BlockRegistry::with_core_blocks().unwrap();
        let palette = BlockPalette::resolve(&registry, &PaletteConfig::default()).unwrap();
        let heightmap = HeightmapSampler::new(HeightmapParams {
            amplitude: 0.0,
            base_height: 20.0,
            ..Default::default()
        });
        let config = WorldConfig {
            extent: 1,
            water_level: 25,
            ..Default::default()
        };
        let mut world = SparseWorld::new();
        seed_world(&mut world, &heightmap, &palette, &config, 0);

        assert_eq!(world.block(glam::IVec3::new(1, 20, -1)), palette.stone);
        assert_eq!(world.block(glam::IVec3::new(1, 25, -1)), palette.water);
        assert_eq!(world.block(glam::IVec3::new(1, 26, -1)), palette.air);
        assert_eq!(world.block_count(), 9 * 26);
    }

    #[test]
    fn test_ticks_follow_schedule() {
        let mut sim = Simulation::new(small_config()).unwrap();
        assert!(sim.step(Duration::from_millis(5000)).is_empty());
        assert_eq!(sim.step(Duration::from_millis(1000)).len(), 1);
        assert_eq!(sim.stats().ticks, 1);
    }

    #[test]
    fn test_run_discovers_and_rewrites() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let stats = sim.run_ticks(20);

        assert_eq!(stats.ticks, 20);
        assert_eq!(stats.discoveries + stats.failed_searches, 20);
        assert!(stats.discoveries > 0);
        assert!(stats.blocks_written > 0);
        assert!(sim.tracked() > 0);
        assert!(sim.tracked() <= sim.config().shifter.max_tracked);
        assert!(!sim.biome_histogram().is_empty());
    }

    #[test]
    fn test_same_config_same_outcome() {
        let mut a = Simulation::new(small_config()).unwrap();
        let mut b = Simulation::new(small_config()).unwrap();
        assert_eq!(a.run_ticks(15), b.run_ticks(15));
        assert_eq!(a.biome_histogram(), b.biome_histogram());
    }

    #[test]
    fn test_unknown_palette_block_is_fatal() {
        let mut config = small_config();
        config.palette.snow = "core:powder".to_string();
        let result = Simulation::new(config);
        assert!(matches!(
            result,
            Err(AppError::Registry(RegistryError::UnknownBlock(_)))
        ));
    }
}
