//! Incremental, depth-indexed terrain rewriting.
//!
//! Each tracked column keeps a cursor that starts at the column's surface and
//! moves down one block per [`TerrainShifter::advance_all`] pass. Every pass
//! re-classifies the column, picks one block from the biome's palette for the
//! cursor's depth and writes it.

use glam::{DVec3, IVec3};
use hashbrown::HashMap;
use strata_config::{ClassifyAt, ShifterConfig};
use strata_voxel::{BlockPalette, BlockTypeId};
use tracing::{debug, trace};

use crate::biome::{BiomeClassifier, BiomeTag};
use crate::climate::{FieldKind, FieldSampler};
use crate::world::World;

/// Depth below which grassland biomes switch from dirt to stone.
const SOIL_DEPTH: i32 = 32;
/// Depth below which desert sand gives way to stone.
const SAND_DEPTH: i32 = 8;
/// Beach sand is this many blocks thick.
const BEACH_SAND_DEPTH: i32 = 3;
/// Height above sea level where grassland surfaces turn to snow.
const SNOW_LINE: i32 = 96;

/// One surface location under active rewriting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedColumn {
    /// Column position with the surface y at discovery. Never changes.
    pub origin: IVec3,
    /// Height the next pass writes at.
    pub cursor_y: i32,
    /// Discovery order, used to evict the oldest column first.
    pub sequence: u64,
}

impl TrackedColumn {
    /// Blocks already rewritten below the original surface (0 on the first pass).
    pub fn depth(&self) -> i32 {
        self.origin.y - self.cursor_y
    }

    /// Position the next pass writes at.
    pub fn cursor(&self) -> IVec3 {
        IVec3::new(self.origin.x, self.cursor_y, self.origin.z)
    }
}

/// Counters from one [`TerrainShifter::advance_all`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Columns that wrote a block and moved down.
    pub advanced: usize,
    /// Columns removed after reaching the depth floor.
    pub retired: usize,
    /// Columns whose target block changed between read and write.
    pub conflicts: usize,
}

/// Picks the block to write for `biome` at `depth` below the surface.
///
/// `y` is the height being written and `existing` the block currently there.
/// Water and ice are never replaced by dry terrain.
pub fn select_block(
    biome: BiomeTag,
    depth: i32,
    y: i32,
    existing: BlockTypeId,
    palette: &BlockPalette,
    sea_level: i32,
) -> BlockTypeId {
    let wet = palette.is_liquid(existing);
    match biome {
        BiomeTag::Forest | BiomeTag::Plains | BiomeTag::Mountains => {
            if depth == 0 && y > sea_level && y < sea_level + SNOW_LINE {
                if wet { palette.water } else { palette.grass }
            } else if depth == 0 && y >= sea_level + SNOW_LINE {
                if wet { palette.ice } else { palette.snow }
            } else if wet {
                palette.water
            } else if depth > SOIL_DEPTH {
                palette.stone
            } else {
                palette.dirt
            }
        }
        BiomeTag::Snow => {
            if wet {
                palette.ice
            } else if depth == 0 && y > sea_level {
                palette.snow
            } else if depth > SOIL_DEPTH {
                palette.stone
            } else {
                palette.dirt
            }
        }
        BiomeTag::Desert => {
            if wet {
                palette.water
            } else if depth > SAND_DEPTH {
                palette.stone
            } else {
                palette.sand
            }
        }
        BiomeTag::Ocean => {
            if wet {
                palette.water
            } else if depth == 0 {
                palette.sand
            } else {
                palette.stone
            }
        }
        BiomeTag::Beach => {
            if wet {
                palette.water
            } else if depth < BEACH_SAND_DEPTH {
                palette.sand
            } else {
                palette.stone
            }
        }
    }
}

/// Owns the set of tracked columns and advances them.
pub struct TerrainShifter {
    columns: HashMap<IVec3, TrackedColumn>,
    palette: BlockPalette,
    classifier: BiomeClassifier,
    config: ShifterConfig,
    next_sequence: u64,
}

impl TerrainShifter {
    pub fn new(palette: BlockPalette, config: ShifterConfig) -> Self {
        Self {
            columns: HashMap::new(),
            palette,
            classifier: BiomeClassifier::new(config.sea_level),
            config,
            next_sequence: 0,
        }
    }

    pub fn palette(&self) -> &BlockPalette {
        &self.palette
    }

    pub fn config(&self) -> &ShifterConfig {
        &self.config
    }

    /// Starts tracking the column whose surface is at `origin`.
    ///
    /// Tracking an origin that is already tracked restarts that column at its
    /// surface and returns `false`; the entry stays unique and keeps its place
    /// in eviction order. When the map is full the oldest column is evicted to
    /// make room.
    pub fn track(&mut self, origin: IVec3) -> bool {
        if let Some(column) = self.columns.get_mut(&origin) {
            column.cursor_y = origin.y;
            return false;
        }
        if self.config.max_tracked == 0 {
            return false;
        }
        while self.columns.len() >= self.config.max_tracked {
            self.evict_oldest();
        }

        let column = TrackedColumn {
            origin,
            cursor_y: origin.y,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.columns.insert(origin, column);
        true
    }

    pub fn get(&self, origin: IVec3) -> Option<&TrackedColumn> {
        self.columns.get(&origin)
    }

    pub fn columns(&self) -> impl Iterator<Item = &TrackedColumn> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Classifies the column `(x, z)` as if its surface were at `elevation`.
    pub fn classify_at<F: FieldSampler + ?Sized>(
        &self,
        fields: &F,
        x: i32,
        elevation: i32,
        z: i32,
    ) -> BiomeTag {
        let (fx, fy, fz) = (f64::from(x), f64::from(elevation), f64::from(z));
        let temperature = fields.sample(FieldKind::Temperature, fx, fy, fz);
        let humidity = fields.sample(FieldKind::Humidity, fx, fy, fz);
        self.classifier.classify(fy, temperature, humidity)
    }

    /// Moves every tracked column down by one block.
    pub fn advance_all<W, F>(&mut self, world: &mut W, fields: &F) -> AdvanceReport
    where
        W: World + ?Sized,
        F: FieldSampler + ?Sized,
    {
        let mut report = AdvanceReport::default();
        let snapshot: Vec<IVec3> = self.columns.keys().copied().collect();

        for origin in snapshot {
            let Some(column) = self.columns.get(&origin).copied() else {
                continue;
            };

            if column.cursor_y < self.config.min_world_y {
                self.columns.remove(&origin);
                report.retired += 1;
                continue;
            }

            let sample_y = match self.config.classify_at {
                ClassifyAt::Surface => column.origin.y,
                ClassifyAt::Cursor => column.cursor_y,
            };
            let biome = self.classify_at(fields, origin.x, sample_y, origin.z);

            let depth = column.depth();
            let pos = column.cursor();
            let existing = world.get_block(pos);
            let block = select_block(
                biome,
                depth,
                column.cursor_y,
                existing,
                &self.palette,
                self.config.sea_level,
            );

            if let Err(actual) = world.compare_and_set(pos, existing, block) {
                debug!(?pos, ?existing, ?actual, "block changed under shifter, retrying next tick");
                report.conflicts += 1;
                continue;
            }
            world.set_biome(pos, biome);
            trace!(?pos, %biome, depth, ?block, "rewrote block");

            let next_y = column.cursor_y - 1;
            let max_depth = i32::try_from(self.config.max_depth).unwrap_or(i32::MAX);
            if depth >= max_depth || next_y < self.config.min_world_y {
                self.columns.remove(&origin);
                report.retired += 1;
            } else if let Some(column) = self.columns.get_mut(&origin) {
                column.cursor_y = next_y;
            }
            report.advanced += 1;
        }

        debug!(
            advanced = report.advanced,
            retired = report.retired,
            conflicts = report.conflicts,
            tracked = self.columns.len(),
            "advanced tracked columns"
        );
        report
    }

    /// Drops columns farther than `radius` (horizontally) from `center`.
    pub fn evict_outside(&mut self, center: DVec3, radius: f64) -> usize {
        let before = self.columns.len();
        let radius_sq = radius * radius;
        self.columns.retain(|origin, _| {
            let dx = f64::from(origin.x) - center.x;
            let dz = f64::from(origin.z) - center.z;
            dx * dx + dz * dz <= radius_sq
        });
        before - self.columns.len()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .columns
            .values()
            .min_by_key(|column| column.sequence)
            .map(|column| column.origin);
        if let Some(origin) = oldest {
            debug!(?origin, "tracked column limit reached, evicting oldest");
            self.columns.remove(&origin);
        }
    }
}
