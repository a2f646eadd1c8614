//! Block type registry: maps compact [`BlockTypeId`] values to [`BlockTypeDef`] metadata.
//!
//! The registry is built once during startup. Air is always ID 0 so that
//! unset cells in a world read back as empty space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact block handle stored in the world (2 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockTypeId(pub u16);

impl BlockTypeId {
    /// The air block.
    pub const AIR: Self = Self(0);
}

/// Physical phase of a block, used to tell liquids apart from terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Empty space.
    Gas,
    /// Water and similar.
    Liquid,
    /// Frozen liquid such as ice.
    Frozen,
    /// Ordinary terrain.
    Solid,
}

/// Full descriptor for a block type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockTypeDef {
    /// Namespaced name, e.g. `core:stone`.
    pub name: String,
    /// Physical phase.
    pub phase: Phase,
}

impl BlockTypeDef {
    /// Shorthand constructor.
    pub fn new(name: impl Into<String>, phase: Phase) -> Self {
        Self {
            name: name.into(),
            phase,
        }
    }
}

/// Errors raised by the registry and by palette resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with the same name has already been registered.
    #[error("duplicate block type name: {0}")]
    DuplicateName(String),
    /// All 65 535 user-defined slots have been consumed.
    #[error("block type registry is full (max 65536 types)")]
    RegistryFull,
    /// A palette entry names a block the registry does not know.
    #[error("unknown block type: {0}")]
    UnknownBlock(String),
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`BlockTypeId`] → [`BlockTypeDef`] with O(1) lookup in both directions.
pub struct BlockRegistry {
    /// Dense array where `index == BlockTypeId.0`.
    types: Vec<BlockTypeDef>,
    name_to_id: HashMap<String, BlockTypeId>,
}

impl BlockRegistry {
    /// Name under which air is pre-registered.
    pub const AIR_NAME: &'static str = "engine:air";

    /// Creates a new registry with air pre-registered as ID 0.
    pub fn new() -> Self {
        let mut name_to_id = HashMap::new();
        name_to_id.insert(Self::AIR_NAME.to_string(), BlockTypeId::AIR);

        Self {
            types: vec![BlockTypeDef::new(Self::AIR_NAME, Phase::Gas)],
            name_to_id,
        }
    }

    /// Registry holding air plus the seven `core:` blocks the shifter paints with.
    ///
    /// # Errors
    ///
    /// Propagates any [`RegistryError`] from registering the core blocks.
    pub fn with_core_blocks() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        let core = [
            ("core:stone", Phase::Solid),
            ("core:water", Phase::Liquid),
            ("core:ice", Phase::Frozen),
            ("core:sand", Phase::Solid),
            ("core:grass", Phase::Solid),
            ("core:snow", Phase::Solid),
            ("core:dirt", Phase::Solid),
        ];
        for (name, phase) in core {
            registry.register(BlockTypeDef::new(name, phase))?;
        }
        Ok(registry)
    }

    /// Registers a new block type and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a type with the same name
    /// already exists, or [`RegistryError::RegistryFull`] if all slots are used.
    pub fn register(&mut self, def: BlockTypeDef) -> Result<BlockTypeId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.types.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = BlockTypeId(self.types.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.types.push(def);
        Ok(id)
    }

    /// Returns the definition for `id`, or `None` if it was never registered.
    pub fn get(&self, id: BlockTypeId) -> Option<&BlockTypeDef> {
        self.types.get(id.0 as usize)
    }

    /// Returns the ID for a named block type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<BlockTypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Like [`lookup_by_name`](Self::lookup_by_name) but reports a missing name as an error.
    pub fn resolve(&self, name: &str) -> Result<BlockTypeId, RegistryError> {
        self.lookup_by_name(name)
            .ok_or_else(|| RegistryError::UnknownBlock(name.to_string()))
    }

    /// Returns the total number of registered types (including air).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if only air is registered.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
