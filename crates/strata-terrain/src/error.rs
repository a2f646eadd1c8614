//! Terrain error types.

/// Errors surfaced by terrain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// The surface search used up its step budget without finding an air/solid boundary.
    #[error("no surface at ({x}, {z}) within {steps} search steps (stopped at y={last_y})")]
    SurfaceNotFound {
        x: i32,
        z: i32,
        last_y: i32,
        steps: u32,
    },
}
