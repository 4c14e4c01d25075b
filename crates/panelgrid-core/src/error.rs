//! Errors raised by the cell store and the tiling engine.

use panelgrid_logic::config::ConfigError;
use panelgrid_logic::lattice::LatticePos;

/// Errors from [`crate::store::CellWorld`].
#[derive(Debug)]
pub enum StoreError {
    /// A group write targeted a position with no cell.
    MissingCell(LatticePos),
    /// A cell already exists at this position.
    Occupied(LatticePos),
    /// The position index points at an entity without a cell component.
    Component(hecs::ComponentError),
}

impl From<hecs::ComponentError> for StoreError {
    fn from(e: hecs::ComponentError) -> Self {
        StoreError::Component(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::MissingCell(pos) => write!(f, "No cell at {}", pos),
            StoreError::Occupied(pos) => write!(f, "Position {} already holds a cell", pos),
            StoreError::Component(e) => write!(f, "ECS component error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from [`crate::engine::TilingEngine`].
#[derive(Debug)]
pub enum EngineError {
    InvalidConfig(Vec<ConfigError>),
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfig(errors) => {
                write!(f, "Invalid tiling config:")?;
                for e in errors {
                    write!(f, " {};", e)?;
                }
                Ok(())
            }
            EngineError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Store(e) => Some(e),
            EngineError::InvalidConfig(_) => None,
        }
    }
}
