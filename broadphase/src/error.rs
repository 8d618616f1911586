use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialError {
    InvalidCellSize { cell_size: f32 },
    InvalidGridDims { width: u32, height: u32 },
    InvalidWorldExtent { width: f32, height: f32 },
    InvalidTightSize { tight_size: f32, cell_size: f32 },
    InvalidRootRadius { radius: f32 },
    InvalidMaxRadius { max_radius: f32 },
    InvalidMaxDepth { max_depth: u32, limit: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;

impl fmt::Display for SpatialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpatialError::InvalidCellSize { cell_size } => {
                write!(
                    f,
                    "cell size must be finite and positive (cell_size: {})",
                    cell_size
                )
            }
            SpatialError::InvalidGridDims { width, height } => {
                write!(
                    f,
                    "grid must be at least one cell wide and tall (width: {}, height: {})",
                    width, height
                )
            }
            SpatialError::InvalidWorldExtent { width, height } => {
                write!(
                    f,
                    "world extent must be finite and positive (width: {}, height: {})",
                    width, height
                )
            }
            SpatialError::InvalidTightSize {
                tight_size,
                cell_size,
            } => {
                write!(
                    f,
                    "tight cell size must be positive and smaller than the loose cell size (tight_size: {}, cell_size: {})",
                    tight_size, cell_size
                )
            }
            SpatialError::InvalidRootRadius { radius } => {
                write!(
                    f,
                    "root radius must be finite and positive (radius: {})",
                    radius
                )
            }
            SpatialError::InvalidMaxRadius { max_radius } => {
                write!(
                    f,
                    "max radius must be finite and non-negative (max_radius: {})",
                    max_radius
                )
            }
            SpatialError::InvalidMaxDepth { max_depth, limit } => {
                write!(
                    f,
                    "max depth must not exceed {} (max_depth: {})",
                    limit, max_depth
                )
            }
        }
    }
}

impl std::error::Error for SpatialError {}

pub(crate) fn validate_cell_size(cell_size: f32) -> SpatialResult<()> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(SpatialError::InvalidCellSize { cell_size });
    }
    Ok(())
}

pub(crate) fn validate_world_extent(width: f32, height: f32) -> SpatialResult<()> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(SpatialError::InvalidWorldExtent { width, height });
    }
    Ok(())
}
