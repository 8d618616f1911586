use common::shapes::Vec2;

/// Uniform hash grid parameters. `width` and `height` count cells, not world units.
#[derive(Debug, Clone)]
pub struct HashGridConfig {
    pub cell_size: f32,
    pub width: u32,
    pub height: u32,
    // Entries reserved per cell on first use.
    pub cell_capacity: usize,
}

impl Default for HashGridConfig {
    fn default() -> Self {
        HashGridConfig {
            cell_size: 64.0,
            width: 64,
            height: 64,
            cell_capacity: 8,
        }
    }
}

/// Loose/tight double grid parameters, all in world units measured from the origin.
#[derive(Debug, Clone)]
pub struct LooseGridConfig {
    pub width: f32,
    pub height: f32,
    pub cell_size: f32,
    pub tight_size: f32,
}

impl Default for LooseGridConfig {
    fn default() -> Self {
        LooseGridConfig {
            width: 4096.0,
            height: 4096.0,
            cell_size: 128.0,
            tight_size: 32.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KdTreeConfig {
    pub initial_capacity: usize,
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        KdTreeConfig {
            initial_capacity: 1024,
        }
    }
}

/// Bounding sphere quadtree parameters.
///
/// `radius` is the bounding circle of the root square. A leaf subdivides while
/// its depth is below `max_depth` and half its radius is still at least
/// `max_radius`. `max_depth` may not exceed [`SphereTreeConfig::DEPTH_LIMIT`].
#[derive(Debug, Clone)]
pub struct SphereTreeConfig {
    pub center: Vec2,
    pub radius: f32,
    pub max_depth: u32,
    pub max_radius: f32,
    pub initial_capacity: usize,
}

impl SphereTreeConfig {
    // An insert allocates up to `max_depth` nodes.
    pub const DEPTH_LIMIT: u32 = 32;
}

impl Default for SphereTreeConfig {
    fn default() -> Self {
        SphereTreeConfig {
            center: Vec2::ZERO,
            radius: 4096.0,
            max_depth: 8,
            max_radius: 1.0,
            initial_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContainerConfig {
    HashGrid(HashGridConfig),
    LooseGrid(LooseGridConfig),
    KdTree(KdTreeConfig),
    SphereTree(SphereTreeConfig),
}
