//! Broad-phase spatial containers for circular entities in 2D.
//!
//! Four interchangeable containers share the [`SpatialContainer`] contract:
//!
//! - [`UniformHashGrid`]: fixed uniform grid, best for entries of similar radius.
//! - [`LooseGrid`]: loose/tight double grid for entries of widely varying radius.
//! - [`KdTree`]: unbalanced alternating-axis KD-tree.
//! - [`SphereTree`]: bounding-circle quadtree holding one payload per leaf.
//!
//! Every container is cleared and refilled each frame: `prepare`, then
//! `insert`s, then queries. A query returns the entries overlapping a circle
//! whose layer mask intersects the query mask, nearest first, truncated to the
//! caller's buffer.
//!
//! ```
//! use broadphase::{HashGridConfig, LayerMask, SpatialContainer, UniformHashGrid};
//! use common::shapes::Vec2;
//!
//! let mut grid = UniformHashGrid::new(HashGridConfig {
//!     cell_size: 64.0,
//!     width: 4,
//!     height: 4,
//!     ..HashGridConfig::default()
//! })
//! .unwrap();
//! grid.prepare();
//! grid.insert(7u32, Vec2::new(10.0, 10.0), 4.0, LayerMask(1));
//!
//! let mut results = [0u32; 4];
//! let count = grid.query(Vec2::new(12.0, 12.0), 5.0, LayerMask(1), &mut results);
//! assert_eq!(&results[..count], &[7]);
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod hash_grid;
pub mod kd_tree;
pub mod layer;
pub mod loose_grid;
pub mod selector;
pub mod sphere_tree;
pub mod types;

pub use config::{ContainerConfig, HashGridConfig, KdTreeConfig, LooseGridConfig, SphereTreeConfig};
pub use container::{new_container, SpatialContainer};
pub use error::{SpatialError, SpatialResult};
pub use hash_grid::UniformHashGrid;
pub use kd_tree::KdTree;
pub use layer::LayerMask;
pub use loose_grid::LooseGrid;
pub use selector::BoundedNearest;
pub use sphere_tree::SphereTree;
pub use types::Entry;
