use crate::config::ContainerConfig;
use crate::error::SpatialResult;
use crate::hash_grid::UniformHashGrid;
use crate::kd_tree::KdTree;
use crate::layer::LayerMask;
use crate::loose_grid::LooseGrid;
use crate::selector::BoundedNearest;
use crate::sphere_tree::SphereTree;
use crate::types::Entry;
use common::shapes::Vec2;

/// Shared contract of every spatial container.
///
/// A frame runs `prepare`, then any number of `insert`s, then any number of
/// queries. Nothing is ever removed individually; the whole container is
/// rebuilt each epoch.
pub trait SpatialContainer<T: Copy> {
    /// Drops every entry.
    fn clear(&mut self);

    /// Per-frame hook run before the insert phase.
    fn prepare(&mut self) {
        self.clear();
    }

    fn insert(&mut self, data: T, position: Vec2, radius: f32, layer_mask: LayerMask);

    /// Calls `f` once for every entry whose circle strictly overlaps the query
    /// circle and whose mask intersects `layer_mask`, with its squared
    /// distance to `position`. Visit order is unspecified.
    fn for_each_overlap(
        &self,
        position: Vec2,
        radius: f32,
        layer_mask: LayerMask,
        f: &mut dyn FnMut(&Entry<T>, f32),
    );

    /// Number of entries currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes up to `results.len()` matches nearest first and returns how many
    /// were written. Matches past the buffer's capacity are dropped, farthest
    /// first.
    fn query(&self, position: Vec2, radius: f32, layer_mask: LayerMask, results: &mut [T]) -> usize {
        if results.is_empty() {
            return 0;
        }
        let mut selector = BoundedNearest::new(results.len());
        self.for_each_overlap(position, radius, layer_mask, &mut |entry, distance_sq| {
            selector.offer(entry.data, distance_sq);
        });
        selector.finish(results)
    }

    /// Same as `query` but returns whole entries.
    fn query_entries(
        &self,
        position: Vec2,
        radius: f32,
        layer_mask: LayerMask,
        results: &mut [Entry<T>],
    ) -> usize {
        if results.is_empty() {
            return 0;
        }
        let mut selector = BoundedNearest::new(results.len());
        self.for_each_overlap(position, radius, layer_mask, &mut |entry, distance_sq| {
            selector.offer(*entry, distance_sq);
        });
        selector.finish(results)
    }

    fn insert_layer<L>(&mut self, data: T, position: Vec2, radius: f32, layer: L)
    where
        Self: Sized,
        L: Into<LayerMask>,
    {
        self.insert(data, position, radius, layer.into());
    }

    fn query_layer<L>(&self, position: Vec2, radius: f32, layer: L, results: &mut [T]) -> usize
    where
        Self: Sized,
        L: Into<LayerMask>,
    {
        self.query(position, radius, layer.into(), results)
    }
}

/// Builds the container described by `config`.
pub fn new_container<T: Copy + 'static>(
    config: ContainerConfig,
) -> SpatialResult<Box<dyn SpatialContainer<T>>> {
    Ok(match config {
        ContainerConfig::HashGrid(config) => Box::new(UniformHashGrid::new(config)?),
        ContainerConfig::LooseGrid(config) => Box::new(LooseGrid::new(config)?),
        ContainerConfig::KdTree(config) => Box::new(KdTree::new(config)),
        ContainerConfig::SphereTree(config) => Box::new(SphereTree::new(config)?),
    })
}
