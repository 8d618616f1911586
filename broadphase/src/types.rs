use crate::layer::LayerMask;
use common::shapes::{Aabb, Vec2};

/// One circular entity inserted for the current epoch. Negative radii are
/// stored as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    pub data: T,
    pub position: Vec2,
    pub radius: f32,
    pub layer_mask: LayerMask,
}

impl<T: Copy> Entry<T> {
    pub fn new(data: T, position: Vec2, radius: f32, layer_mask: LayerMask) -> Self {
        Self {
            data,
            position,
            radius: radius.max(0.0),
            layer_mask,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_circle(self.position, self.radius)
    }

    /// Squared distance to `position` if this entry passes the layer test and
    /// its circle strictly overlaps the query circle.
    #[inline(always)]
    pub(crate) fn hit(&self, position: Vec2, radius: f32, layer_mask: LayerMask) -> Option<f32> {
        if !self.layer_mask.intersects(layer_mask) {
            return None;
        }
        let distance_sq = self.position.distance_sq(position);
        let reach = self.radius + radius;
        if reach > 0.0 && distance_sq < reach * reach {
            Some(distance_sq)
        } else {
            None
        }
    }
}

// Cell index range along one axis, clamped into `0..count`. `None` when the
// interval lies entirely outside the grid.
#[inline(always)]
pub(crate) fn clamped_cell_span(min: f32, max: f32, cell_size: f32, count: u32) -> Option<(u32, u32)> {
    let lo = (min / cell_size).floor();
    let hi = (max / cell_size).floor();
    let last = (count - 1) as f32;
    if !(hi >= 0.0 && lo <= last) {
        return None;
    }
    Some((lo.max(0.0) as u32, hi.min(last) as u32))
}

// Like `clamped_cell_span` but always lands inside the grid, for structures
// without fixed bounds.
#[inline(always)]
pub(crate) fn saturating_cell_span(min: f32, max: f32, cell_size: f32, count: u32) -> (u32, u32) {
    let last = (count - 1) as f32;
    let lo = (min / cell_size).floor().clamp(0.0, last);
    let hi = (max / cell_size).floor().clamp(0.0, last);
    (lo as u32, hi as u32)
}
