use crate::config::HashGridConfig;
use crate::container::SpatialContainer;
use crate::error::{validate_cell_size, SpatialError, SpatialResult};
use crate::layer::LayerMask;
use crate::types::{clamped_cell_span, Entry};
use common::shapes::Vec2;
use log::{debug, trace};

struct Cell<T> {
    entries: Vec<Entry<T>>,
    // OR of every member's mask, lets a query reject the whole cell.
    layer_mask: LayerMask,
}

impl<T> Cell<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            layer_mask: LayerMask::NONE,
        }
    }
}

/// Fixed-size uniform grid keyed by the cell containing each entry's center.
///
/// Works best when entries have similar radii: every query is widened by the
/// biggest radius inserted this epoch, so a single huge entry makes all
/// queries scan more cells. Entries whose center falls outside the grid are
/// dropped on insert.
pub struct UniformHashGrid<T> {
    cells: Vec<Cell<T>>,
    occupied: Vec<u32>,
    config: HashGridConfig,
    biggest_radius: f32,
    len: usize,
}

impl<T: Copy> UniformHashGrid<T> {
    pub fn new(config: HashGridConfig) -> SpatialResult<Self> {
        validate_cell_size(config.cell_size)?;
        if config.width == 0 || config.height == 0 {
            return Err(SpatialError::InvalidGridDims {
                width: config.width,
                height: config.height,
            });
        }
        let cell_count = config.width as usize * config.height as usize;
        debug!(
            "uniform hash grid: {}x{} cells of size {}",
            config.width, config.height, config.cell_size
        );
        Ok(Self {
            cells: (0..cell_count).map(|_| Cell::new()).collect(),
            occupied: Vec::new(),
            config,
            biggest_radius: 0.0,
            len: 0,
        })
    }

    pub fn config(&self) -> &HashGridConfig {
        &self.config
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.occupied.len()
    }

    /// Largest radius inserted since the last clear.
    pub fn biggest_radius(&self) -> f32 {
        self.biggest_radius
    }

    /// Linear index of the cell holding `position`, `None` outside the grid.
    #[inline(always)]
    pub fn cell_index(&self, position: Vec2) -> Option<usize> {
        let cx = (position.x / self.config.cell_size).floor();
        let cy = (position.y / self.config.cell_size).floor();
        if !(cx >= 0.0
            && cx < self.config.width as f32
            && cy >= 0.0
            && cy < self.config.height as f32)
        {
            return None;
        }
        Some(cx as usize + cy as usize * self.config.width as usize)
    }
}

impl<T: Copy> SpatialContainer<T> for UniformHashGrid<T> {
    fn clear(&mut self) {
        for &index in &self.occupied {
            let cell = &mut self.cells[index as usize];
            cell.entries.clear();
            cell.layer_mask = LayerMask::NONE;
        }
        self.occupied.clear();
        self.biggest_radius = 0.0;
        self.len = 0;
    }

    fn insert(&mut self, data: T, position: Vec2, radius: f32, layer_mask: LayerMask) {
        let Some(index) = self.cell_index(position) else {
            trace!(
                "hash grid dropped entry at ({}, {}) outside the grid",
                position.x,
                position.y
            );
            return;
        };
        let cell = &mut self.cells[index];
        if cell.entries.is_empty() {
            if cell.entries.capacity() == 0 {
                cell.entries.reserve(self.config.cell_capacity);
            }
            self.occupied.push(index as u32);
        }
        cell.entries.push(Entry::new(data, position, radius, layer_mask));
        cell.layer_mask |= layer_mask;
        if radius > self.biggest_radius {
            self.biggest_radius = radius;
        }
        self.len += 1;
    }

    fn for_each_overlap(
        &self,
        position: Vec2,
        radius: f32,
        layer_mask: LayerMask,
        f: &mut dyn FnMut(&Entry<T>, f32),
    ) {
        if self.len == 0 || layer_mask.is_empty() {
            return;
        }
        // An entry lives in the cell of its center, so widen by the biggest
        // radius to reach centers of wide entries in neighboring cells.
        let reach = radius + self.biggest_radius;
        let cell_size = self.config.cell_size;
        let Some((x0, x1)) = clamped_cell_span(
            position.x - reach,
            position.x + reach,
            cell_size,
            self.config.width,
        ) else {
            return;
        };
        let Some((y0, y1)) = clamped_cell_span(
            position.y - reach,
            position.y + reach,
            cell_size,
            self.config.height,
        ) else {
            return;
        };

        let width = self.config.width as usize;
        for cy in y0..=y1 {
            let row = cy as usize * width;
            for cx in x0..=x1 {
                let cell = &self.cells[row + cx as usize];
                if !cell.layer_mask.intersects(layer_mask) {
                    continue;
                }
                for entry in &cell.entries {
                    if let Some(distance_sq) = entry.hit(position, radius, layer_mask) {
                        f(entry, distance_sq);
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
