mod cells;

use crate::config::LooseGridConfig;
use crate::container::SpatialContainer;
use crate::error::{validate_cell_size, validate_world_extent, SpatialError, SpatialResult};
use crate::layer::LayerMask;
use crate::types::{saturating_cell_span, Entry};
use cells::{LooseCell, TightCell, TightRect};
use common::shapes::{Aabb, Vec2};
use fxhash::FxHashSet;
use log::debug;
use std::cell::RefCell;

/// Loose/tight double grid for entries of widely varying radius.
///
/// Every entry goes into the coarse loose cell holding the bottom-left corner
/// of its bounding box, and that cell's bounds grow to cover it. A finer tight
/// grid keeps, per tight cell, the loose cells whose bounds reach it, so a
/// query only visits loose cells that can actually hold an overlapping entry.
///
/// Cell coordinates saturate at the grid edges: entries outside the configured
/// extent land in the border cells and stay queryable.
pub struct LooseGrid<T> {
    loose: Vec<LooseCell<T>>,
    tight: Vec<TightCell>,
    occupied: Vec<u32>,
    loose_width: u32,
    loose_height: u32,
    tight_width: u32,
    tight_height: u32,
    config: LooseGridConfig,
    len: usize,
    // Loose cells already scanned by the running query.
    visited: RefCell<FxHashSet<u32>>,
}

fn cells_across(extent: f32, cell_size: f32) -> u32 {
    ((extent / cell_size).ceil() as u32).max(1)
}

impl<T: Copy> LooseGrid<T> {
    pub fn new(config: LooseGridConfig) -> SpatialResult<Self> {
        validate_world_extent(config.width, config.height)?;
        validate_cell_size(config.cell_size)?;
        if !(config.tight_size.is_finite()
            && config.tight_size > 0.0
            && config.tight_size < config.cell_size)
        {
            return Err(SpatialError::InvalidTightSize {
                tight_size: config.tight_size,
                cell_size: config.cell_size,
            });
        }
        let loose_width = cells_across(config.width, config.cell_size);
        let loose_height = cells_across(config.height, config.cell_size);
        let tight_width = cells_across(config.width, config.tight_size);
        let tight_height = cells_across(config.height, config.tight_size);
        debug!(
            "loose grid: {}x{} loose cells of size {}, {}x{} tight cells of size {}",
            loose_width, loose_height, config.cell_size, tight_width, tight_height, config.tight_size
        );
        let loose_count = loose_width as usize * loose_height as usize;
        let tight_count = tight_width as usize * tight_height as usize;
        Ok(Self {
            loose: (0..loose_count).map(|_| LooseCell::new()).collect(),
            tight: (0..tight_count).map(|_| TightCell::default()).collect(),
            occupied: Vec::new(),
            loose_width,
            loose_height,
            tight_width,
            tight_height,
            config,
            len: 0,
            visited: RefCell::new(FxHashSet::default()),
        })
    }

    pub fn config(&self) -> &LooseGridConfig {
        &self.config
    }

    pub fn loose_dims(&self) -> (u32, u32) {
        (self.loose_width, self.loose_height)
    }

    pub fn tight_dims(&self) -> (u32, u32) {
        (self.tight_width, self.tight_height)
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.occupied.len()
    }

    /// Loose cell an entry with this center and radius is filed under.
    #[inline(always)]
    pub fn loose_index(&self, position: Vec2, radius: f32) -> usize {
        let corner = position - Vec2::splat(radius);
        let (x, _) = saturating_cell_span(corner.x, corner.x, self.config.cell_size, self.loose_width);
        let (y, _) = saturating_cell_span(corner.y, corner.y, self.config.cell_size, self.loose_height);
        x as usize + y as usize * self.loose_width as usize
    }

    /// Current bounds of a loose cell, `None` while it is empty.
    pub fn loose_bounds(&self, loose_index: usize) -> Option<Aabb> {
        self.loose
            .get(loose_index)
            .filter(|cell| !cell.entries.is_empty())
            .map(|cell| cell.bounds)
    }

    /// Loose cells registered in the tight cell covering `position`.
    pub fn tight_refs(&self, position: Vec2) -> &[u32] {
        let rect = self.tight_rect(&Aabb::new(position, position));
        &self.tight[self.tight_index(rect.x0, rect.y0)].loose_cells
    }

    #[inline(always)]
    fn tight_index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.tight_width as usize
    }

    #[inline(always)]
    fn tight_rect(&self, bounds: &Aabb) -> TightRect {
        let tight_size = self.config.tight_size;
        let (x0, x1) = saturating_cell_span(bounds.min.x, bounds.max.x, tight_size, self.tight_width);
        let (y0, y1) = saturating_cell_span(bounds.min.y, bounds.max.y, tight_size, self.tight_height);
        TightRect { x0, y0, x1, y1 }
    }

    // Registers the loose cell in every tight cell of `rect`. Returns how many
    // registrations were made.
    fn register_rect(&mut self, loose_index: u32, rect: TightRect, layer_mask: LayerMask) -> usize {
        for y in rect.y0..=rect.y1 {
            for x in rect.x0..=rect.x1 {
                let index = self.tight_index(x, y);
                let tight = &mut self.tight[index];
                tight.loose_cells.push(loose_index);
                tight.layer_mask |= layer_mask;
            }
        }
        ((rect.x1 - rect.x0 + 1) as usize) * ((rect.y1 - rect.y0 + 1) as usize)
    }

    // Adds the entry to a non-empty loose cell and grows its bounds and mask.
    // Returns the bounds after growth.
    fn expand_cell(&mut self, loose_index: usize, entry: Entry<T>) -> Aabb {
        let cell = &mut self.loose[loose_index];
        cell.bounds.expand_to_include(&entry.bounding_box());
        cell.layer_mask |= entry.layer_mask;
        cell.entries.push(entry);
        cell.bounds
    }

    /// Recomputes every loose cell's bounds from its entries and rebuilds all
    /// tight registrations from scratch.
    pub fn tighten_up(&mut self) {
        for tight in &mut self.tight {
            tight.reset();
        }
        let occupied = std::mem::take(&mut self.occupied);
        let mut registrations = 0usize;
        for &loose_index in &occupied {
            let cell = &mut self.loose[loose_index as usize];
            let Some(first) = cell.entries.first() else {
                continue;
            };
            let mut bounds = first.bounding_box();
            let mut layer_mask = LayerMask::NONE;
            for entry in &cell.entries {
                bounds.expand_to_include(&entry.bounding_box());
                layer_mask |= entry.layer_mask;
            }
            cell.bounds = bounds;
            cell.layer_mask = layer_mask;
            let rect = self.tight_rect(&bounds);
            registrations += self.register_rect(loose_index, rect, layer_mask);
        }
        debug!(
            "loose grid tightened {} cells into {} tight registrations",
            occupied.len(),
            registrations
        );
        self.occupied = occupied;
    }
}

impl<T: Copy> SpatialContainer<T> for LooseGrid<T> {
    fn clear(&mut self) {
        for &loose_index in &self.occupied {
            self.loose[loose_index as usize].reset();
        }
        self.occupied.clear();
        for tight in &mut self.tight {
            tight.reset();
        }
        self.len = 0;
    }

    fn insert(&mut self, data: T, position: Vec2, radius: f32, layer_mask: LayerMask) {
        let entry = Entry::new(data, position, radius, layer_mask);
        let entry_bounds = entry.bounding_box();
        let loose_index = self.loose_index(position, entry.radius);
        self.len += 1;

        let cell = &mut self.loose[loose_index];
        if cell.entries.is_empty() {
            cell.bounds = entry_bounds;
            cell.layer_mask = layer_mask;
            cell.entries.push(entry);
            self.occupied.push(loose_index as u32);
            let rect = self.tight_rect(&entry_bounds);
            self.register_rect(loose_index as u32, rect, layer_mask);
            return;
        }

        let old_bounds = cell.bounds;
        let old_mask = cell.layer_mask;
        let new_bounds = self.expand_cell(loose_index, entry);
        let new_mask = old_mask | layer_mask;
        let old_rect = self.tight_rect(&old_bounds);
        let new_rect = self.tight_rect(&new_bounds);
        let mask_grew = new_mask != old_mask;
        if old_rect == new_rect && !mask_grew {
            return;
        }

        // Tight cells already holding this loose cell only need the wider
        // mask; the newly covered ones get a registration.
        for y in new_rect.y0..=new_rect.y1 {
            for x in new_rect.x0..=new_rect.x1 {
                let already_registered = old_rect.contains(x, y);
                if already_registered && !mask_grew {
                    continue;
                }
                let index = self.tight_index(x, y);
                let tight = &mut self.tight[index];
                if !already_registered {
                    tight.loose_cells.push(loose_index as u32);
                }
                tight.layer_mask |= new_mask;
            }
        }
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
        let radius_sq = radius * radius;
        // A negative radius can still hit entries containing `position`.
        let rect = self.tight_rect(&Aabb::from_circle(position, radius.max(0.0)));
        // Taken rather than borrowed so a callback querying this grid again
        // gets its own set.
        let mut visited = self.visited.take();
        visited.clear();

        for y in rect.y0..=rect.y1 {
            for x in rect.x0..=rect.x1 {
                let tight = &self.tight[self.tight_index(x, y)];
                if !tight.layer_mask.intersects(layer_mask) {
                    continue;
                }
                for &loose_index in &tight.loose_cells {
                    if !visited.insert(loose_index) {
                        continue;
                    }
                    let cell = &self.loose[loose_index as usize];
                    if !cell.layer_mask.intersects(layer_mask)
                        || cell.bounds.distance_to_point(position) > radius_sq
                    {
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

        self.visited.replace(visited);
    }

    fn len(&self) -> usize {
        self.len
    }
}
