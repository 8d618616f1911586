use crate::layer::LayerMask;
use crate::types::Entry;
use common::shapes::Aabb;

pub(crate) struct LooseCell<T> {
    // Grows with every insert, only `tighten_up` shrinks it.
    pub(crate) bounds: Aabb,
    pub(crate) entries: Vec<Entry<T>>,
    pub(crate) layer_mask: LayerMask,
}

impl<T> LooseCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            bounds: Aabb::default(),
            entries: Vec::new(),
            layer_mask: LayerMask::NONE,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.bounds = Aabb::default();
        self.entries.clear();
        self.layer_mask = LayerMask::NONE;
    }
}

#[derive(Default)]
pub(crate) struct TightCell {
    // Loose cells whose bounds overlap this cell, each listed once.
    pub(crate) loose_cells: Vec<u32>,
    pub(crate) layer_mask: LayerMask,
}

impl TightCell {
    pub(crate) fn reset(&mut self) {
        self.loose_cells.clear();
        self.layer_mask = LayerMask::NONE;
    }
}

/// Inclusive rectangle of tight cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TightRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl TightRect {
    #[inline(always)]
    pub(crate) fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}
