use crate::config::KdTreeConfig;
use crate::container::SpatialContainer;
use crate::layer::LayerMask;
use crate::types::Entry;
use common::shapes::Vec2;
use log::trace;
use smallvec::SmallVec;

// Child slot value meaning "no child". The root sits at index 0 and is never
// anyone's child.
const NO_CHILD: u32 = 0;

type NodeStack = SmallVec<[(u32, u32); 64]>;

#[derive(Clone, Copy)]
struct KdNode<T> {
    entry: Entry<T>,
    left: u32,
    right: u32,
}

/// Unbalanced 2D KD-tree; the split axis alternates with depth, x first.
///
/// Nothing rebalances the tree, so its depth only depends on insertion order
/// and sorted input degrades to a list. That is fine for an index rebuilt
/// every epoch.
pub struct KdTree<T> {
    nodes: Vec<KdNode<T>>,
    biggest_radius: f32,
    depth: u32,
}

impl<T: Copy> KdTree<T> {
    pub fn new(config: KdTreeConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.initial_capacity),
            biggest_radius: 0.0,
            depth: 0,
        }
    }

    /// Number of levels, 0 for an empty tree.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn biggest_radius(&self) -> f32 {
        self.biggest_radius
    }

    fn push_node(&mut self, entry: Entry<T>) -> u32 {
        if self.nodes.len() == self.nodes.capacity() {
            trace!("kd-tree node storage growing past {}", self.nodes.capacity());
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            entry,
            left: NO_CHILD,
            right: NO_CHILD,
        });
        index
    }

    /// Appends the data of every entry whose center lies within `radius` of
    /// `target` (inclusive) and whose mask intersects `layer_mask`. Entry radii
    /// are ignored. A far subtree is only entered when its split plane lies
    /// strictly closer than `radius`, so centers exactly `radius` away across
    /// a split plane are skipped. Results come in tree order.
    pub fn range_search(&self, target: Vec2, radius: f32, layer_mask: LayerMask, results: &mut Vec<T>) {
        if self.nodes.is_empty() {
            return;
        }
        let radius_sq = radius * radius;
        let mut stack: NodeStack = SmallVec::new();
        stack.push((0, 0));
        while let Some((index, depth)) = stack.pop() {
            let node = &self.nodes[index as usize];
            let entry = &node.entry;
            if entry.layer_mask.intersects(layer_mask)
                && entry.position.distance_sq(target) <= radius_sq
            {
                results.push(entry.data);
            }

            let axis = (depth % 2) as usize;
            let delta = target.axis(axis) - entry.position.axis(axis);
            let (near, far) = if delta < 0.0 {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            if far != NO_CHILD && delta.abs() < radius {
                stack.push((far, depth + 1));
            }
            if near != NO_CHILD {
                stack.push((near, depth + 1));
            }
        }
    }
}

impl<T: Copy> SpatialContainer<T> for KdTree<T> {
    fn clear(&mut self) {
        self.nodes.clear();
        self.biggest_radius = 0.0;
        self.depth = 0;
    }

    fn insert(&mut self, data: T, position: Vec2, radius: f32, layer_mask: LayerMask) {
        let entry = Entry::new(data, position, radius, layer_mask);
        if radius > self.biggest_radius {
            self.biggest_radius = radius;
        }
        if self.nodes.is_empty() {
            self.push_node(entry);
            self.depth = 1;
            return;
        }

        // Walk by index: pushing a node may reallocate the storage.
        let mut index = 0usize;
        let mut depth = 0u32;
        loop {
            let node = self.nodes[index];
            let axis = (depth % 2) as usize;
            let go_left = position.axis(axis) - node.entry.position.axis(axis) < 0.0;
            let child = if go_left { node.left } else { node.right };
            if child != NO_CHILD {
                index = child as usize;
                depth += 1;
                continue;
            }
            let new_index = self.push_node(entry);
            let parent = &mut self.nodes[index];
            if go_left {
                parent.left = new_index;
            } else {
                parent.right = new_index;
            }
            self.depth = self.depth.max(depth + 2);
            return;
        }
    }

    fn for_each_overlap(
        &self,
        position: Vec2,
        radius: f32,
        layer_mask: LayerMask,
        f: &mut dyn FnMut(&Entry<T>, f32),
    ) {
        if self.nodes.is_empty() || layer_mask.is_empty() {
            return;
        }
        // Split planes go through entry centers, so a far subtree can still
        // hold a wide entry whose body crosses back over the plane.
        let reach = radius + self.biggest_radius;
        let mut stack: NodeStack = SmallVec::new();
        stack.push((0, 0));
        while let Some((index, depth)) = stack.pop() {
            let node = &self.nodes[index as usize];
            if let Some(distance_sq) = node.entry.hit(position, radius, layer_mask) {
                f(&node.entry, distance_sq);
            }

            let axis = (depth % 2) as usize;
            let delta = position.axis(axis) - node.entry.position.axis(axis);
            let (near, far) = if delta < 0.0 {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            if far != NO_CHILD && delta.abs() < reach {
                stack.push((far, depth + 1));
            }
            if near != NO_CHILD {
                stack.push((near, depth + 1));
            }
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
