use crate::config::SphereTreeConfig;
use crate::container::SpatialContainer;
use crate::error::{SpatialError, SpatialResult};
use crate::layer::LayerMask;
use crate::types::Entry;
use common::shapes::Vec2;
use log::{debug, trace};
use smallvec::SmallVec;
use std::f32::consts::SQRT_2;

const NO_CHILD: u32 = 0;

// Child center direction per quadrant; bit 0 is "x >= center.x", bit 1 is
// "y >= center.y".
const QUADRANT_OFFSETS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

type NodeStack = SmallVec<[u32; 64]>;

struct SphereNode<T> {
    center: Vec2,
    // Bounding circle of the node's square, halves at every level.
    radius: f32,
    // Distance from center covering every entry stored below, grown on insert.
    reach: f32,
    depth: u32,
    payload: Option<Entry<T>>,
    children: [u32; 4],
    is_leaf: bool,
}

impl<T> SphereNode<T> {
    fn new(center: Vec2, radius: f32, depth: u32) -> Self {
        Self {
            center,
            radius,
            reach: radius,
            depth,
            payload: None,
            children: [NO_CHILD; 4],
            is_leaf: true,
        }
    }
}

#[inline(always)]
fn quadrant_of(center: Vec2, position: Vec2) -> usize {
    (position.x >= center.x) as usize | ((position.y >= center.y) as usize) << 1
}

/// Quadtree of bounding circles.
///
/// Inserts always descend to a terminal leaf (one that may not subdivide any
/// further) and each leaf keeps a single payload: a second entry routed to the
/// same leaf replaces the first. Suited to clustered data where one
/// representative per smallest region is enough.
pub struct SphereTree<T> {
    nodes: Vec<SphereNode<T>>,
    config: SphereTreeConfig,
    len: usize,
}

impl<T: Copy> SphereTree<T> {
    pub fn new(config: SphereTreeConfig) -> SpatialResult<Self> {
        if !(config.radius.is_finite() && config.radius > 0.0 && config.center.is_finite()) {
            return Err(SpatialError::InvalidRootRadius {
                radius: config.radius,
            });
        }
        if !(config.max_radius.is_finite() && config.max_radius >= 0.0) {
            return Err(SpatialError::InvalidMaxRadius {
                max_radius: config.max_radius,
            });
        }
        if config.max_depth > SphereTreeConfig::DEPTH_LIMIT {
            return Err(SpatialError::InvalidMaxDepth {
                max_depth: config.max_depth,
                limit: SphereTreeConfig::DEPTH_LIMIT,
            });
        }
        debug!(
            "sphere tree: root radius {} at ({}, {}), max depth {}, max radius {}",
            config.radius, config.center.x, config.center.y, config.max_depth, config.max_radius
        );
        let mut nodes = Vec::with_capacity(config.initial_capacity.max(1));
        nodes.push(SphereNode::new(config.center, config.radius, 0));
        Ok(Self { nodes, config, len: 0 })
    }

    pub fn config(&self) -> &SphereTreeConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Creates the quadrant child of `parent` and links it in. Returns its index.
    fn push_child(&mut self, parent: usize, quadrant: usize) -> usize {
        let (center, radius, depth) = {
            let node = &self.nodes[parent];
            (node.center, node.radius, node.depth)
        };
        let (dx, dy) = QUADRANT_OFFSETS[quadrant];
        // Half the side of the child square.
        let offset = radius / (2.0 * SQRT_2);
        let child_center = center + Vec2::new(dx, dy) * offset;
        if self.nodes.len() == self.nodes.capacity() {
            trace!("sphere tree node storage growing past {}", self.nodes.capacity());
        }
        let index = self.nodes.len();
        self.nodes
            .push(SphereNode::new(child_center, radius * 0.5, depth + 1));
        // Fetch the parent again, the push may have moved it.
        self.nodes[parent].children[quadrant] = index as u32;
        index
    }
}

impl<T: Copy> SpatialContainer<T> for SphereTree<T> {
    fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0] = SphereNode::new(self.config.center, self.config.radius, 0);
        self.len = 0;
    }

    fn insert(&mut self, data: T, position: Vec2, radius: f32, layer_mask: LayerMask) {
        let entry = Entry::new(data, position, radius, layer_mask);
        let mut index = 0usize;
        loop {
            let node = &mut self.nodes[index];
            let extent = node.center.distance(position) + entry.radius;
            if extent > node.reach {
                node.reach = extent;
            }

            if node.is_leaf {
                let can_split = node.depth < self.config.max_depth
                    && node.radius * 0.5 >= self.config.max_radius;
                if !can_split {
                    if node.payload.replace(entry).is_some() {
                        trace!(
                            "sphere tree leaf at depth {} overwritten by entry at ({}, {})",
                            node.depth,
                            position.x,
                            position.y
                        );
                    } else {
                        self.len += 1;
                    }
                    return;
                }
                node.is_leaf = false;
            }

            let quadrant = quadrant_of(node.center, position);
            let child = node.children[quadrant];
            index = if child != NO_CHILD {
                child as usize
            } else {
                self.push_child(index, quadrant)
            };
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
        let mut stack: NodeStack = SmallVec::new();
        stack.push(0);
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            let bound = node.reach + radius;
            if node.center.distance_sq(position) > bound * bound {
                continue;
            }
            if node.is_leaf {
                if let Some(entry) = &node.payload {
                    if let Some(distance_sq) = entry.hit(position, radius, layer_mask) {
                        f(entry, distance_sq);
                    }
                }
                continue;
            }
            for &child in &node.children {
                if child != NO_CHILD {
                    stack.push(child);
                }
            }
        }
    }

    /// Number of occupied leaves; overwritten entries are not counted.
    fn len(&self) -> usize {
        self.len
    }
}
