use rand::Rng;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }

    // Component along an axis, 0 for x and anything else for y.
    #[inline(always)]
    pub fn axis(&self, axis: usize) -> f32 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }

    #[inline(always)]
    pub fn length_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline(always)]
    pub fn distance_sq(&self, other: Vec2) -> f32 {
        (*self - other).length_sq()
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        self.distance_sq(other).sqrt()
    }

    pub fn min(&self, other: Vec2) -> Vec2 {
        Vec2::new(f32::min(self.x, other.x), f32::min(self.y, other.y))
    }

    pub fn max(&self, other: Vec2) -> Vec2 {
        Vec2::new(f32::max(self.x, other.x), f32::max(self.y, other.y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }

    pub fn x(&self) -> f32 {
        self.center.x
    }

    pub fn y(&self) -> f32 {
        self.center.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_circle(self.center, self.radius)
    }

    // Strict intersection: circles that only touch do not overlap.
    pub fn overlaps(&self, other: &Circle) -> bool {
        circles_overlap(self.center, self.radius, other.center, other.radius)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center.distance_sq(point) <= self.radius * self.radius
    }
}

#[inline(always)]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let r = a_radius + b_radius;
    r > 0.0 && a.distance_sq(b) < r * r
}

/// Axis-aligned box stored as its bottom-left and top-right corners.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        let extent = Vec2::splat(radius);
        Self {
            min: center - extent,
            max: center + extent,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.min
    }

    pub fn top_right(&self) -> Vec2 {
        self.max
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    // Squared distance from the point to the nearest point of the box.
    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        let dx = f32::max(f32::max(self.min.x - point.x, point.x - self.max.x), 0.0);
        let dy = f32::max(f32::max(self.min.y - point.y, point.y - self.max.y), 0.0);
        dx * dx + dy * dy
    }

    pub fn expand_to_include(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn get_random_circle_coords_inside<R: Rng>(&self, radius: f32, rng: &mut R) -> Vec2 {
        // Increase radius by 1 in calculations to add a minimal margin.
        let radius = radius + 1.0;
        Vec2::new(
            self._safe_randf32(rng, self.min.x + radius, self.max.x - radius),
            self._safe_randf32(rng, self.min.y + radius, self.max.y - radius),
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min > max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}
