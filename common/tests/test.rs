use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_vec2_arithmetic() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(4.0, 6.0);
    assert_eq!(a + b, Vec2::new(5.0, 8.0));
    assert_eq!(b - a, Vec2::new(3.0, 4.0));
    assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    assert_eq!(a.distance_sq(b), 25.0);
    assert_eq!(a.distance(b), 5.0);
    assert_eq!(b.axis(0), 4.0);
    assert_eq!(b.axis(1), 6.0);
    assert_eq!((b - a).length(), 5.0);
    assert_eq!(Vec2::from((1.0, 2.0)), a);
}

#[test]
fn test_circle_overlap_is_strict() {
    let a = Circle::new(0.0, 0.0, 1.0);
    let touching = Circle::new(2.0, 0.0, 1.0);
    let overlapping = Circle::new(1.9, 0.0, 1.0);
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&overlapping));
    assert!(overlapping.overlaps(&a));
    // A non-positive combined radius overlaps nothing, not even a coincident circle.
    assert!(!circles_overlap(Vec2::ZERO, 1.0, Vec2::ZERO, -1.0));
    assert!(!circles_overlap(Vec2::ZERO, -3.0, Vec2::new(0.5, 0.0), 1.0));
}

#[test]
fn test_circle_bounding_box() {
    let circle = Circle::new(2.0, 3.0, 1.5);
    let bb = circle.bounding_box();
    assert_eq!(bb.bottom_left(), Vec2::new(0.5, 1.5));
    assert_eq!(bb.top_right(), Vec2::new(3.5, 4.5));
    assert_eq!(bb.width(), 3.0);
    assert_eq!(bb.height(), 3.0);
    assert_eq!(bb.center(), Vec2::new(2.0, 3.0));
}

#[test]
fn test_distance_to_point() {
    let bb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 6.0));
    assert_eq!(bb.distance_to_point(Vec2::new(2.0, 3.0)), 0.0);
    assert_eq!(bb.distance_to_point(Vec2::new(6.0, 3.0)), 4.0);
    assert_eq!(bb.distance_to_point(Vec2::new(2.0, 8.0)), 4.0);
    assert_eq!(bb.distance_to_point(Vec2::new(-3.0, -4.0)), 25.0);
}

#[test]
fn test_intersects_and_contains() {
    let bb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 6.0));
    assert!(bb.contains_point(Vec2::new(0.0, 0.0)));
    assert!(!bb.contains_point(Vec2::new(4.1, 3.0)));
    assert!(bb.intersects(&Aabb::new(Vec2::new(4.0, 6.0), Vec2::new(5.0, 7.0))));
    assert!(!bb.intersects(&Aabb::new(Vec2::new(4.5, 0.0), Vec2::new(5.0, 1.0))));
    assert!(bb.contains(&Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0))));
    assert!(!bb.contains(&Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(5.0, 2.0))));
}

#[test]
fn test_expand_to_include() {
    let mut bb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 6.0));
    let other = Aabb::new(Vec2::new(4.0, 4.0), Vec2::new(8.0, 6.0));
    bb.expand_to_include(&other);
    assert_eq!(bb.width(), 8.0);
    assert_eq!(bb.height(), 6.0);
    assert_eq!(bb.bottom_left(), Vec2::new(0.0, 0.0));
    assert_eq!(bb.top_right(), Vec2::new(8.0, 6.0));
}

#[test]
fn test_get_random_circle_coords_inside() {
    let bb = Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(5.0, 7.0));
    let radius = 1.0;

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..10 {
        let center = bb.get_random_circle_coords_inside(radius, &mut rng);
        assert!(bb.contains(&Aabb::from_circle(center, radius)));
    }
}

#[test]
fn test_get_random_circle_coords_inside_small_box() {
    let bb = Aabb::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
    let radius = 2.0;

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    let center = bb.get_random_circle_coords_inside(radius, &mut rng);
    // The generated coordinates should be clamped to the bottom-left of the box.
    assert_eq!(center.x, bb.min.x + radius + 1.0);
    assert_eq!(center.y, bb.min.y + radius + 1.0);
}
