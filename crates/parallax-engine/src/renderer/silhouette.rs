use glam::DVec2;

/// Five-pointed star outline as percentages of its bounding box,
/// clockwise from the top tip.
pub const STAR_POINTS_PERCENT: [(f64, f64); 10] = [
    (50.0, 0.0),
    (61.0, 35.0),
    (98.0, 35.0),
    (68.0, 57.0),
    (79.0, 91.0),
    (50.0, 70.0),
    (21.0, 91.0),
    (32.0, 57.0),
    (2.0, 35.0),
    (39.0, 35.0),
];

/// Star outline for a marker of `radius` centred on `center`.
/// The outline fills a `2 * radius` square box, y down.
pub fn star_outline(center: DVec2, radius: f64) -> [DVec2; 10] {
    let top_left = center - DVec2::splat(radius);
    let side = 2.0 * radius;
    STAR_POINTS_PERCENT.map(|(px, py)| top_left + DVec2::new(px, py) * side / 100.0)
}
