use tilenav_core::Point;

/// Cost of one diagonal step.
pub const DIAGONAL_COST: i32 = 14;
/// Cost of one horizontal or vertical step.
pub const STRAIGHT_COST: i32 = 10;

/// Octile distance: as many diagonal steps as the shorter axis allows, then
/// straight steps for the rest. Costs are scaled by 10 so that a diagonal
/// step (14) approximates √2 straight steps without floating point.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (long, short) = if dx > dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * short + STRAIGHT_COST * (long - short)
}

/// Chebyshev (L∞) distance: the number of 8-way steps on an open field.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
