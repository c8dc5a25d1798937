use crate::geom::Point;
use crate::grid::Terrain;

/// Append every in-bounds Moore neighbour of `p` to `buf`, regardless of
/// traversability.
pub fn push_neighbors<T: Terrain + ?Sized>(terrain: &T, p: Point, buf: &mut Vec<Point>) {
    let bounds = terrain.bounds();
    buf.extend(p.neighbors_8().into_iter().filter(|&n| bounds.contains(n)));
}

/// Append the neighbours of `p` a unit may step to without cutting a corner.
///
/// Each blocked neighbour vetoes itself. A blocked neighbour straight above
/// or below `p` also vetoes the whole row it sits on, and one straight left
/// or right of `p` vetoes its whole column, so no diagonal step ever squeezes
/// past the side of a wall.
pub fn push_traversible_neighbors<T: Terrain + ?Sized>(
    terrain: &T,
    p: Point,
    buf: &mut Vec<Point>,
) {
    let bounds = terrain.bounds();
    let mut around = [Point::default(); 8];
    let mut count = 0;
    for n in p.neighbors_8() {
        if bounds.contains(n) {
            around[count] = n;
            count += 1;
        }
    }
    let around = &around[..count];

    let mut keep = [true; 8];
    for (i, &wall) in around.iter().enumerate() {
        if terrain.is_traversible(wall) {
            continue;
        }
        if wall.x == p.x {
            for (j, n) in around.iter().enumerate() {
                if n.y == wall.y {
                    keep[j] = false;
                }
            }
        } else if wall.y == p.y {
            for (j, n) in around.iter().enumerate() {
                if n.x == wall.x {
                    keep[j] = false;
                }
            }
        } else {
            keep[i] = false;
        }
    }

    buf.extend(
        around
            .iter()
            .zip(keep)
            .filter_map(|(&n, k)| k.then_some(n)),
    );
}
