//! A* shortest-path search.

use std::collections::BinaryHeap;

use log::{debug, trace};
use tilenav_core::{Point, Terrain};

use crate::Navigator;
use crate::error::PathError;
use crate::navigator::{NodeRef, UNREACHABLE};
use crate::traits::{AstarPather, GridPather};

/// A route found by A*.
///
/// `cells` runs from the first step after the start up to and including the
/// target; the start itself is not listed. A search whose start equals its
/// target yields an empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
    expanded: usize,
}

impl Path {
    /// The steps to take, in order.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Total movement cost: the sum of every step's cost.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of cells the search closed to find this path.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The last cell, or `None` for an empty path.
    pub fn target(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl Navigator {
    /// Find a least-cost path over `terrain` from `start` to `target`.
    ///
    /// Steps follow the corner-cut-safe neighbourhood and cost 10 straight or
    /// 14 diagonal. Traversability is read fresh from `terrain` on every call.
    /// `start` need not be traversible itself; a blocked `target` is
    /// [`PathError::Unreachable`].
    ///
    /// The navigator adopts `terrain.bounds()` first, so points are checked
    /// against the terrain and a point outside it is [`PathError::OutOfBounds`].
    pub fn find_path<T: Terrain + ?Sized>(
        &mut self,
        terrain: &T,
        start: Point,
        target: Point,
    ) -> Result<Path, PathError> {
        self.fit_to(terrain.bounds());
        self.checked_idx(start)?;
        self.checked_idx(target)?;
        if start != target && !terrain.is_traversible(target) {
            debug!("[astar] target {target} is blocked");
            return Err(PathError::Unreachable);
        }
        self.astar_path(&GridPather::new(terrain), start, target)
    }

    /// Run A* with an arbitrary movement model.
    ///
    /// Same contract as [`find_path`](Self::find_path); the pather decides
    /// neighbours, step costs and the heuristic. The search stays inside the
    /// navigator's own [`bounds`](Self::bounds).
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Point,
        target: Point,
    ) -> Result<Path, PathError> {
        let start_idx = self.checked_idx(start)?;
        let goal_idx = self.checked_idx(target)?;

        trace!("[astar] find_path: start={start} target={target}");

        if start_idx == goal_idx {
            return Ok(Path {
                cells: Vec::new(),
                cost: 0,
                expanded: 0,
            });
        }

        let cur_gen = self.next_generation();

        let start_h = pather.estimate(start, target);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = start_h;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
            node.closed = false;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: start_h,
            h: start_h,
            pos: start,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0;

        let outcome = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Err(PathError::Unreachable);
            };

            let ci = current.idx;

            // Skip entries superseded by a cheaper push.
            {
                let n = &self.nodes[ci];
                if n.generation != cur_gen || !n.open || current.f != n.g + n.h {
                    continue;
                }
            }

            self.nodes[ci].open = false;
            self.nodes[ci].closed = true;
            expanded += 1;

            if ci == goal_idx {
                break 'search Ok(());
            }
            if self.config.limit_reached(expanded) {
                break 'search Err(PathError::SearchLimit { expanded });
            }

            let current_g = self.nodes[ci].g;
            let current_point = current.pos;

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.generation != cur_gen {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                    n.open = false;
                    n.closed = false;
                } else if n.closed {
                    continue;
                }

                let tentative_g = current_g + pather.cost(current_point, np);
                if n.open && tentative_g >= n.g {
                    continue;
                }

                n.g = tentative_g;
                n.h = pather.estimate(np, target);
                n.parent = ci;
                n.open = true;

                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + n.h,
                    h: n.h,
                    pos: np,
                });
            }
        };

        self.nbuf = nbuf;

        if let Err(err) = outcome {
            debug!("[astar] no path {start} -> {target}: {err} ({expanded} cells expanded)");
            return Err(err);
        }

        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx {
            cells.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();

        Ok(Path {
            cells,
            cost: self.nodes[goal_idx].g,
            expanded,
        })
    }
}
