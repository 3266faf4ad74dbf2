// Copyright 2024 The polyvalid Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Predicates on the corners formed by ring edges meeting at a node.
//!
//! Edges are ordered by the angle they make with the positive x-axis,
//! measured counter-clockwise from the node. Angles are compared by
//! quadrant first and by orientation within a quadrant, so no
//! trigonometry or rounding is involved.

use std::cmp::Ordering;

use crate::valid::geometry::Coord;
use crate::valid::predicates::{orientation_index, Direction};

/// Quadrant of the plane around an origin, numbered counter-clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quadrant {
    NorthEast = 0,
    NorthWest = 1,
    SouthWest = 2,
    SouthEast = 3,
}

/// quadrant returns the quadrant of the direction origin -> p. The positive
/// axes belong to the quadrant counter-clockwise of them, except that the
/// negative y-axis belongs to SouthEast. A zero vector is treated as
/// NorthEast.
pub fn quadrant(origin: Coord, p: Coord) -> Quadrant {
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    if dx >= 0.0 {
        if dy >= 0.0 {
            Quadrant::NorthEast
        } else {
            Quadrant::SouthEast
        }
    } else if dy >= 0.0 {
        Quadrant::NorthWest
    } else {
        Quadrant::SouthWest
    }
}

/// compare_angle compares the angles of origin -> p and origin -> q.
pub fn compare_angle(origin: Coord, p: Coord, q: Coord) -> Ordering {
    match quadrant(origin, p).cmp(&quadrant(origin, q)) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match orientation_index(origin, q, p) {
        Direction::CounterClockwise => Ordering::Greater,
        Direction::Clockwise => Ordering::Less,
        Direction::Indeterminate => Ordering::Equal,
    }
}

fn is_angle_greater(origin: Coord, p: Coord, q: Coord) -> bool {
    compare_angle(origin, p, q) == Ordering::Greater
}

// compare_between reports whether p lies strictly between e0 and e1
// (Greater), strictly outside (Less), or on one of them (Equal). e0 is
// assumed to have the smaller angle.
fn compare_between(origin: Coord, p: Coord, e0: Coord, e1: Coord) -> Ordering {
    let comp0 = compare_angle(origin, p, e0);
    if comp0 == Ordering::Equal {
        return Ordering::Equal;
    }
    let comp1 = compare_angle(origin, p, e1);
    if comp1 == Ordering::Equal {
        return Ordering::Equal;
    }
    if comp0 == Ordering::Greater && comp1 == Ordering::Less {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

fn is_between(origin: Coord, p: Coord, e0: Coord, e1: Coord) -> bool {
    is_angle_greater(origin, p, e0) && !is_angle_greater(origin, p, e1)
}

/// is_crossing reports whether the corner a0-node-a1 and the corner
/// b0-node-b1 cross at the node, i.e. the b edges lie on opposite sides of
/// the a corner. Corners sharing an edge direction are not crossing.
pub fn is_crossing(node: Coord, a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> bool {
    let (a_lo, a_hi) = if is_angle_greater(node, a0, a1) {
        (a1, a0)
    } else {
        (a0, a1)
    };

    let between0 = compare_between(node, b0, a_lo, a_hi);
    if between0 == Ordering::Equal {
        return false;
    }
    let between1 = compare_between(node, b1, a_lo, a_hi);
    if between1 == Ordering::Equal {
        return false;
    }
    between0 != between1
}

/// is_interior_segment reports whether the segment node -> b lies in the
/// interior of the ring corner a0-node-a1, where a0 precedes the node along
/// the ring and the ring interior is on the right.
pub fn is_interior_segment(node: Coord, a0: Coord, a1: Coord, b: Coord) -> bool {
    let (a_lo, a_hi, interior_between) = if is_angle_greater(node, a0, a1) {
        (a1, a0, false)
    } else {
        (a0, a1, true)
    };
    is_between(node, b, a_lo, a_hi) == interior_between
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    const O: Coord = Coord { x: 0.0, y: 0.0 };

    #[test]
    fn test_quadrant() {
        assert_eq!(quadrant(O, c(1.0, 1.0)), Quadrant::NorthEast);
        assert_eq!(quadrant(O, c(-1.0, 1.0)), Quadrant::NorthWest);
        assert_eq!(quadrant(O, c(-1.0, -1.0)), Quadrant::SouthWest);
        assert_eq!(quadrant(O, c(1.0, -1.0)), Quadrant::SouthEast);
        assert_eq!(quadrant(O, c(1.0, 0.0)), Quadrant::NorthEast);
        assert_eq!(quadrant(O, c(0.0, -1.0)), Quadrant::SouthEast);
        assert_eq!(quadrant(O, O), Quadrant::NorthEast);
    }

    #[test]
    fn test_compare_angle() {
        assert_eq!(compare_angle(O, c(0.0, 1.0), c(1.0, 0.0)), Ordering::Greater);
        assert_eq!(compare_angle(O, c(1.0, 0.0), c(0.0, 1.0)), Ordering::Less);
        assert_eq!(compare_angle(O, c(1.0, 2.0), c(2.0, 1.0)), Ordering::Greater);
        assert_eq!(compare_angle(O, c(2.0, 2.0), c(1.0, 1.0)), Ordering::Equal);
        assert_eq!(compare_angle(O, c(1.0, -1.0), c(-1.0, -1.0)), Ordering::Greater);
    }

    #[test]
    fn test_crossing() {
        assert!(is_crossing(
            O,
            c(-1.0, 1.0),
            c(1.0, -1.0),
            c(1.0, 1.0),
            c(-1.0, -1.0)
        ));
    }

    #[test]
    fn test_touching_not_crossing() {
        // Two corners meeting at the node from above and below.
        assert!(!is_crossing(
            O,
            c(-1.0, 1.0),
            c(1.0, 1.0),
            c(-1.0, -1.0),
            c(1.0, -1.0)
        ));
        // Corners nested on the same side.
        assert!(!is_crossing(
            O,
            c(-2.0, 1.0),
            c(2.0, 1.0),
            c(-1.0, 2.0),
            c(1.0, 2.0)
        ));
    }

    #[test]
    fn test_shared_edge_not_crossing() {
        assert!(!is_crossing(
            O,
            c(-1.0, 1.0),
            c(1.0, -1.0),
            c(-2.0, 2.0),
            c(1.0, 1.0)
        ));
    }

    #[test]
    fn test_interior_segment() {
        // Corner of a clockwise square at the origin.
        let prev = c(10.0, 0.0);
        let next = c(0.0, 10.0);
        assert!(is_interior_segment(O, prev, next, c(5.0, 5.0)));
        assert!(!is_interior_segment(O, prev, next, c(-5.0, -5.0)));
        assert!(!is_interior_segment(O, prev, next, c(5.0, -1.0)));

        // Reflex corner: interior spans more than a half plane.
        let prev = c(0.0, 10.0);
        let next = c(10.0, 0.0);
        assert!(!is_interior_segment(O, prev, next, c(5.0, 5.0)));
        assert!(is_interior_segment(O, prev, next, c(-5.0, -5.0)));
    }
}
