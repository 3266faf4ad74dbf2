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

use crate::valid::envelope::Envelope;
use crate::valid::geometry::Coord;
use crate::valid::predicates::{orientation_index, Direction};

/// Location of a point relative to an areal geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// PointLocator locates points relative to an areal geometry.
pub trait PointLocator {
    fn locate(&self, p: Coord) -> Location;
}

/// RingLocator locates points relative to a single closed ring.
#[derive(Debug, Clone, Copy)]
pub struct RingLocator<'a> {
    ring: &'a [Coord],
    envelope: Option<Envelope>,
}

impl<'a> RingLocator<'a> {
    pub fn new(ring: &'a [Coord]) -> Self {
        RingLocator {
            ring,
            envelope: Envelope::from_coords(ring),
        }
    }
}

impl<'a> PointLocator for RingLocator<'a> {
    fn locate(&self, p: Coord) -> Location {
        match self.envelope {
            Some(env) if env.contains_coord(p) => locate_point_in_ring(p, self.ring),
            _ => Location::Exterior,
        }
    }
}

/// locate_point_in_ring determines where p lies relative to the closed ring
/// by counting crossings of a ray extending from p in the positive x
/// direction. Points on the ring are on its Boundary.
pub fn locate_point_in_ring(p: Coord, ring: &[Coord]) -> Location {
    let mut counter = RayCrossingCounter::new(p);
    for w in ring.windows(2) {
        counter.count_segment(w[0], w[1]);
        if counter.on_segment {
            return Location::Boundary;
        }
    }
    counter.location()
}

struct RayCrossingCounter {
    p: Coord,
    crossings: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    fn new(p: Coord) -> Self {
        RayCrossingCounter {
            p,
            crossings: 0,
            on_segment: false,
        }
    }

    fn count_segment(&mut self, p1: Coord, p2: Coord) {
        let p = self.p;
        // Segments entirely to the left of the point cannot cross the ray.
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p == p2 {
            self.on_segment = true;
            return;
        }
        // Horizontal segment on the ray.
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= min_x && p.x <= max_x {
                self.on_segment = true;
            }
            return;
        }
        // Count segments straddling the ray, including the upper endpoint
        // but not the lower one so that vertices on the ray count once.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == Direction::Indeterminate {
                self.on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            if orient == Direction::CounterClockwise {
                self.crossings += 1;
            }
        }
    }

    fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valid::test_util::coords;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    #[test]
    fn test_locate_square() {
        let square = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let locator = RingLocator::new(&square);
        assert_eq!(locator.locate(c(5.0, 5.0)), Location::Interior);
        assert_eq!(locator.locate(c(0.0, 0.0)), Location::Boundary);
        assert_eq!(locator.locate(c(10.0, 5.0)), Location::Boundary);
        assert_eq!(locator.locate(c(5.0, 0.0)), Location::Boundary);
        assert_eq!(locator.locate(c(15.0, 5.0)), Location::Exterior);
        assert_eq!(locator.locate(c(-1.0, 5.0)), Location::Exterior);
    }

    #[test]
    fn test_locate_ray_through_vertices() {
        // A diamond whose left and right vertices lie on the ray from the
        // test points.
        let diamond = coords(&[(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0), (5.0, 0.0)]);
        assert_eq!(locate_point_in_ring(c(5.0, 5.0), &diamond), Location::Interior);
        assert_eq!(locate_point_in_ring(c(-5.0, 5.0), &diamond), Location::Exterior);
        assert_eq!(locate_point_in_ring(c(0.0, 5.0), &diamond), Location::Boundary);

        // A point level with a concave vertex.
        let notch = coords(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.0, 5.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        assert_eq!(locate_point_in_ring(c(2.0, 5.0), &notch), Location::Interior);
        assert_eq!(locate_point_in_ring(c(7.0, 6.0), &notch), Location::Interior);
        assert_eq!(locate_point_in_ring(c(5.0, 8.0), &notch), Location::Exterior);
    }

    #[test]
    fn test_locate_empty_ring() {
        let locator = RingLocator::new(&[]);
        assert_eq!(locator.locate(c(0.0, 0.0)), Location::Exterior);
    }
}
