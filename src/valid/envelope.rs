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

use crate::valid::geometry::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Envelope is the axis-aligned bounding rectangle of a set of coordinates.
/// An empty coordinate set has no envelope, so constructors return Option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Returns the envelope of the segment (or point pair) p0, p1.
    pub fn of_segment(p0: Coord, p1: Coord) -> Self {
        Envelope {
            min_x: p0.x.min(p1.x),
            min_y: p0.y.min(p1.y),
            max_x: p0.x.max(p1.x),
            max_y: p0.y.max(p1.y),
        }
    }

    /// Returns the envelope of the given coordinates, or None if there are none.
    pub fn from_coords(coords: &[Coord]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut env = Envelope::of_segment(*first, *first);
        for c in rest {
            env.expand_to_include(*c);
        }
        Some(env)
    }

    pub fn expand_to_include(&mut self, c: Coord) {
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }

    /// intersects reports whether the two envelopes share at least one point.
    pub fn intersects(&self, o: &Envelope) -> bool {
        !(o.min_x > self.max_x
            || o.max_x < self.min_x
            || o.min_y > self.max_y
            || o.max_y < self.min_y)
    }

    /// contains_coord reports whether c lies inside or on the boundary of this envelope.
    pub fn contains_coord(&self, c: Coord) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// covers reports whether every point of o lies in this envelope.
    pub fn covers(&self, o: &Envelope) -> bool {
        o.min_x >= self.min_x
            && o.max_x <= self.max_x
            && o.min_y >= self.min_y
            && o.max_y <= self.max_y
    }

    /// Returns the intersection of two envelopes, or None if they are disjoint.
    pub fn intersection(&self, o: &Envelope) -> Option<Envelope> {
        if !self.intersects(o) {
            return None;
        }
        Some(Envelope {
            min_x: self.min_x.max(o.min_x),
            min_y: self.min_y.max(o.min_y),
            max_x: self.max_x.min(o.max_x),
            max_y: self.max_y.min(o.max_y),
        })
    }

    /// Clamps c to lie inside this envelope.
    pub fn clamp(&self, c: Coord) -> Coord {
        Coord {
            x: c.x.max(self.min_x).min(self.max_x),
            y: c.y.max(self.min_y).min(self.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    #[test]
    fn test_from_coords() {
        assert_eq!(Envelope::from_coords(&[]), None);

        let env = Envelope::from_coords(&[c(1.0, 5.0), c(-2.0, 3.0), c(4.0, -1.0)]).unwrap();
        assert_eq!(
            env,
            Envelope {
                min_x: -2.0,
                min_y: -1.0,
                max_x: 4.0,
                max_y: 5.0
            }
        );
    }

    #[test]
    fn test_covers_and_intersects() {
        let big = Envelope::of_segment(c(0.0, 0.0), c(10.0, 10.0));
        let small = Envelope::of_segment(c(2.0, 2.0), c(4.0, 4.0));
        let edge = Envelope::of_segment(c(10.0, 0.0), c(20.0, 5.0));
        let far = Envelope::of_segment(c(11.0, 11.0), c(12.0, 12.0));

        assert!(big.covers(&small));
        assert!(!small.covers(&big));
        assert!(big.covers(&big), "an envelope covers itself");

        assert!(big.intersects(&edge), "envelopes sharing an edge intersect");
        assert!(!big.intersects(&far));
        assert!(!big.covers(&edge));
    }

    #[test]
    fn test_intersection_and_clamp() {
        let a = Envelope::of_segment(c(0.0, 0.0), c(10.0, 10.0));
        let b = Envelope::of_segment(c(5.0, -5.0), c(15.0, 5.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Envelope::of_segment(c(5.0, 0.0), c(10.0, 5.0)));

        assert_eq!(i.clamp(c(20.0, -3.0)), c(10.0, 0.0));
        assert_eq!(i.clamp(c(7.0, 2.0)), c(7.0, 2.0));

        let far = Envelope::of_segment(c(20.0, 20.0), c(30.0, 30.0));
        assert_eq!(a.intersection(&far), None);
    }
}
