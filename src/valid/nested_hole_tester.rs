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

use crate::valid::error::ValidityResult;
use crate::valid::geometry::{Coord, Polygon};
use crate::valid::topology_analyzer::is_ring_nested;

/// NestedHoleTester tests whether any hole of a polygon lies inside another
/// of its holes.
///
/// The holes are assumed not to cross each other, so a nested hole is
/// recognised from a single segment of it.
#[derive(Debug, Clone, Copy)]
pub struct NestedHoleTester {
    nested_point: Option<Coord>,
}

impl NestedHoleTester {
    pub fn new(polygon: &Polygon) -> ValidityResult<Self> {
        let holes: Vec<_> = polygon
            .interiors()
            .iter()
            .filter_map(|h| h.envelope().map(|env| (h.coords(), env)))
            .collect();

        for (i, (hole, hole_env)) in holes.iter().enumerate() {
            for (j, (other, other_env)) in holes.iter().enumerate() {
                if i == j || !other_env.covers(hole_env) {
                    continue;
                }
                if is_ring_nested(hole, other)? {
                    return Ok(NestedHoleTester {
                        nested_point: Some(hole[0]),
                    });
                }
            }
        }
        Ok(NestedHoleTester { nested_point: None })
    }

    pub fn is_nested(&self) -> bool {
        self.nested_point.is_some()
    }

    /// Returns a point of a hole found inside another hole.
    pub fn nested_point(&self) -> Option<Coord> {
        self.nested_point
    }
}
