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

//! Builders and fixtures shared by the unit tests.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::valid::geometry::{Coord, Geometry, LinearRing, Polygon};
use crate::valid::validity::{ErrorKind, ValidityChecker};

pub const SQUARE_PTS: &[(f64, f64)] = &[
    (0.0, 0.0),
    (10.0, 0.0),
    (10.0, 10.0),
    (0.0, 10.0),
    (0.0, 0.0),
];

lazy_static::lazy_static! {
    /// The 10 x 10 square with its lower left corner at the origin, counter-clockwise.
    pub static ref SQUARE: Vec<Coord> = coords(SQUARE_PTS);
    pub static ref SQUARE_POLYGON: Geometry = Geometry::Polygon(polygon(SQUARE_PTS, &[]));
}

/// coords converts (x, y) tuples to coordinates.
pub fn coords(pts: &[(f64, f64)]) -> Vec<Coord> {
    pts.iter().map(|&(x, y)| Coord { x, y }).collect()
}

pub fn ring(pts: &[(f64, f64)]) -> LinearRing {
    LinearRing(coords(pts))
}

/// polygon builds a polygon from a shell and any number of holes.
pub fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Polygon {
    Polygon::new(ring(shell), holes.iter().map(|h| ring(h)).collect())
}

/// shuffled returns the items in a random order drawn from rng.
pub fn shuffled<T, R: Rng>(rng: &mut R, mut items: Vec<T>) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// assert_invalid checks that the geometry fails validation with the given
/// kind, and at the given location when one is supplied.
pub fn assert_invalid(
    checker: ValidityChecker,
    geometry: &Geometry,
    kind: ErrorKind,
    location: Option<Coord>,
) {
    let got = checker
        .validation_error(geometry)
        .unwrap_or_else(|e| panic!("unexpected fault {} for {:?}", e, geometry));
    match got {
        Some(err) => {
            assert_eq!(
                err.kind(),
                kind,
                "wrong error kind for {:?}: got {}",
                geometry,
                err
            );
            if location.is_some() {
                assert_eq!(
                    err.location(),
                    location,
                    "wrong location for {:?}: got {}",
                    geometry,
                    err
                );
            }
        }
        None => panic!("expected {:?} but {:?} is valid", kind, geometry),
    }
}

/// assert_valid checks that the geometry passes validation.
pub fn assert_valid(checker: ValidityChecker, geometry: &Geometry) {
    let got = checker
        .validation_error(geometry)
        .unwrap_or_else(|e| panic!("unexpected fault {} for {:?}", e, geometry));
    assert!(got.is_none(), "expected {:?} to be valid, got {:?}", geometry, got);
}
