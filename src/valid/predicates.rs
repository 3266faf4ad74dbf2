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

//! Robust planar orientation predicates.
//!
//! The orientation of three points is first evaluated in floating point
//! with a forward error bound; only when the result is too close to zero to
//! be trusted is it recomputed exactly with arbitrary precision decimals.

use bigdecimal::BigDecimal;

use crate::valid::geometry::Coord;

// Relative error bound of the floating point determinant filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Direction is an indication of the ordering of a set of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    Indeterminate,
    CounterClockwise,
}

impl Direction {
    fn from_sign(sign: f64) -> Direction {
        if sign > 0.0 {
            Direction::CounterClockwise
        } else if sign < 0.0 {
            Direction::Clockwise
        } else {
            Direction::Indeterminate
        }
    }

    /// reverse returns the direction seen from the other side of the plane.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::Indeterminate => Direction::Indeterminate,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Clockwise => write!(f, "Clockwise"),
            Direction::Indeterminate => write!(f, "Indeterminate"),
            Direction::CounterClockwise => write!(f, "CounterClockwise"),
        }
    }
}

/// orientation_index returns the orientation of q relative to the directed
/// segment p1 -> p2: CounterClockwise if q lies to its left, Clockwise if it
/// lies to its right, Indeterminate if the three points are collinear.
///
/// The result is exact for all finite inputs.
pub fn orientation_index(p1: Coord, p2: Coord, q: Coord) -> Direction {
    if let Some(dir) = orientation_index_filter(p1, p2, q) {
        return dir;
    }
    exact_orientation(p1, p2, q)
}

// orientation_index_filter evaluates the determinant in floating point and
// returns None if its sign cannot be trusted.
fn orientation_index_filter(pa: Coord, pb: Coord, pc: Coord) -> Option<Direction> {
    let det_left = (pa.x - pc.x) * (pb.y - pc.y);
    let det_right = (pa.y - pc.y) * (pb.x - pc.x);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return Some(Direction::from_sign(det));
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return Some(Direction::from_sign(det));
        }
        -det_left - det_right
    } else {
        return Some(Direction::from_sign(det));
    };

    let err_bound = DP_SAFE_EPSILON * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Some(Direction::from_sign(det));
    }
    None
}

// exact_orientation computes the sign of the orientation determinant with
// no rounding. Every finite f64 is an integer multiple of a power of two, so
// all six ordinates are scaled by the smallest such power to become
// integers, which leaves the sign of the determinant unchanged.
fn exact_orientation(pa: Coord, pb: Coord, pc: Coord) -> Direction {
    let ords = [pa.x, pa.y, pb.x, pb.y, pc.x, pc.y];
    if ords.iter().any(|v| !v.is_finite()) {
        return Direction::Indeterminate;
    }

    let decoded: Vec<(i64, i32)> = ords.iter().map(|v| decode(*v)).collect();
    let min_exp = decoded
        .iter()
        .filter(|(m, _)| *m != 0)
        .map(|(_, e)| *e)
        .min()
        .unwrap_or(0);
    let exact: Vec<BigDecimal> = decoded
        .iter()
        .map(|(m, e)| {
            if *m == 0 {
                BigDecimal::from(0i64)
            } else {
                BigDecimal::from(*m) * pow2((*e - min_exp) as u32)
            }
        })
        .collect();

    let (ax, ay, bx, by, cx, cy) = (
        &exact[0], &exact[1], &exact[2], &exact[3], &exact[4], &exact[5],
    );
    let det_left = (ax.clone() - cx.clone()) * (by.clone() - cy.clone());
    let det_right = (ay.clone() - cy.clone()) * (bx.clone() - cx.clone());
    let det = det_left - det_right;

    let zero = BigDecimal::from(0i64);
    if det > zero {
        Direction::CounterClockwise
    } else if det < zero {
        Direction::Clockwise
    } else {
        Direction::Indeterminate
    }
}

// decode splits a finite f64 into (mantissa, exponent) with
// v == mantissa * 2^exponent.
fn decode(v: f64) -> (i64, i32) {
    let bits = v.to_bits();
    let sign: i64 = if bits >> 63 == 0 { 1 } else { -1 };
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = if exponent == 0 {
        (bits & 0xf_ffff_ffff_ffff) << 1
    } else {
        (bits & 0xf_ffff_ffff_ffff) | 0x10_0000_0000_0000
    };
    (sign * mantissa as i64, exponent - 1075)
}

fn pow2(mut n: u32) -> BigDecimal {
    let mut result = BigDecimal::from(1i64);
    let mut base = BigDecimal::from(2i64);
    while n > 0 {
        if n & 1 == 1 {
            result = result * base.clone();
        }
        n >>= 1;
        if n > 0 {
            base = base.clone() * base;
        }
    }
    result
}

/// is_ccw reports whether a closed ring is oriented counter-clockwise.
///
/// The test looks at the topmost vertex (the last one reached by an upward
/// segment) and the edges around it, so it is correct for rings with
/// repeated points and for self-touching rings. Rings with fewer than three
/// distinct vertices, or which are flat, are reported as not CCW.
pub fn is_ccw(ring: &[Coord]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    // Number of distinct positions, excluding the closing point.
    let n_pts = ring.len() - 1;

    let mut up_hi = ring[0];
    let mut up_low: Option<Coord> = None;
    let mut i_up_hi = 0;
    let mut prev_y = up_hi.y;
    for (i, p) in ring.iter().enumerate().take(n_pts + 1).skip(1) {
        if p.y > prev_y && p.y >= up_hi.y {
            up_hi = *p;
            i_up_hi = i;
            up_low = Some(ring[i - 1]);
        }
        prev_y = p.y;
    }
    let up_low = match up_low {
        Some(c) if i_up_hi != 0 => c,
        _ => return false,
    };

    // Find the next lower point after the high point, skipping a flat top.
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n_pts;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi.y {
            break;
        }
    }
    let down_low = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 {
        i_down_low - 1
    } else {
        n_pts - 1
    };
    let down_hi = ring[i_down_hi];

    if up_hi == down_hi {
        // The top is a single vertex, so the orientation of the two edges
        // at it gives the ring orientation.
        if up_low == up_hi || down_low == up_hi || up_low == down_low {
            return false;
        }
        orientation_index(up_low, up_hi, down_low) == Direction::CounterClockwise
    } else {
        // The top is a flat segment, whose direction gives the orientation.
        down_hi.x - up_hi.x < 0.0
    }
}
