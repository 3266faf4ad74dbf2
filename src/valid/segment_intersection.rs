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

use cgmath::Vector2;

use crate::valid::envelope::Envelope;
use crate::valid::geometry::Coord;
use crate::valid::predicates::{orientation_index, Direction};

/// SegmentIntersection describes how two closed segments meet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegmentIntersection {
    /// The segments are disjoint.
    None,
    /// The segments meet in a single point. proper is set when the point is
    /// interior to both segments.
    Point { point: Coord, proper: bool },
    /// The segments are collinear and overlap along the given sub-segment.
    Collinear(Coord, Coord),
}

impl SegmentIntersection {
    pub fn is_none(&self) -> bool {
        matches!(self, SegmentIntersection::None)
    }

    pub fn is_proper(&self) -> bool {
        matches!(self, SegmentIntersection::Point { proper: true, .. })
    }

    /// Returns the first point of the intersection, if any.
    pub fn point(&self) -> Option<Coord> {
        match *self {
            SegmentIntersection::None => None,
            SegmentIntersection::Point { point, .. } => Some(point),
            SegmentIntersection::Collinear(a, _) => Some(a),
        }
    }
}

/// intersect_segments computes the intersection of segments p1-p2 and q1-q2.
///
/// Endpoint contacts are reported exactly, using the input coordinates. The
/// point of a proper intersection is computed in floating point and is
/// guaranteed to lie within the envelopes of both segments.
pub fn intersect_segments(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> SegmentIntersection {
    if !Envelope::of_segment(p1, p2).intersects(&Envelope::of_segment(q1, q2)) {
        return SegmentIntersection::None;
    }

    // q1 and q2 on the same strict side of P means no intersection.
    let pq1 = orientation_index(p1, p2, q1);
    let pq2 = orientation_index(p1, p2, q2);
    if pq1 != Direction::Indeterminate && pq1 == pq2 {
        return SegmentIntersection::None;
    }
    let qp1 = orientation_index(q1, q2, p1);
    let qp2 = orientation_index(q1, q2, p2);
    if qp1 != Direction::Indeterminate && qp1 == qp2 {
        return SegmentIntersection::None;
    }

    let collinear = [pq1, pq2, qp1, qp2]
        .iter()
        .all(|d| *d == Direction::Indeterminate);
    if collinear {
        return collinear_intersection(p1, p2, q1, q2);
    }

    if [pq1, pq2, qp1, qp2].contains(&Direction::Indeterminate) {
        // One endpoint lies on the other segment. Prefer shared endpoints
        // so the result is exact.
        let point = if p1 == q1 || p1 == q2 {
            p1
        } else if p2 == q1 || p2 == q2 {
            p2
        } else if pq1 == Direction::Indeterminate {
            q1
        } else if pq2 == Direction::Indeterminate {
            q2
        } else if qp1 == Direction::Indeterminate {
            p1
        } else {
            p2
        };
        return SegmentIntersection::Point {
            point,
            proper: false,
        };
    }

    SegmentIntersection::Point {
        point: proper_intersection_point(p1, p2, q1, q2),
        proper: true,
    }
}

fn collinear_intersection(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> SegmentIntersection {
    let p_env = Envelope::of_segment(p1, p2);
    let q_env = Envelope::of_segment(q1, q2);
    let q1_in_p = p_env.contains_coord(q1);
    let q2_in_p = p_env.contains_coord(q2);
    let p1_in_q = q_env.contains_coord(p1);
    let p2_in_q = q_env.contains_coord(p2);

    let overlap = |a: Coord, b: Coord, single: bool| {
        if a == b && single {
            SegmentIntersection::Point {
                point: a,
                proper: false,
            }
        } else {
            SegmentIntersection::Collinear(a, b)
        }
    };

    if q1_in_p && q2_in_p {
        return SegmentIntersection::Collinear(q1, q2);
    }
    if p1_in_q && p2_in_q {
        return SegmentIntersection::Collinear(p1, p2);
    }
    if q1_in_p && p1_in_q {
        return overlap(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return overlap(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return overlap(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return overlap(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

// proper_intersection_point computes the crossing point of two segments
// known to cross at a point interior to both.
fn proper_intersection_point(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
    let env = Envelope::of_segment(p1, p2)
        .intersection(&Envelope::of_segment(q1, q2))
        .unwrap_or_else(|| Envelope::of_segment(p1, p1));
    let solved = solve_crossing(p1, p2, q1, q2).or_else(|| {
        // The products overflowed or underflowed; solve again with every
        // coordinate scaled by the same power of two.
        let e = scale_exponent(&[p1, p2, q1, q2]);
        solve_crossing(
            scale(p1, -e),
            scale(p2, -e),
            scale(q1, -e),
            scale(q2, -e),
        )
        .map(|point| scale(point, e))
    });
    match solved {
        Some(point) if point.x.is_finite() && point.y.is_finite() => env.clamp(point),
        _ => nearest_endpoint(p1, p2, q1, q2),
    }
}

fn solve_crossing(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Option<Coord> {
    let r = Vector2::new(p2.x - p1.x, p2.y - p1.y);
    let s = Vector2::new(q2.x - q1.x, q2.y - q1.y);
    let qp = Vector2::new(q1.x - p1.x, q1.y - p1.y);

    let denom = r.perp_dot(s);
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let t = qp.perp_dot(s) / denom;
    let point = Coord {
        x: p1.x + t * r.x,
        y: p1.y + t * r.y,
    };
    if point.x.is_finite() && point.y.is_finite() {
        Some(point)
    } else {
        None
    }
}

// scale_exponent returns e such that every coordinate magnitude is below 2^e.
fn scale_exponent(points: &[Coord]) -> i32 {
    let max = points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(0.0f64, f64::max);
    if max == 0.0 || !max.is_finite() {
        return 0;
    }
    match ((max.to_bits() >> 52) & 0x7ff) as i32 {
        0 => -1022,
        biased => biased - 1022,
    }
}

// scale multiplies c by 2^e, applied in two halves so neither factor
// overflows.
fn scale(c: Coord, e: i32) -> Coord {
    let (a, b) = (2f64.powi(e / 2), 2f64.powi(e - e / 2));
    Coord {
        x: c.x * a * b,
        y: c.y * a * b,
    }
}

// nearest_endpoint returns the endpoint of either segment which is closest
// to the other segment. Distances are compared on scaled copies so they stay
// finite for any finite input.
fn nearest_endpoint(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
    let e = scale_exponent(&[p1, p2, q1, q2]);
    let (sp1, sp2, sq1, sq2) = (scale(p1, -e), scale(p2, -e), scale(q1, -e), scale(q2, -e));
    let candidates = [
        (p1, distance_to_segment(sp1, sq1, sq2)),
        (p2, distance_to_segment(sp2, sq1, sq2)),
        (q1, distance_to_segment(sq1, sp1, sp2)),
        (q2, distance_to_segment(sq2, sp1, sp2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}

fn distance_to_segment(p: Coord, a: Coord, b: Coord) -> f64 {
    let ab = Vector2::new(b.x - a.x, b.y - a.y);
    let ap = Vector2::new(p.x - a.x, p.y - a.y);
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return ap.x.hypot(ap.y);
    }
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    (ap.x - t * ab.x).hypot(ap.y - t * ab.y)
}

/// point_on_segment reports whether p lies on the closed segment a-b.
pub fn point_on_segment(p: Coord, a: Coord, b: Coord) -> bool {
    Envelope::of_segment(a, b).contains_coord(p)
        && orientation_index(a, b, p) == Direction::Indeterminate
}
