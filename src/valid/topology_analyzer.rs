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

//! Analyzes the rings of a polygon or multipolygon for crossings, touches
//! and self-touches, and answers the topology questions the validity
//! checker asks about them.

use std::borrow::Cow;

use log::trace;

use crate::valid::envelope::Envelope;
use crate::valid::error::{ValidityError, ValidityResult};
use crate::valid::geometry::{Coord, MultiPolygon, Polygon};
use crate::valid::point_locator::{locate_point_in_ring, Location};
use crate::valid::polygon_node::{is_crossing, is_interior_segment};
use crate::valid::predicates::is_ccw;
use crate::valid::ring_graph::RingTouchGraph;
use crate::valid::segment_intersection::{
    intersect_segments, point_on_segment, SegmentIntersection,
};

// A ring with repeated consecutive points removed, tied to its node in the
// touch graph if it has one.
#[derive(Debug)]
struct SegmentString<'a> {
    coords: Cow<'a, [Coord]>,
    ring: Option<usize>,
    envelope: Option<Envelope>,
}

impl<'a> SegmentString<'a> {
    fn new(coords: &'a [Coord], ring: Option<usize>) -> Self {
        let coords = remove_repeated_points(coords);
        let envelope = Envelope::from_coords(&coords);
        SegmentString {
            coords,
            ring,
            envelope,
        }
    }

    fn num_segments(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    // prev_coord returns the ring vertex before the start of segment seg.
    fn prev_coord(&self, seg: usize) -> Coord {
        if seg == 0 {
            self.coords[self.coords.len() - 2]
        } else {
            self.coords[seg - 1]
        }
    }

    // is_adjacent reports whether two segments of this ring share a vertex
    // by position, including the last and first segments.
    fn is_adjacent(&self, seg0: usize, seg1: usize) -> bool {
        let delta = seg0.abs_diff(seg1);
        delta <= 1 || delta + 2 >= self.coords.len()
    }
}

fn remove_repeated_points(coords: &[Coord]) -> Cow<'_, [Coord]> {
    if coords.windows(2).all(|w| w[0] != w[1]) {
        return Cow::Borrowed(coords);
    }
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last() != Some(c) {
            out.push(*c);
        }
    }
    Cow::Owned(out)
}

/// PolygonTopologyAnalyzer finds invalid intersections between the rings of
/// a polygonal geometry and builds their touch graph.
///
/// The analysis runs once when the analyzer is built. It stops at the first
/// crossing or double touch, since either makes the geometry invalid.
#[derive(Debug)]
pub struct PolygonTopologyAnalyzer<'a> {
    invert_rings_valid: bool,
    ring_mode: bool,
    graph: RingTouchGraph<'a>,
    intersection: Option<Coord>,
    double_touch: Option<Coord>,
    self_touch: Option<Coord>,
    disconnection: Option<Coord>,
}

impl<'a> PolygonTopologyAnalyzer<'a> {
    fn empty(invert_rings_valid: bool) -> Self {
        PolygonTopologyAnalyzer {
            invert_rings_valid,
            ring_mode: false,
            graph: RingTouchGraph::new(),
            intersection: None,
            double_touch: None,
            self_touch: None,
            disconnection: None,
        }
    }

    /// Analyzes the rings of a single polygon.
    pub fn from_polygon(polygon: &'a Polygon, invert_rings_valid: bool) -> Self {
        let mut analyzer = Self::empty(invert_rings_valid);
        let mut strings = Vec::new();
        analyzer.add_polygon(polygon, &mut strings);
        analyzer.analyze(&strings);
        analyzer
    }

    /// Analyzes the rings of all elements of a multipolygon together.
    pub fn from_multi_polygon(multi: &'a MultiPolygon, invert_rings_valid: bool) -> Self {
        let mut analyzer = Self::empty(invert_rings_valid);
        let mut strings = Vec::new();
        for polygon in multi.polygons() {
            analyzer.add_polygon(polygon, &mut strings);
        }
        analyzer.analyze(&strings);
        analyzer
    }

    fn add_polygon(&mut self, polygon: &'a Polygon, strings: &mut Vec<SegmentString<'a>>) {
        if polygon.exterior().coords().is_empty() {
            return;
        }
        let with_nodes = self.invert_rings_valid || polygon.num_interior_rings() > 0;
        let shell = if with_nodes {
            Some(self.graph.add_shell(polygon.exterior().coords()))
        } else {
            None
        };
        strings.push(SegmentString::new(polygon.exterior().coords(), shell));

        for (index, hole) in polygon.interiors().iter().enumerate() {
            if hole.coords().is_empty() {
                continue;
            }
            let node = shell.map(|s| self.graph.add_hole(s, index, hole.coords()));
            strings.push(SegmentString::new(hole.coords(), node));
        }
    }

    /// find_self_intersection returns a point where the ring touches or
    /// crosses itself other than at the shared vertex of consecutive
    /// segments.
    pub fn find_self_intersection(ring: &[Coord]) -> Option<Coord> {
        let mut analyzer = PolygonTopologyAnalyzer::empty(false);
        analyzer.ring_mode = true;
        analyzer.analyze(&[SegmentString::new(ring, None)]);
        analyzer.intersection
    }

    fn analyze(&mut self, strings: &[SegmentString<'a>]) {
        trace!(
            "analyzing {} rings, {} with touch nodes",
            strings.len(),
            self.graph.len()
        );
        for (i, ss0) in strings.iter().enumerate() {
            for (j, ss1) in strings.iter().enumerate().skip(i) {
                match (&ss0.envelope, &ss1.envelope) {
                    (Some(e0), Some(e1)) if e0.intersects(e1) => {}
                    _ => continue,
                }
                let same = i == j;
                for seg0 in 0..ss0.num_segments() {
                    let start = if same { seg0 + 1 } else { 0 };
                    for seg1 in start..ss1.num_segments() {
                        if self.analyze_segment_pair(ss0, seg0, ss1, seg1, same) {
                            return;
                        }
                    }
                }
            }
        }
    }

    // analyze_segment_pair examines one pair of segments and returns true if
    // the analysis can stop.
    fn analyze_segment_pair(
        &mut self,
        ss0: &SegmentString<'a>,
        seg0: usize,
        ss1: &SegmentString<'a>,
        seg1: usize,
        same: bool,
    ) -> bool {
        let (p00, p01) = (ss0.coords[seg0], ss0.coords[seg0 + 1]);
        let (p10, p11) = (ss1.coords[seg1], ss1.coords[seg1 + 1]);

        let point = match intersect_segments(p00, p01, p10, p11) {
            SegmentIntersection::None => return false,
            SegmentIntersection::Collinear(p, _) => {
                self.intersection = Some(p);
                return true;
            }
            SegmentIntersection::Point {
                point,
                proper: true,
            } => {
                self.intersection = Some(point);
                return true;
            }
            SegmentIntersection::Point { point, .. } => point,
        };

        if same && ss0.is_adjacent(seg0, seg1) {
            return false;
        }
        if self.ring_mode {
            self.intersection = Some(point);
            return true;
        }
        // A contact at a segment end is seen again at the start of the
        // following segment.
        if point == p01 || point == p11 {
            return false;
        }

        let e00 = if point == p00 { ss0.prev_coord(seg0) } else { p00 };
        let e10 = if point == p10 { ss1.prev_coord(seg1) } else { p10 };
        if is_crossing(point, e00, p01, e10, p11) {
            self.intersection = Some(point);
            return true;
        }

        if same {
            if self.invert_rings_valid {
                if let Some(ring) = ss0.ring {
                    trace!("ring {} touches itself at {:?}", ring, point);
                    self.graph.record_self_touch(ring, point, e00, p01, e10, p11);
                }
            } else if self.self_touch.is_none() {
                self.self_touch = Some(point);
            }
            return false;
        }

        if self.graph.register_touch(ss0.ring, ss1.ring, point) {
            trace!("rings touch twice, at {:?}", point);
            self.double_touch = Some(point);
            return true;
        }
        false
    }

    /// has_intersection reports whether two rings cross or a ring crosses
    /// itself.
    pub fn has_intersection(&self) -> bool {
        self.intersection.is_some()
    }

    /// has_double_touch reports whether two rings touch at more than one
    /// point.
    pub fn has_double_touch(&self) -> bool {
        self.double_touch.is_some()
    }

    /// Returns the location of the crossing or double touch found, if any.
    pub fn intersection_location(&self) -> Option<Coord> {
        self.intersection.or(self.double_touch)
    }

    /// is_interior_disconnected_by_self_touch reports whether a ring touches
    /// itself in a way that splits the polygon interior. Without inverted
    /// rings every self-touch does.
    pub fn is_interior_disconnected_by_self_touch(&mut self) -> bool {
        let found = if self.invert_rings_valid {
            self.graph.find_interior_self_touch()
        } else {
            self.self_touch
        };
        if found.is_some() {
            self.disconnection = found;
        }
        found.is_some()
    }

    /// is_interior_disconnected_by_ring_cycle reports whether the ring
    /// touches form a cycle, which encloses part of the interior.
    pub fn is_interior_disconnected_by_ring_cycle(&mut self) -> bool {
        let found = self.graph.find_touch_cycle_location();
        if found.is_some() {
            self.disconnection = found;
        }
        found.is_some()
    }

    /// Returns the location found by the last successful disconnection test.
    pub fn disconnection_location(&self) -> Option<Coord> {
        self.disconnection
    }
}

/// is_segment_in_ring reports whether the segment p0-p1 starts inside the
/// ring, or starts on its boundary and heads into its interior.
pub fn is_segment_in_ring(p0: Coord, p1: Coord, ring: &[Coord]) -> ValidityResult<bool> {
    match locate_point_in_ring(p0, ring) {
        Location::Exterior => Ok(false),
        Location::Interior => Ok(true),
        Location::Boundary => is_incident_segment_in_ring(p0, p1, ring),
    }
}

/// is_ring_nested reports whether the ring test lies inside the ring target.
/// The rings must not cross.
pub fn is_ring_nested(test: &[Coord], target: &[Coord]) -> ValidityResult<bool> {
    let p0 = match test.first() {
        Some(p) => *p,
        None => return Ok(false),
    };
    match locate_point_in_ring(p0, target) {
        Location::Exterior => Ok(false),
        Location::Interior => Ok(true),
        Location::Boundary => {
            let p1 = test
                .iter()
                .skip(1)
                .find(|c| **c != p0)
                .copied()
                .ok_or(ValidityError::DegenerateRing(p0))?;
            is_incident_segment_in_ring(p0, p1, target)
        }
    }
}

// is_incident_segment_in_ring tests whether a segment starting at a point
// on the ring lies in the ring interior, by checking it against the corner
// of the ring at that point.
fn is_incident_segment_in_ring(p0: Coord, p1: Coord, ring: &[Coord]) -> ValidityResult<bool> {
    let index =
        intersecting_segment_index(ring, p0).ok_or(ValidityError::SegmentVertexNotOnRing(p0))?;
    let mut prev = find_ring_vertex_prev(ring, index, p0)?;
    let mut next = find_ring_vertex_next(ring, index, p0)?;
    if is_ccw(ring) {
        std::mem::swap(&mut prev, &mut next);
    }
    Ok(is_interior_segment(p0, prev, next, p1))
}

// intersecting_segment_index returns the index of the first ring segment
// containing p. A point at the end of a segment is reported as the start of
// the next one.
fn intersecting_segment_index(ring: &[Coord], p: Coord) -> Option<usize> {
    for (i, w) in ring.windows(2).enumerate() {
        if point_on_segment(p, w[0], w[1]) {
            if p == w[1] && i + 2 < ring.len() {
                return Some(i + 1);
            }
            if p == w[1] {
                return Some(0);
            }
            return Some(i);
        }
    }
    None
}

fn ring_index_prev(ring: &[Coord], index: usize) -> usize {
    if index == 0 {
        ring.len() - 2
    } else {
        index - 1
    }
}

fn ring_index_next(ring: &[Coord], index: usize) -> usize {
    if index >= ring.len() - 2 {
        0
    } else {
        index + 1
    }
}

// find_ring_vertex_prev returns the closest vertex before index which is
// distinct from node.
fn find_ring_vertex_prev(ring: &[Coord], index: usize, node: Coord) -> ValidityResult<Coord> {
    let mut i = index;
    for _ in 0..ring.len() {
        if ring[i] != node {
            return Ok(ring[i]);
        }
        i = ring_index_prev(ring, i);
    }
    Err(ValidityError::DegenerateRing(node))
}

// find_ring_vertex_next returns the closest vertex after index which is
// distinct from node.
fn find_ring_vertex_next(ring: &[Coord], index: usize, node: Coord) -> ValidityResult<Coord> {
    let mut i = index + 1;
    for _ in 0..ring.len() {
        if ring[i] != node {
            return Ok(ring[i]);
        }
        i = ring_index_next(ring, i);
    }
    Err(ValidityError::DegenerateRing(node))
}
