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

//! Topological validity of geometries.
//!
//! A geometry is checked by a fixed pipeline of tests, cheapest first, and
//! the first test to fail determines the reported error. Later tests may
//! rely on earlier ones having passed: ring topology is only analyzed once
//! every ring is known to be closed and to have enough points, and hole
//! containment is only tested once rings are known not to cross.

use std::fmt;

use log::debug;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::valid::envelope::Envelope;
use crate::valid::error::{ValidityError, ValidityResult};
use crate::valid::geometry::{
    Coord, Geometry, GeometryOps, LineString, LinearRing, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::valid::nested_hole_tester::NestedHoleTester;
use crate::valid::point_locator::{Location, PointLocator, RingLocator};
use crate::valid::topology_analyzer::{is_segment_in_ring, PolygonTopologyAnalyzer};

const MIN_SIZE_LINESTRING: usize = 2;
const MIN_SIZE_RING: usize = 4;

/// The kinds of validity defect a geometry can have.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    /// A coordinate is NaN or infinite.
    InvalidCoordinate,
    /// A ring's first and last points differ.
    RingNotClosed,
    /// A line or ring has too few distinct points.
    TooFewPoints,
    /// A standalone ring touches or crosses itself.
    RingSelfIntersection,
    /// Rings of a polygonal geometry cross, or a ring crosses itself.
    SelfIntersection,
    /// The interior of a polygon is split into several pieces.
    DisconnectedInterior,
    /// A hole is not contained in its shell.
    HoleOutsideShell,
    /// A hole lies inside another hole of the same polygon.
    NestedHoles,
    /// An element of a multipolygon lies inside another element.
    NestedShells,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::InvalidCoordinate => "Invalid Coordinate",
            ErrorKind::RingNotClosed => "Ring is not closed",
            ErrorKind::TooFewPoints => "Too few distinct points in geometry component",
            ErrorKind::RingSelfIntersection => "Ring Self-intersection",
            ErrorKind::SelfIntersection => "Self-intersection",
            ErrorKind::DisconnectedInterior => "Interior is disconnected",
            ErrorKind::HoleOutsideShell => "Hole lies outside shell",
            ErrorKind::NestedHoles => "Holes are nested",
            ErrorKind::NestedShells => "Nested shells",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn location_suffix(location: &Option<Coord>) -> String {
    match location {
        Some(c) => format!(" at or near point ({}, {})", c.x, c.y),
        None => String::new(),
    }
}

/// TopologyValidationError describes the first validity defect found in a
/// geometry, with a point at or near the defect.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[error("{kind}{}", location_suffix(.location))]
pub struct TopologyValidationError {
    kind: ErrorKind,
    location: Option<Coord>,
}

impl TopologyValidationError {
    pub fn new(kind: ErrorKind, location: Option<Coord>) -> Self {
        TopologyValidationError { kind, location }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> Option<Coord> {
        self.location
    }
}

// CheckFailure stops the check pipeline, either at a defect of the geometry
// or at an internal fault.
#[derive(Debug)]
enum CheckFailure {
    Invalid(TopologyValidationError),
    Fault(ValidityError),
}

impl From<TopologyValidationError> for CheckFailure {
    fn from(err: TopologyValidationError) -> Self {
        CheckFailure::Invalid(err)
    }
}

impl From<ValidityError> for CheckFailure {
    fn from(err: ValidityError) -> Self {
        CheckFailure::Fault(err)
    }
}

type CheckResult = Result<(), CheckFailure>;

fn invalid(kind: ErrorKind, location: Option<Coord>) -> CheckFailure {
    CheckFailure::Invalid(TopologyValidationError::new(kind, location))
}

/// ValidityChecker tests geometries for topological validity.
///
/// By default polygons follow the simple-features model, where a ring may
/// not touch itself. Allowing inverted rings to form holes accepts shells
/// that self-touch to enclose a hole and holes that self-touch to form
/// several holes, as long as the interior stays connected.
///
/// A checker holds only configuration, so it can be copied freely and used
/// for any number of geometries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidityChecker {
    allow_inverted_rings_forming_holes: bool,
}

impl ValidityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether self-touching rings may form holes.
    pub fn with_inverted_rings_forming_holes(mut self, allow: bool) -> Self {
        self.allow_inverted_rings_forming_holes = allow;
        self
    }

    pub fn allows_inverted_rings_forming_holes(&self) -> bool {
        self.allow_inverted_rings_forming_holes
    }

    /// is_valid_coordinate reports whether both ordinates of c are finite.
    pub fn is_valid_coordinate(c: Coord) -> bool {
        c.x.is_finite() && c.y.is_finite()
    }

    /// is_valid reports whether the geometry is topologically valid.
    pub fn is_valid(&self, geometry: &Geometry) -> ValidityResult<bool> {
        Ok(self.validation_error(geometry)?.is_none())
    }

    /// validation_error returns the first defect found in the geometry, or
    /// None if it is valid.
    pub fn validation_error(
        &self,
        geometry: &Geometry,
    ) -> ValidityResult<Option<TopologyValidationError>> {
        match self.check_geometry(geometry) {
            Ok(()) => Ok(None),
            Err(CheckFailure::Invalid(err)) => Ok(Some(err)),
            Err(CheckFailure::Fault(err)) => Err(err),
        }
    }

    // check_geometry walks collections with an explicit stack so that
    // arbitrarily deep nesting cannot exhaust the call stack. Elements are
    // checked in order and the first failure stops the walk.
    fn check_geometry(&self, geometry: &Geometry) -> CheckResult {
        let mut stack = vec![geometry];
        while let Some(geom) = stack.pop() {
            let result = match geom {
                Geometry::GeometryCollection(gc) => {
                    stack.extend(gc.geometries().iter().rev());
                    Ok(())
                }
                _ if geom.is_empty() => Ok(()),
                Geometry::Point(p) => self.check_point(p),
                Geometry::MultiPoint(mp) => self.check_multi_point(mp),
                Geometry::LineString(ls) => self.check_line_string(ls),
                Geometry::LinearRing(lr) => self.check_linear_ring(lr),
                Geometry::Polygon(poly) => self.check_polygon(poly),
                Geometry::MultiPolygon(mp) => self.check_multi_polygon(mp),
            };
            if let Err(CheckFailure::Invalid(err)) = &result {
                debug!("{} is invalid: {}", geom.geometry_type(), err);
            }
            result?;
        }
        Ok(())
    }

    fn check_point(&self, point: &Point) -> CheckResult {
        match point.coord() {
            Some(c) => check_coordinates(&[c]),
            None => Ok(()),
        }
    }

    fn check_multi_point(&self, multi: &MultiPoint) -> CheckResult {
        check_coordinates(multi.coords())
    }

    fn check_line_string(&self, line: &LineString) -> CheckResult {
        check_coordinates(line.coords())?;
        check_too_few_points(line.coords(), MIN_SIZE_LINESTRING)
    }

    fn check_linear_ring(&self, ring: &LinearRing) -> CheckResult {
        check_coordinates(ring.coords())?;
        check_ring_closed(ring)?;
        check_too_few_points(ring.coords(), MIN_SIZE_RING)?;
        if let Some(pt) = PolygonTopologyAnalyzer::find_self_intersection(ring.coords()) {
            return Err(invalid(ErrorKind::RingSelfIntersection, Some(pt)));
        }
        Ok(())
    }

    fn check_polygon(&self, polygon: &Polygon) -> CheckResult {
        check_polygon_rings(polygon)?;

        let mut analyzer =
            PolygonTopologyAnalyzer::from_polygon(polygon, self.allow_inverted_rings_forming_holes);
        check_area_intersections(&mut analyzer)?;

        check_holes_in_shell(polygon)?;
        check_holes_not_nested(polygon)?;
        check_interior_connected(&mut analyzer)
    }

    fn check_multi_polygon(&self, multi: &MultiPolygon) -> CheckResult {
        for polygon in multi.polygons() {
            check_polygon_rings(polygon)?;
        }

        let mut analyzer = PolygonTopologyAnalyzer::from_multi_polygon(
            multi,
            self.allow_inverted_rings_forming_holes,
        );
        check_area_intersections(&mut analyzer)?;

        for polygon in multi.polygons() {
            check_holes_in_shell(polygon)?;
        }
        for polygon in multi.polygons() {
            check_holes_not_nested(polygon)?;
        }
        check_shells_not_nested(multi)?;
        check_interior_connected(&mut analyzer)
    }
}

/// is_valid reports whether the geometry is valid under the simple-features
/// rules.
pub fn is_valid(geometry: &Geometry) -> ValidityResult<bool> {
    ValidityChecker::default().is_valid(geometry)
}

/// validation_error returns the first simple-features validity defect of
/// the geometry, if any.
pub fn validation_error(geometry: &Geometry) -> ValidityResult<Option<TopologyValidationError>> {
    ValidityChecker::default().validation_error(geometry)
}

fn check_coordinates(coords: &[Coord]) -> CheckResult {
    match coords
        .iter()
        .find(|c| !ValidityChecker::is_valid_coordinate(**c))
    {
        Some(c) => Err(invalid(ErrorKind::InvalidCoordinate, Some(*c))),
        None => Ok(()),
    }
}

fn check_ring_closed(ring: &LinearRing) -> CheckResult {
    if ring.coords().is_empty() || ring.is_closed() {
        return Ok(());
    }
    Err(invalid(
        ErrorKind::RingNotClosed,
        ring.coords().first().copied(),
    ))
}

// check_too_few_points counts distinct consecutive points, stopping as soon
// as there are enough.
fn check_too_few_points(coords: &[Coord], min_size: usize) -> CheckResult {
    let first = match coords.first() {
        Some(c) => *c,
        None => return Ok(()),
    };
    let mut count = 1;
    let mut prev = first;
    for c in &coords[1..] {
        if count >= min_size {
            break;
        }
        if *c != prev {
            count += 1;
            prev = *c;
        }
    }
    if count < min_size {
        return Err(invalid(ErrorKind::TooFewPoints, Some(first)));
    }
    Ok(())
}

// check_polygon_rings runs the per-ring checks over the shell and then the
// holes: all coordinates, then closure, then point counts.
fn check_polygon_rings(polygon: &Polygon) -> CheckResult {
    for ring in polygon.rings() {
        check_coordinates(ring.coords())?;
    }
    for ring in polygon.rings() {
        check_ring_closed(ring)?;
    }
    for ring in polygon.rings() {
        if !ring.coords().is_empty() {
            check_too_few_points(ring.coords(), MIN_SIZE_RING)?;
        }
    }
    Ok(())
}

fn check_area_intersections(analyzer: &mut PolygonTopologyAnalyzer) -> CheckResult {
    if analyzer.has_intersection() {
        return Err(invalid(
            ErrorKind::SelfIntersection,
            analyzer.intersection_location(),
        ));
    }
    if analyzer.has_double_touch() {
        return Err(invalid(
            ErrorKind::DisconnectedInterior,
            analyzer.intersection_location(),
        ));
    }
    if analyzer.is_interior_disconnected_by_self_touch() {
        return Err(invalid(
            ErrorKind::DisconnectedInterior,
            analyzer.disconnection_location(),
        ));
    }
    Ok(())
}

// check_holes_in_shell requires every hole to lie inside the shell. The
// rings are known not to cross, so one hole vertex off the shell boundary
// decides.
fn check_holes_in_shell(polygon: &Polygon) -> CheckResult {
    if polygon.num_interior_rings() == 0 {
        return Ok(());
    }
    let shell = polygon.exterior().coords();
    let locator = RingLocator::new(shell);
    for hole in polygon.interiors() {
        let hole = hole.coords();
        if hole.is_empty() {
            continue;
        }
        let outside = if shell.is_empty() {
            Some(hole[0])
        } else {
            find_hole_outside_point(hole, &locator)
        };
        if outside.is_some() {
            return Err(invalid(ErrorKind::HoleOutsideShell, outside));
        }
    }
    Ok(())
}

// find_hole_outside_point returns the first hole vertex located outside the
// shell, or None if a vertex lies inside or all lie on the shell boundary.
fn find_hole_outside_point<L: PointLocator>(hole: &[Coord], shell: &L) -> Option<Coord> {
    for p in &hole[..hole.len() - 1] {
        match shell.locate(*p) {
            Location::Boundary => continue,
            Location::Interior => return None,
            Location::Exterior => return Some(*p),
        }
    }
    None
}

fn check_holes_not_nested(polygon: &Polygon) -> CheckResult {
    if polygon.num_interior_rings() < 2 {
        return Ok(());
    }
    let tester = NestedHoleTester::new(polygon)?;
    if tester.is_nested() {
        return Err(invalid(ErrorKind::NestedHoles, tester.nested_point()));
    }
    Ok(())
}

// check_shells_not_nested requires that no element of a multipolygon lies
// inside another element, unless it lies inside one of that element's
// holes. Element rings are known not to cross, so the first segment of a
// shell decides.
fn check_shells_not_nested(multi: &MultiPolygon) -> CheckResult {
    let polygons = multi.polygons();
    if polygons.len() < 2 {
        return Ok(());
    }
    for (i, polygon) in polygons.iter().enumerate() {
        let shell = polygon.exterior();
        let shell_env = match shell.envelope() {
            Some(env) => env,
            None => continue,
        };
        for (j, other) in polygons.iter().enumerate() {
            if i == j {
                continue;
            }
            match other.exterior().envelope() {
                Some(env) if env.covers(&shell_env) => {}
                _ => continue,
            }
            if let Some(pt) = find_shell_segment_in_polygon(shell.coords(), &shell_env, other)? {
                return Err(invalid(ErrorKind::NestedShells, Some(pt)));
            }
        }
    }
    Ok(())
}

// find_shell_segment_in_polygon returns the start of the shell's first
// segment if that segment lies inside the polygon, i.e. inside its shell and
// outside all of its holes.
fn find_shell_segment_in_polygon(
    shell: &[Coord],
    shell_env: &Envelope,
    polygon: &Polygon,
) -> ValidityResult<Option<Coord>> {
    let p0 = shell[0];
    let p1 = match shell.iter().skip(1).find(|c| **c != p0) {
        Some(c) => *c,
        None => return Ok(None),
    };
    if !is_segment_in_ring(p0, p1, polygon.exterior().coords())? {
        return Ok(None);
    }
    for hole in polygon.interiors() {
        let covers = hole.envelope().map_or(false, |env| env.covers(shell_env));
        if covers && is_segment_in_ring(p0, p1, hole.coords())? {
            return Ok(None);
        }
    }
    Ok(Some(p0))
}

fn check_interior_connected(analyzer: &mut PolygonTopologyAnalyzer) -> CheckResult {
    if analyzer.is_interior_disconnected_by_ring_cycle() {
        return Err(invalid(
            ErrorKind::DisconnectedInterior,
            analyzer.disconnection_location(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valid::geometry::GeometryCollection;
    use crate::valid::test_util::{
        assert_invalid, assert_valid, coords, polygon, ring, shuffled, SQUARE_POLYGON,
        SQUARE_PTS,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    fn strict() -> ValidityChecker {
        ValidityChecker::new()
    }

    fn lenient() -> ValidityChecker {
        ValidityChecker::new().with_inverted_rings_forming_holes(true)
    }

    fn poly(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Geometry {
        Geometry::Polygon(polygon(shell, holes))
    }

    const INVERTED_SHELL: &[(f64, f64)] = &[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (5.0, 10.0),
        (7.0, 5.0),
        (3.0, 5.0),
        (5.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0),
    ];

    #[test]
    fn test_is_valid_coordinate() {
        assert!(ValidityChecker::is_valid_coordinate(c(1.0, -1e300)));
        assert!(!ValidityChecker::is_valid_coordinate(c(f64::NAN, 0.0)));
        assert!(!ValidityChecker::is_valid_coordinate(c(0.0, f64::INFINITY)));
        assert!(!ValidityChecker::is_valid_coordinate(c(f64::NEG_INFINITY, 0.0)));
    }

    #[test]
    fn test_error_display() {
        let err = TopologyValidationError::new(ErrorKind::HoleOutsideShell, Some(c(20.0, 20.5)));
        assert_eq!(
            err.to_string(),
            "Hole lies outside shell at or near point (20, 20.5)"
        );
        let err = TopologyValidationError::new(ErrorKind::TooFewPoints, None);
        assert_eq!(err.to_string(), "Too few distinct points in geometry component");
    }

    #[test]
    fn test_configuration() {
        assert!(!ValidityChecker::default().allows_inverted_rings_forming_holes());
        assert!(lenient().allows_inverted_rings_forming_holes());
        assert_eq!(strict(), ValidityChecker::default());
    }

    #[test]
    fn test_valid_simple_geometries() {
        for geom in [
            Geometry::Point(Point::new(1.0, 2.0)),
            Geometry::MultiPoint(MultiPoint(coords(&[(0.0, 0.0), (0.0, 0.0)]))),
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])),
            Geometry::LinearRing(ring(SQUARE_PTS)),
            SQUARE_POLYGON.clone(),
        ] {
            assert_valid(strict(), &geom);
            assert!(is_valid(&geom).unwrap());
            assert_eq!(validation_error(&geom).unwrap(), None);
        }
    }

    #[test]
    fn test_empty_geometries_are_valid() {
        for geom in [
            Geometry::Point(Point(None)),
            Geometry::MultiPoint(MultiPoint::default()),
            Geometry::LineString(LineString::default()),
            Geometry::LinearRing(LinearRing::default()),
            Geometry::Polygon(Polygon::default()),
            Geometry::MultiPolygon(MultiPolygon::default()),
            Geometry::GeometryCollection(GeometryCollection::default()),
        ] {
            assert_valid(strict(), &geom);
        }
    }

    #[test]
    fn test_invalid_coordinate() {
        let geom = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (f64::NAN, 1.0)]));
        let err = validation_error(&geom).unwrap().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidCoordinate);
        assert!(err.location().map_or(false, |p| p.x.is_nan() && p.y == 1.0));

        // Coordinates are checked before anything else, shell first.
        let geom = poly(
            &[(0.0, 0.0), (10.0, 0.0), (f64::INFINITY, 10.0), (0.0, 0.0)],
            &[&[(1.0, 1.0), (2.0, 1.0)]],
        );
        assert_invalid(
            strict(),
            &geom,
            ErrorKind::InvalidCoordinate,
            Some(c(f64::INFINITY, 10.0)),
        );

        let geom = Geometry::Point(Point::new(0.0, f64::NEG_INFINITY));
        assert_invalid(strict(), &geom, ErrorKind::InvalidCoordinate, None);
    }

    #[test]
    fn test_ring_not_closed() {
        let open = &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert_invalid(
            strict(),
            &Geometry::LinearRing(ring(open)),
            ErrorKind::RingNotClosed,
            Some(c(0.0, 0.0)),
        );
        assert_invalid(
            strict(),
            &poly(SQUARE_PTS, &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0)]]),
            ErrorKind::RingNotClosed,
            Some(c(2.0, 2.0)),
        );
    }

    #[test]
    fn test_too_few_points() {
        assert_invalid(
            strict(),
            &Geometry::LineString(LineString::from(vec![(1.0, 1.0), (1.0, 1.0)])),
            ErrorKind::TooFewPoints,
            Some(c(1.0, 1.0)),
        );
        assert_invalid(
            strict(),
            &Geometry::LinearRing(ring(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)])),
            ErrorKind::TooFewPoints,
            Some(c(0.0, 0.0)),
        );
        // Repeated points do not count.
        assert_invalid(
            strict(),
            &poly(
                &[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 0.0), (0.0, 0.0)],
                &[],
            ),
            ErrorKind::TooFewPoints,
            Some(c(0.0, 0.0)),
        );
        assert_valid(
            strict(),
            &poly(
                &[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)],
                &[],
            ),
        );
    }

    #[test]
    fn test_linear_ring_self_intersection() {
        let bow_tie = ring(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_invalid(
            strict(),
            &Geometry::LinearRing(bow_tie),
            ErrorKind::RingSelfIntersection,
            Some(c(5.0, 5.0)),
        );
        assert_invalid(
            lenient(),
            &Geometry::LinearRing(ring(INVERTED_SHELL)),
            ErrorKind::RingSelfIntersection,
            Some(c(5.0, 10.0)),
        );
    }

    #[test]
    fn test_polygon_self_intersection() {
        assert_invalid(
            strict(),
            &poly(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)], &[]),
            ErrorKind::SelfIntersection,
            Some(c(5.0, 5.0)),
        );
        // A hole crossing the shell.
        assert_invalid(
            strict(),
            &poly(SQUARE_PTS, &[&[(5.0, 5.0), (15.0, 5.0), (15.0, 6.0), (5.0, 5.0)]]),
            ErrorKind::SelfIntersection,
            Some(c(10.0, 5.0)),
        );
        // The crossing is located even when the cross products overflow.
        assert_invalid(
            strict(),
            &poly(&[(0.0, 0.0), (1e308, 1e308), (1e308, 0.0), (0.0, 1e308), (0.0, 0.0)], &[]),
            ErrorKind::SelfIntersection,
            Some(c(5e307, 5e307)),
        );
    }

    #[test]
    fn test_hole_inside_shell_is_valid() {
        let geom = poly(SQUARE_PTS, &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)]]);
        assert_valid(strict(), &geom);
        assert_valid(lenient(), &geom);

        // Touching the shell once is allowed.
        let geom = poly(SQUARE_PTS, &[&[(0.0, 5.0), (5.0, 5.0), (2.0, 2.0), (0.0, 5.0)]]);
        assert_valid(strict(), &geom);
    }

    #[test]
    fn test_double_touch() {
        assert_invalid(
            strict(),
            &poly(SQUARE_PTS, &[&[(0.0, 5.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)]]),
            ErrorKind::DisconnectedInterior,
            Some(c(0.0, 5.0)),
        );
    }

    #[test]
    fn test_touch_cycle_any_hole_order() {
        const LEFT: &[(f64, f64)] = &[(0.0, 5.0), (5.0, 5.0), (2.0, 2.0), (0.0, 5.0)];
        const RIGHT: &[(f64, f64)] = &[(10.0, 5.0), (5.0, 5.0), (8.0, 2.0), (10.0, 5.0)];
        let holes = vec![LEFT, RIGHT];
        let expected = [c(0.0, 5.0), c(10.0, 5.0), c(5.0, 5.0)];

        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..10 {
            let order = shuffled(&mut rng, holes.clone());
            let geom = poly(SQUARE_PTS, &order);
            for checker in [strict(), lenient()] {
                let err = checker.validation_error(&geom).unwrap().unwrap();
                assert_eq!(err.kind(), ErrorKind::DisconnectedInterior);
                assert!(
                    err.location().map_or(false, |p| expected.contains(&p)),
                    "unexpected location in {}",
                    err
                );
            }
        }
    }

    #[test]
    fn test_inverted_shell() {
        let geom = poly(INVERTED_SHELL, &[]);
        assert_invalid(
            strict(),
            &geom,
            ErrorKind::DisconnectedInterior,
            Some(c(5.0, 10.0)),
        );
        assert_valid(lenient(), &geom);
    }

    #[test]
    fn test_bow_tie_self_touch() {
        let geom = poly(
            &[
                (0.0, 0.0),
                (5.0, 5.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (5.0, 5.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ],
            &[],
        );
        assert_invalid(
            lenient(),
            &geom,
            ErrorKind::DisconnectedInterior,
            Some(c(5.0, 5.0)),
        );
        assert_invalid(
            strict(),
            &geom,
            ErrorKind::DisconnectedInterior,
            Some(c(5.0, 5.0)),
        );
    }

    #[test]
    fn test_exverted_hole() {
        let geom = poly(
            SQUARE_PTS,
            &[&[
                (5.0, 5.0),
                (3.0, 7.0),
                (2.0, 5.0),
                (3.0, 3.0),
                (5.0, 5.0),
                (7.0, 3.0),
                (8.0, 5.0),
                (7.0, 7.0),
                (5.0, 5.0),
            ]],
        );
        assert_valid(lenient(), &geom);
        assert_invalid(
            strict(),
            &geom,
            ErrorKind::DisconnectedInterior,
            Some(c(5.0, 5.0)),
        );
    }

    #[test]
    fn test_hole_outside_shell() {
        assert_invalid(
            strict(),
            &poly(SQUARE_PTS, &[&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)]]),
            ErrorKind::HoleOutsideShell,
            Some(c(20.0, 20.0)),
        );
        // A hole touching the shell from outside; its first vertex is on the
        // boundary and is skipped.
        assert_invalid(
            strict(),
            &poly(SQUARE_PTS, &[&[(10.0, 5.0), (15.0, 2.0), (15.0, 8.0), (10.0, 5.0)]]),
            ErrorKind::HoleOutsideShell,
            Some(c(15.0, 2.0)),
        );
    }

    #[test]
    fn test_hole_of_empty_shell() {
        let multi = MultiPolygon(vec![
            polygon(SQUARE_PTS, &[]),
            Polygon::new(
                LinearRing::default(),
                vec![ring(&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)])],
            ),
        ]);
        assert_invalid(
            strict(),
            &Geometry::MultiPolygon(multi),
            ErrorKind::HoleOutsideShell,
            Some(c(20.0, 20.0)),
        );
    }

    #[test]
    fn test_nested_holes() {
        assert_invalid(
            strict(),
            &poly(
                SQUARE_PTS,
                &[
                    &[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)],
                    &[(3.0, 3.0), (5.0, 3.0), (5.0, 5.0), (3.0, 3.0)],
                ],
            ),
            ErrorKind::NestedHoles,
            Some(c(3.0, 3.0)),
        );
    }

    #[test]
    fn test_nested_shells() {
        let inner: &[(f64, f64)] = &[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)];
        let nested = MultiPolygon(vec![polygon(SQUARE_PTS, &[]), polygon(inner, &[])]);
        assert_invalid(
            strict(),
            &Geometry::MultiPolygon(nested),
            ErrorKind::NestedShells,
            Some(c(2.0, 2.0)),
        );

        // An island inside a hole of the other element.
        let island = MultiPolygon(vec![
            polygon(
                SQUARE_PTS,
                &[&[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)]],
            ),
            polygon(inner, &[]),
        ]);
        assert_valid(strict(), &Geometry::MultiPolygon(island));

        // The outer element's hole is elsewhere, so the inner shell is still
        // inside its interior.
        let beside_hole = MultiPolygon(vec![
            polygon(
                SQUARE_PTS,
                &[&[(6.0, 6.0), (8.0, 6.0), (8.0, 8.0), (6.0, 8.0), (6.0, 6.0)]],
            ),
            polygon(inner, &[]),
        ]);
        assert_invalid(
            strict(),
            &Geometry::MultiPolygon(beside_hole),
            ErrorKind::NestedShells,
            Some(c(2.0, 2.0)),
        );
    }

    #[test]
    fn test_multi_polygon_touching_elements() {
        let multi = MultiPolygon(vec![
            polygon(SQUARE_PTS, &[]),
            polygon(
                &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0), (10.0, 10.0)],
                &[],
            ),
        ]);
        assert_valid(strict(), &Geometry::MultiPolygon(multi));

        // Elements with holes touching each other at two corners. Their rings
        // get touch nodes, but touches across elements are not linked.
        let notched = MultiPolygon(vec![
            polygon(
                SQUARE_PTS,
                &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]],
            ),
            polygon(
                &[
                    (10.0, 0.0),
                    (20.0, 0.0),
                    (20.0, 10.0),
                    (10.0, 10.0),
                    (15.0, 5.0),
                    (10.0, 0.0),
                ],
                &[&[(16.0, 2.0), (18.0, 2.0), (18.0, 4.0), (16.0, 4.0), (16.0, 2.0)]],
            ),
        ]);
        let notched = Geometry::MultiPolygon(notched);
        assert_valid(strict(), &notched);
        assert_valid(lenient(), &notched);

        let overlapping = MultiPolygon(vec![
            polygon(SQUARE_PTS, &[]),
            polygon(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)], &[]),
        ]);
        assert_invalid(
            strict(),
            &Geometry::MultiPolygon(overlapping),
            ErrorKind::SelfIntersection,
            None,
        );
    }

    #[test]
    fn test_collection_reports_first_invalid_element() {
        let collection = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Point(Point::new(0.0, 0.0)),
            Geometry::GeometryCollection(GeometryCollection(vec![
                Geometry::LineString(LineString::from(vec![(1.0, 1.0), (1.0, 1.0)])),
            ])),
            poly(SQUARE_PTS, &[&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)]]),
        ]));
        assert_invalid(
            strict(),
            &collection,
            ErrorKind::TooFewPoints,
            Some(c(1.0, 1.0)),
        );
        assert!(!is_valid(&collection).unwrap());
    }

    #[test]
    fn test_deeply_nested_collection() {
        let mut geom = Geometry::Point(Point::new(f64::NAN, 0.0));
        for _ in 0..100_000 {
            geom = Geometry::GeometryCollection(GeometryCollection(vec![geom]));
        }
        let err = ValidityChecker::new().validation_error(&geom).unwrap().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidCoordinate);
    }

    #[test]
    fn test_find_hole_outside_point_uses_locator() {
        struct Everywhere(Location);
        impl PointLocator for Everywhere {
            fn locate(&self, _: Coord) -> Location {
                self.0
            }
        }
        let hole = coords(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        assert_eq!(
            find_hole_outside_point(&hole, &Everywhere(Location::Exterior)),
            Some(c(1.0, 1.0))
        );
        assert_eq!(find_hole_outside_point(&hole, &Everywhere(Location::Interior)), None);
        assert_eq!(find_hole_outside_point(&hole, &Everywhere(Location::Boundary)), None);
    }
}
