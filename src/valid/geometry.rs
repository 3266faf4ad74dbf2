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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coord is a planar coordinate. Two coordinates are equal when both
/// ordinates are exactly equal.
pub type Coord = geo_types::Coord<f64>;

/// GeometryOps is the set of queries shared by every geometry variant.
#[enum_delegate::register]
pub trait GeometryOps {
    /// is_empty reports whether the geometry has no coordinates.
    fn is_empty(&self) -> bool;

    /// num_points returns the number of coordinates in the geometry,
    /// counting repeated and closing points.
    fn num_points(&self) -> usize;

    /// geometry_type returns the simple-features name of the variant.
    fn geometry_type(&self) -> &'static str;
}

/// Point is a single coordinate, or the empty point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub Option<Coord>);

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point(Some(Coord { x, y }))
    }

    pub fn coord(&self) -> Option<Coord> {
        self.0
    }
}

impl GeometryOps for Point {
    fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn num_points(&self) -> usize {
        usize::from(self.0.is_some())
    }

    fn geometry_type(&self) -> &'static str {
        "Point"
    }
}

/// MultiPoint is an unordered set of coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPoint(pub Vec<Coord>);

impl MultiPoint {
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }
}

impl GeometryOps for MultiPoint {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn num_points(&self) -> usize {
        self.0.len()
    }

    fn geometry_type(&self) -> &'static str {
        "MultiPoint"
    }
}

/// LineString is an open or closed sequence of coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineString(pub Vec<Coord>);

impl LineString {
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }
}

impl GeometryOps for LineString {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn num_points(&self) -> usize {
        self.0.len()
    }

    fn geometry_type(&self) -> &'static str {
        "LineString"
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(coords: Vec<Coord>) -> Self {
        LineString(coords)
    }
}

impl From<Vec<(f64, f64)>> for LineString {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        LineString(coords.into_iter().map(|(x, y)| Coord { x, y }).collect())
    }
}

/// LinearRing is a sequence of coordinates which is expected to be closed,
/// i.e. whose first and last coordinates are equal. Closure is not enforced
/// on construction; it is one of the properties the validity checker tests.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearRing(pub Vec<Coord>);

impl LinearRing {
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    /// is_closed reports whether the ring is non-empty and its first and
    /// last coordinates are equal.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// envelope returns the bounding rectangle of the ring, or None if it is empty.
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coords(&self.0)
    }
}

impl GeometryOps for LinearRing {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn num_points(&self) -> usize {
        self.0.len()
    }

    fn geometry_type(&self) -> &'static str {
        "LinearRing"
    }
}

impl From<Vec<Coord>> for LinearRing {
    fn from(coords: Vec<Coord>) -> Self {
        LinearRing(coords)
    }
}

impl From<Vec<(f64, f64)>> for LinearRing {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        LinearRing(coords.into_iter().map(|(x, y)| Coord { x, y }).collect())
    }
}

/// Polygon is a shell ring with zero or more hole rings. A polygon with an
/// empty shell is empty, whatever its holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Polygon {
            exterior,
            interiors,
        }
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// rings returns the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

impl GeometryOps for Polygon {
    fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    fn num_points(&self) -> usize {
        self.rings().map(|r| r.num_points()).sum()
    }

    fn geometry_type(&self) -> &'static str {
        "Polygon"
    }
}

/// MultiPolygon is a set of polygon elements.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }
}

impl GeometryOps for MultiPolygon {
    fn is_empty(&self) -> bool {
        self.0.iter().all(|p| p.is_empty())
    }

    fn num_points(&self) -> usize {
        self.0.iter().map(|p| p.num_points()).sum()
    }

    fn geometry_type(&self) -> &'static str {
        "MultiPolygon"
    }
}

/// GeometryCollection is a heterogeneous, possibly nested, list of geometries.
///
/// Collections may be nested arbitrarily deep, so every traversal in this
/// crate (including drop) walks them with an explicit stack.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometryCollection(pub Vec<Geometry>);

impl GeometryCollection {
    pub fn geometries(&self) -> &[Geometry] {
        &self.0
    }

    /// leaves returns the non-collection geometries in pre-order.
    pub fn leaves(&self) -> Vec<&Geometry> {
        let mut out = Vec::new();
        let mut stack: Vec<&Geometry> = self.0.iter().rev().collect();
        while let Some(g) = stack.pop() {
            match g {
                Geometry::GeometryCollection(gc) => stack.extend(gc.0.iter().rev()),
                other => out.push(other),
            }
        }
        out
    }
}

impl GeometryOps for GeometryCollection {
    fn is_empty(&self) -> bool {
        self.leaves().iter().all(|g| g.is_empty())
    }

    fn num_points(&self) -> usize {
        self.leaves().iter().map(|g| g.num_points()).sum()
    }

    fn geometry_type(&self) -> &'static str {
        "GeometryCollection"
    }
}

impl Drop for GeometryCollection {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.0);
        while let Some(g) = pending.pop() {
            if let Geometry::GeometryCollection(mut gc) = g {
                pending.append(&mut gc.0);
            }
        }
    }
}

/// Geometry is the closed set of geometry variants the validity checker
/// understands.
#[enum_delegate::implement(GeometryOps)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl From<geo_types::Point<f64>> for Point {
    fn from(p: geo_types::Point<f64>) -> Self {
        Point(Some(p.0))
    }
}

impl From<geo_types::MultiPoint<f64>> for MultiPoint {
    fn from(mp: geo_types::MultiPoint<f64>) -> Self {
        MultiPoint(mp.0.into_iter().map(|p| p.0).collect())
    }
}

impl From<geo_types::LineString<f64>> for LineString {
    fn from(ls: geo_types::LineString<f64>) -> Self {
        LineString(ls.0)
    }
}

impl From<geo_types::LineString<f64>> for LinearRing {
    fn from(ls: geo_types::LineString<f64>) -> Self {
        LinearRing(ls.0)
    }
}

impl From<geo_types::Polygon<f64>> for Polygon {
    fn from(p: geo_types::Polygon<f64>) -> Self {
        let (exterior, interiors) = p.into_inner();
        Polygon::new(
            exterior.into(),
            interiors.into_iter().map(LinearRing::from).collect(),
        )
    }
}

impl From<geo_types::MultiPolygon<f64>> for MultiPolygon {
    fn from(mp: geo_types::MultiPolygon<f64>) -> Self {
        MultiPolygon(mp.0.into_iter().map(Polygon::from).collect())
    }
}

impl From<geo_types::Geometry<f64>> for Geometry {
    fn from(g: geo_types::Geometry<f64>) -> Self {
        match g {
            geo_types::Geometry::Point(p) => Geometry::Point(p.into()),
            geo_types::Geometry::Line(l) => Geometry::LineString(LineString(vec![l.start, l.end])),
            geo_types::Geometry::LineString(ls) => Geometry::LineString(ls.into()),
            geo_types::Geometry::Polygon(p) => Geometry::Polygon(p.into()),
            geo_types::Geometry::MultiPoint(mp) => Geometry::MultiPoint(mp.into()),
            geo_types::Geometry::MultiLineString(mls) => {
                Geometry::GeometryCollection(GeometryCollection(
                    mls.0
                        .into_iter()
                        .map(|ls| Geometry::LineString(ls.into()))
                        .collect(),
                ))
            }
            geo_types::Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.into()),
            geo_types::Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(
                GeometryCollection(gc.0.into_iter().map(Geometry::from).collect()),
            ),
            geo_types::Geometry::Rect(r) => Geometry::Polygon(r.to_polygon().into()),
            geo_types::Geometry::Triangle(t) => Geometry::Polygon(t.to_polygon().into()),
        }
    }
}
