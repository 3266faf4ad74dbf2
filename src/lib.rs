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

//! Topological validity checking for planar polygonal geometries.
//!
//! The checker follows the simple-features rules for polygons: rings are
//! closed and have enough distinct points, rings do not cross, holes lie
//! inside their shell and outside each other, multipolygon elements do not
//! nest, and the polygon interior is connected. The first defect found is
//! reported together with a witness coordinate.
//!
//! ```
//! use polyvalid::{ErrorKind, Geometry, LinearRing, Polygon, ValidityChecker};
//!
//! let shell = LinearRing::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
//! let hole = LinearRing::from(vec![(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)]);
//! let polygon = Geometry::Polygon(Polygon::new(shell, vec![hole]));
//!
//! let err = ValidityChecker::new()
//!     .validation_error(&polygon)
//!     .unwrap()
//!     .expect("hole is outside the shell");
//! assert_eq!(err.kind(), ErrorKind::HoleOutsideShell);
//! ```

pub mod valid;

pub use crate::valid::error::{ValidityError, ValidityResult};
pub use crate::valid::geometry::{
    Coord, Geometry, GeometryCollection, GeometryOps, LineString, LinearRing, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use crate::valid::validity::{
    is_valid, validation_error, ErrorKind, TopologyValidationError, ValidityChecker,
};
