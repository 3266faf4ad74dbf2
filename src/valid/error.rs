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

use thiserror::Error;

use crate::valid::geometry::Coord;

/// ValidityError represents internal faults raised while checking a
/// geometry. A geometry that breaks a validity rule is not an error in this
/// sense; it is reported as a [`TopologyValidationError`] value instead.
///
/// [`TopologyValidationError`]: crate::valid::validity::TopologyValidationError
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidityError {
    /// A segment endpoint located on a ring boundary does not lie on any
    /// segment of that ring.
    #[error("segment vertex ({}, {}) does not intersect ring", .0.x, .0.y)]
    SegmentVertexNotOnRing(Coord),

    /// A ring has no vertex distinct from the given one.
    #[error("ring has no vertex distinct from ({}, {})", .0.x, .0.y)]
    DegenerateRing(Coord),
}

/// Result type for validity operations.
pub type ValidityResult<T> = Result<T, ValidityError>;
