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

pub mod envelope;
pub mod error;
pub mod geometry;
pub mod nested_hole_tester;
pub mod point_locator;
pub mod polygon_node;
pub mod predicates;
pub mod ring_graph;
pub mod segment_intersection;
pub mod topology_analyzer;
pub mod validity;

#[cfg(test)]
mod test_util;
