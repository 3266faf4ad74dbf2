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

//! The touch graph of the rings of one polygon (or of each polygon of a
//! multipolygon).
//!
//! Every shell and hole which takes part in touch analysis gets a RingNode
//! in an arena owned by the RingTouchGraph. Two rings of the same polygon
//! which share a single boundary point are linked by a TouchEdge. The
//! polygon interior is disconnected if two rings touch more than once, or if
//! the touch edges form a cycle; the first condition is caught while the
//! graph is built, the second by find_touch_cycle_location.

use std::collections::{BTreeMap, VecDeque};

use crate::valid::geometry::Coord;
use crate::valid::polygon_node::is_interior_segment;
use crate::valid::predicates::is_ccw;

/// RingId identifies a ring within its polygon. Shell orders before every
/// hole.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RingId {
    Shell,
    Hole(usize),
}

/// TouchEdge records that a ring touches the peer ring at point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEdge {
    pub peer_id: RingId,
    /// Arena index of the peer ring.
    pub peer: usize,
    pub point: Coord,
}

/// SelfTouchNode is a point where a ring touches itself.
///
/// e00 and e01 are the vertices before and after the node along the first
/// pass of the ring through it, e10 is the vertex before the node on the
/// second pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SelfTouchNode {
    pub point: Coord,
    pub e00: Coord,
    pub e01: Coord,
    pub e10: Coord,
}

impl SelfTouchNode {
    /// is_exterior reports whether the self-touch only pinches the ring from
    /// the outside, leaving the interior around the node in one piece.
    pub fn is_exterior(&self, interior_on_right: bool) -> bool {
        let interior_seg = is_interior_segment(self.point, self.e00, self.e01, self.e10);
        if interior_on_right {
            !interior_seg
        } else {
            interior_seg
        }
    }
}

/// RingNode is one ring of a polygon in the touch graph.
#[derive(Debug, Clone)]
pub struct RingNode<'a> {
    pub id: RingId,
    /// Arena index of the polygon's shell; equal to the node's own index
    /// for a shell.
    pub shell: usize,
    pub coords: &'a [Coord],
    pub touches: BTreeMap<RingId, TouchEdge>,
    pub self_nodes: Vec<SelfTouchNode>,
    touch_tree_root: Option<usize>,
    touch_tree_parent: Option<usize>,
}

impl<'a> RingNode<'a> {
    pub fn is_shell(&self) -> bool {
        self.id == RingId::Shell
    }

    // is_only_touch reports whether point is the only place this ring
    // touches the peer, allowing for a repeat of an already recorded touch.
    fn is_only_touch(&self, peer: RingId, point: Coord) -> bool {
        match self.touches.get(&peer) {
            Some(edge) => edge.point == point,
            None => true,
        }
    }

    /// find_interior_self_node returns the first self-touch of this ring
    /// which disconnects the interior.
    pub fn find_interior_self_node(&self) -> Option<Coord> {
        if self.self_nodes.is_empty() {
            return None;
        }
        let interior_on_right = self.is_shell() ^ is_ccw(self.coords);
        self.self_nodes
            .iter()
            .find(|n| !n.is_exterior(interior_on_right))
            .map(|n| n.point)
    }
}

/// RingTouchGraph is an arena of RingNodes.
#[derive(Debug, Clone, Default)]
pub struct RingTouchGraph<'a> {
    nodes: Vec<RingNode<'a>>,
}

impl<'a> RingTouchGraph<'a> {
    pub fn new() -> Self {
        RingTouchGraph { nodes: Vec::new() }
    }

    fn push(&mut self, id: RingId, shell: Option<usize>, coords: &'a [Coord]) -> usize {
        let index = self.nodes.len();
        self.nodes.push(RingNode {
            id,
            shell: shell.unwrap_or(index),
            coords,
            touches: BTreeMap::new(),
            self_nodes: Vec::new(),
            touch_tree_root: None,
            touch_tree_parent: None,
        });
        index
    }

    /// add_shell adds a polygon shell and returns its arena index.
    pub fn add_shell(&mut self, coords: &'a [Coord]) -> usize {
        self.push(RingId::Shell, None, coords)
    }

    /// add_hole adds hole number index of the polygon whose shell is at
    /// arena index shell, and returns the hole's arena index.
    pub fn add_hole(&mut self, shell: usize, index: usize, coords: &'a [Coord]) -> usize {
        self.push(RingId::Hole(index), Some(shell), coords)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &RingNode<'a> {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[RingNode<'a>] {
        &self.nodes
    }

    /// register_touch records a touch between rings a and b at point. It
    /// returns true if the rings already touch at a different point, which
    /// means the polygon interior is disconnected.
    ///
    /// Absent rings, rings of different polygons and a ring touching itself
    /// are ignored.
    pub fn register_touch(&mut self, a: Option<usize>, b: Option<usize>, point: Coord) -> bool {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if a == b || self.nodes[a].shell != self.nodes[b].shell {
            return false;
        }
        let (a_id, b_id) = (self.nodes[a].id, self.nodes[b].id);
        if !self.nodes[a].is_only_touch(b_id, point) || !self.nodes[b].is_only_touch(a_id, point)
        {
            return true;
        }
        self.nodes[a].touches.insert(
            b_id,
            TouchEdge {
                peer_id: b_id,
                peer: b,
                point,
            },
        );
        self.nodes[b].touches.insert(
            a_id,
            TouchEdge {
                peer_id: a_id,
                peer: a,
                point,
            },
        );
        false
    }

    /// record_self_touch records that ring touches itself at point. e11,
    /// the vertex after the node on the second pass, is not needed to
    /// classify the touch.
    pub fn record_self_touch(
        &mut self,
        ring: usize,
        point: Coord,
        e00: Coord,
        e01: Coord,
        e10: Coord,
        _e11: Coord,
    ) {
        self.nodes[ring].self_nodes.push(SelfTouchNode {
            point,
            e00,
            e01,
            e10,
        });
    }

    /// find_interior_self_touch returns the location of the first recorded
    /// self-touch which disconnects a polygon interior.
    pub fn find_interior_self_touch(&self) -> Option<Coord> {
        self.nodes.iter().find_map(|n| n.find_interior_self_node())
    }

    /// find_touch_cycle_location returns a touch point on a cycle of ring
    /// touches, if there is one.
    pub fn find_touch_cycle_location(&mut self) -> Option<Coord> {
        for node in &mut self.nodes {
            node.touch_tree_root = None;
            node.touch_tree_parent = None;
        }

        let mut queue = VecDeque::new();
        for start in 0..self.nodes.len() {
            if self.nodes[start].touch_tree_root.is_some() {
                continue;
            }
            self.nodes[start].touch_tree_root = Some(start);
            self.nodes[start].touch_tree_parent = Some(start);
            queue.clear();
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                let parent = self.nodes[current].touch_tree_parent;
                let edges: Vec<TouchEdge> = self.nodes[current].touches.values().cloned().collect();
                for edge in edges {
                    if Some(edge.peer) == parent {
                        continue;
                    }
                    let peer = &mut self.nodes[edge.peer];
                    if peer.touch_tree_root == Some(start) && peer.touch_tree_parent != Some(current)
                    {
                        return Some(edge.point);
                    }
                    peer.touch_tree_root = Some(start);
                    peer.touch_tree_parent = Some(current);
                    queue.push_back(edge.peer);
                }
            }
        }
        None
    }
}
