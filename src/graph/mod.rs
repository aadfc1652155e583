// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
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

//! The route graph (spec.md §3, `Graph G = (V, E)`).
//!
//! `efb` has no graph library of its own — its routes are a flat `Vec<Leg>`
//! built by walking `route::token::Tokens` directly — because its airways
//! are never expanded by shortest-path search. This crate's airway/SID/STAR
//! expansion (spec.md §4.2.3) genuinely needs a directed multigraph with
//! Dijkstra over filtered edge predicates, so it reaches for `petgraph`
//! (see DESIGN.md and SPEC_FULL.md §10.5) the way `judemille-xputils`'s
//! `navdata::airways` module builds its `petgraph::Graph<NavEntry, NavEdge>`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::Directed;

use std::rc::Rc;

use crate::core::VerticalDistance;
use crate::geom::Coordinate;
use crate::measurements::{Angle, Length, LengthUnit};
use crate::nd::{DesignatedPoint, NavEntity, ObjectKind, Region, TypeMask, WaypointUsage};

/// Which object produced an edge, mirroring spec.md §3's "identity of the
/// containing airway/SID/STAR" and the synthesized-helper/DCT cases.
#[derive(Clone, PartialEq, Debug)]
pub enum EdgeOwner {
    Airway(String),
    Sid(String),
    Star(String),
    /// A direct (DCT) leg outside any airway.
    Direct,
    /// A synthesized helper edge used only to seed Dijkstra when no
    /// admissible edge exists yet (spec.md §4.2.3); always `ident == "-"`
    /// and `solution == 2`, removed before the graph is exposed externally.
    Helper,
}

/// One flyable segment: a route segment of an airway, a departure leg of a
/// SID, an arrival leg of a STAR, or a synthesized helper/DCT edge.
#[derive(Clone, PartialEq, Debug)]
pub struct Edge {
    pub owner: EdgeOwner,
    /// The airway designator this edge belongs to, or `"-"` for a helper or
    /// DCT edge (spec.md §3).
    pub ident: String,
    pub distance: Length,
    pub bearing: Angle,
    pub lower: VerticalDistance,
    pub upper: VerticalDistance,
    pub bidirectional: bool,
    /// Scratch field used by filtered views: `0` = not yet considered, `1`
    /// = part of the current Dijkstra run, `2` = synthesized helper to be
    /// deleted after use (spec.md §3). The base spec's design notes (§9)
    /// flag this as better expressed as a predicate; this crate keeps the
    /// field only on helper edges so they can be found and swept, and never
    /// mutates it on a "considered" edge — every other filtered view is a
    /// predicate passed to [`RouteGraph::dijkstra_filtered`].
    pub solution: u8,
}

impl Edge {
    pub fn airway(ident: impl Into<String>, distance: Length, bearing: Angle, lower: VerticalDistance, upper: VerticalDistance) -> Self {
        Self {
            owner: EdgeOwner::Airway(ident.into()),
            ident: String::new(),
            distance,
            bearing,
            lower,
            upper,
            bidirectional: true,
            solution: 0,
        }
        .with_ident_from_owner()
    }

    pub fn sid(ident: impl Into<String>, distance: Length, bearing: Angle, lower: VerticalDistance, upper: VerticalDistance) -> Self {
        Self {
            owner: EdgeOwner::Sid(ident.into()),
            ident: String::new(),
            distance,
            bearing,
            lower,
            upper,
            bidirectional: false,
            solution: 0,
        }
        .with_ident_from_owner()
    }

    pub fn star(ident: impl Into<String>, distance: Length, bearing: Angle, lower: VerticalDistance, upper: VerticalDistance) -> Self {
        Self {
            owner: EdgeOwner::Star(ident.into()),
            ident: String::new(),
            distance,
            bearing,
            lower,
            upper,
            bidirectional: false,
            solution: 0,
        }
        .with_ident_from_owner()
    }

    pub fn direct(distance: Length, bearing: Angle) -> Self {
        Self {
            owner: EdgeOwner::Direct,
            ident: "-".to_string(),
            distance,
            bearing,
            lower: VerticalDistance::Gnd,
            upper: VerticalDistance::Unlimited,
            bidirectional: true,
            solution: 0,
        }
    }

    /// A synthesized helper edge (spec.md §4.2.3): distance proportional to
    /// the great-circle distance between the endpoints, never offered
    /// outside the Dijkstra run that created it.
    pub fn helper(distance: Length, bearing: Angle) -> Self {
        Self {
            owner: EdgeOwner::Helper,
            ident: "-".to_string(),
            distance,
            bearing,
            lower: VerticalDistance::Gnd,
            upper: VerticalDistance::Unlimited,
            bidirectional: false,
            solution: 2,
        }
    }

    fn with_ident_from_owner(mut self) -> Self {
        self.ident = match &self.owner {
            EdgeOwner::Airway(s) | EdgeOwner::Sid(s) | EdgeOwner::Star(s) => s.clone(),
            EdgeOwner::Direct | EdgeOwner::Helper => "-".to_string(),
        };
        self
    }

    /// Whether this edge is a synthesized helper (spec.md §3 invariant:
    /// "helper edges are removed before a graph is exposed externally").
    pub fn is_helper(&self) -> bool {
        self.solution == 2
    }
}

/// A navigation point usable as a graph vertex: airport, navaid, designated
/// point or user fix (spec.md §3).
#[derive(Clone, PartialEq, Debug)]
pub struct Vertex {
    pub ident: String,
    pub coord: Coordinate,
    pub kind: ObjectKind,
    pub type_mask: TypeMask,
    pub entity: NavEntity,
}

/// Identifies a vertex's underlying database object for the "at most once
/// per object" invariant (spec.md §3). Within a single parse the reference
/// time is fixed, so `(kind, ident)` stands in for the `(object-UUID,
/// reference-time)` pair the base spec describes — see DESIGN.md.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct VertexKey(ObjectKind, String);

/// The directed multigraph of navigation points and the flyable segments
/// between them (spec.md §3).
#[derive(Default)]
pub struct RouteGraph {
    graph: Graph<Vertex, Edge, Directed>,
    by_key: HashMap<VertexKey, NodeIndex>,
    /// The canonical vertex for a given ident, first-writer-wins. Airway/
    /// SID/STAR segments in the navigation database (`nd::airway`) name
    /// their endpoints by ident alone, with no back-reference to the
    /// `NavEntity` that may already have a vertex for the same fix — this
    /// index is what lets [`RouteGraph::find_or_insert_fix`] land a segment
    /// endpoint on the very same vertex a waypoint candidate was bound to in
    /// [`super::fp::ParseState::resolve_waypoint`], rather than a
    /// disconnected duplicate.
    by_ident: HashMap<String, NodeIndex>,
    /// Every vertex index known to participate in a named airway, SID or
    /// STAR, keyed by ident — used to seed helper edges (spec.md §4.2.3).
    airway_vertices: HashMap<String, Vec<NodeIndex>>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the canonical vertex for `entity`, inserting it if this is
    /// the first time it has been seen in this graph (spec.md §3,
    /// `find_vertex`).
    pub fn find_vertex(&mut self, entity: NavEntity) -> Option<NodeIndex> {
        let coord = entity.coordinate()?;
        let key = VertexKey(entity.kind(), entity.ident().to_string());

        if let Some(&idx) = self.by_key.get(&key) {
            return Some(idx);
        }

        let vertex = Vertex {
            ident: entity.ident().to_string(),
            coord,
            kind: entity.kind(),
            type_mask: entity.type_mask(),
            entity,
        };
        let idx = self.graph.add_node(vertex);
        self.by_key.insert(key, idx);
        self.by_ident.entry(self.graph[idx].ident.clone()).or_insert(idx);
        Some(idx)
    }

    /// Returns the canonical vertex for `ident`, regardless of which object
    /// kind first registered it.
    pub fn vertex_by_ident(&self, ident: &str) -> Option<NodeIndex> {
        self.by_ident.get(ident).copied()
    }

    /// Returns the canonical vertex for `ident`, inserting a bare
    /// [`DesignatedPoint`] vertex at `coord` if no airport/navaid/point
    /// lookup has already claimed that ident (spec.md §3, airway-segment
    /// endpoints named only by ident in `nd::airway::RouteSegment`).
    pub fn find_or_insert_fix(&mut self, ident: &str, coord: Coordinate) -> NodeIndex {
        if let Some(&idx) = self.by_ident.get(ident) {
            return idx;
        }
        let entity = NavEntity::Point(Rc::new(DesignatedPoint {
            ident: ident.to_string(),
            coordinate: coord,
            usage: WaypointUsage::HiLoAltitude,
            region: Region::Enroute,
            mag_var: None,
        }));
        let vertex = Vertex {
            ident: ident.to_string(),
            coord,
            kind: ObjectKind::DesignatedPoint,
            type_mask: TypeMask::INTERSECTION,
            entity,
        };
        let idx = self.graph.add_node(vertex);
        self.by_ident.insert(ident.to_string(), idx);
        idx
    }

    pub fn vertex(&self, idx: NodeIndex) -> &Vertex {
        &self.graph[idx]
    }

    /// Records `idx` as participating in the named airway, so it can be
    /// offered as a helper-edge target during expansion.
    pub fn mark_airway_member(&mut self, ident: &str, idx: NodeIndex) {
        let members = self.airway_vertices.entry(ident.to_string()).or_default();
        if !members.contains(&idx) {
            members.push(idx);
        }
    }

    pub fn airway_members(&self, ident: &str) -> &[NodeIndex] {
        self.airway_vertices.get(ident).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: Edge) -> EdgeIndex {
        if let EdgeOwner::Airway(ident) | EdgeOwner::Sid(ident) | EdgeOwner::Star(ident) = &edge.owner {
            let ident = ident.clone();
            self.mark_airway_member(&ident, from);
            self.mark_airway_member(&ident, to);
        }
        let bidirectional = edge.bidirectional;
        let reverse = if bidirectional {
            let mut rev = edge.clone();
            rev.bearing = Angle::deg(edge.bearing.to_si() + 180.0);
            Some(rev)
        } else {
            None
        };
        let added = self.graph.add_edge(from, to, edge);
        if let Some(rev) = reverse {
            self.graph.add_edge(to, from, rev);
        }
        added
    }

    /// Removes every helper edge added since the last sweep (spec.md §3
    /// invariant, §4.2.3 "rerun Dijkstra, record the chain, then delete all
    /// helper edges").
    pub fn remove_helper_edges(&mut self) {
        let helpers: Vec<EdgeIndex> = self
            .graph
            .edge_indices()
            .filter(|&e| self.graph[e].is_helper())
            .collect();
        for e in helpers {
            self.graph.remove_edge(e);
        }
    }

    /// Returns every edge of the named airway connecting two resolved
    /// vertices, used by the base spec's final validation sweep (spec.md
    /// §4.2.3) to confirm a surviving airway segment actually exists.
    pub fn has_direct_edge(&self, from: NodeIndex, to: NodeIndex, predicate: impl Fn(&Edge) -> bool) -> bool {
        self.graph
            .edges_connecting(from, to)
            .any(|e| predicate(e.weight()))
    }

    /// Runs Dijkstra from each of `sources` (with its starting cumulative
    /// distance), considering only edges for which `predicate` returns
    /// true, following this crate's general preference (see `graph/mod.rs`
    /// doc comment, REDESIGN FLAGS §9) for a predicate-driven filtered
    /// subgraph over a mutated scratch field.
    pub fn dijkstra_filtered(
        &self,
        sources: impl IntoIterator<Item = (NodeIndex, f64)>,
        predicate: impl Fn(&Edge) -> bool,
    ) -> DijkstraResult {
        let mut dist: HashMap<NodeIndex, f64> = HashMap::new();
        let mut prev: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
        let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

        for (node, start_dist) in sources {
            let better = dist.get(&node).map(|&d| start_dist < d).unwrap_or(true);
            if better {
                dist.insert(node, start_dist);
                heap.push(HeapEntry { dist: start_dist, node });
            }
        }

        while let Some(HeapEntry { dist: d, node }) = heap.pop() {
            if dist.get(&node).map(|&best| d > best).unwrap_or(true) {
                continue;
            }

            for edge_ref in self.graph.edges(node) {
                let edge = edge_ref.weight();
                if !predicate(edge) {
                    continue;
                }
                let next = edge_ref.target();
                let next_dist = d + edge.distance.convert_to(LengthUnit::NauticalMiles).value().to_owned() as f64;

                let better = dist.get(&next).map(|&best| next_dist < best).unwrap_or(true);
                if better {
                    dist.insert(next, next_dist);
                    prev.insert(next, (node, edge_ref.id()));
                    heap.push(HeapEntry { dist: next_dist, node: next });
                }
            }
        }

        DijkstraResult { dist, prev }
    }

    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.graph[idx]
    }
}

/// The result of a filtered Dijkstra run: cumulative distances (in nautical
/// miles) and, for every reached non-source vertex, the edge it was reached
/// through.
pub struct DijkstraResult {
    dist: HashMap<NodeIndex, f64>,
    prev: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
}

impl DijkstraResult {
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.dist.get(&node).copied()
    }

    /// Reconstructs the vertex chain from a source up to (but not
    /// including) `target`, following spec.md §5's ordering guarantee for
    /// `Path` predecessor chains: index 0 is the vertex nearest `target`.
    pub fn predecessors(&self, target: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = Vec::new();
        let mut current = target;
        while let Some(&(prev_node, _edge)) = self.prev.get(&current) {
            chain.push(prev_node);
            current = prev_node;
        }
        chain
    }

    /// The edges used on the path from a source to `target`, nearest edge
    /// first.
    pub fn edges(&self, target: NodeIndex) -> Vec<EdgeIndex> {
        let mut edges = Vec::new();
        let mut current = target;
        while let Some(&(prev_node, edge)) = self.prev.get(&current) {
            edges.push(edge);
            current = prev_node;
        }
        edges
    }
}

struct HeapEntry {
    dist: f64,
    node: NodeIndex,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap, Dijkstra wants the smallest distance first.
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal)
    }
}
