// Copyright 2023 Google Inc. All rights reserved.
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

use crate::s2::point::{Point, ORIGIN};
use crate::s2::polygon::Polygon;
use crate::s2::r#loop::Loop;

/// Edge represents a geodesic edge consisting of two vertices. Zero-length edges are
/// allowed, and can be used to represent points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub v0: Point,
    pub v1: Point,
}

/// Chain represents a range of edge IDs corresponding to a chain of connected
/// edges, specified as a (start, length) pair. The chain is defined to consist of
/// edge IDs {start, start + 1, ..., start + length - 1}.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chain {
    pub start: usize,
    pub length: usize,
}

/// ChainPosition represents the position of an edge within a given edge chain,
/// specified as a (chain_id, offset) pair. Chains are numbered sequentially
/// starting from zero, and offsets are measured from the start of each chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainPosition {
    pub chain_id: usize,
    pub offset: usize,
}

/// ReferencePoint consists of a point and a boolean indicating whether the point
/// is contained by a particular shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePoint {
    pub point: Point,
    pub contained: bool,
}

impl ReferencePoint {
    /// origin returns a ReferencePoint with the given value for
    /// contained and the origin point. It should be used when all points
    /// or no points are contained.
    pub fn origin(contained: bool) -> Self {
        ReferencePoint {
            point: ORIGIN,
            contained,
        }
    }
}

/// Dimension defines the types of geometry dimensions that a Shape supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    PointGeometry,
    PolylineGeometry,
    PolygonGeometry,
}

/// Shape represents polygonal geometry in a flexible way. It is organized as a
/// collection of edges that optionally defines an interior. All geometry
/// represented by a given Shape must have the same dimension, which means that
/// a Shape can represent either a set of points, a set of polylines, or a set
/// of polygons.
///
/// Shape is defined as a trait in order to give clients control over the
/// underlying data representation. Sometimes a Shape does not have any data of
/// its own, but instead wraps some other type.
///
/// The edges of a Shape are indexed by a contiguous range of edge IDs
/// starting at 0. The edges are further subdivided into chains, where each
/// chain consists of a sequence of edges connected end-to-end (a polyline).
/// For example, a Shape representing two polylines AB and CDE would have
/// three edges (AB, CD, DE) grouped into two chains: (AB) and (CD, DE).
/// Similarly, a Shape representing 5 points would have 5 chains consisting
/// of one edge each.
///
/// Edge and chain IDs outside the valid range are caller errors; implementations
/// index directly and may panic.
#[enum_delegate::register]
pub trait Shape {
    /// num_edges returns the number of edges in this shape.
    fn num_edges(&self) -> usize;

    /// edge returns the edge for the given edge index.
    fn edge(&self, e: usize) -> Edge;

    /// contains_origin reports whether this shape contains the origin reference point.
    fn contains_origin(&self) -> bool;

    /// num_chains reports the number of contiguous edge chains in the shape.
    /// For example, a shape whose edges are [AB, BC, CD, AE, EF] would consist
    /// of two chains (AB,BC,CD and AE,EF). Every chain is assigned a chain id
    /// numbered sequentially starting from zero.
    ///
    /// Note that it is always acceptable to implement this method by returning
    /// num_edges, i.e. every chain consists of a single edge, but this may
    /// reduce the efficiency of some algorithms.
    fn num_chains(&self) -> usize;

    /// chain returns the range of edge IDs corresponding to the given edge chain.
    /// Edge chains must form contiguous, non-overlapping ranges that cover
    /// the entire range of edge IDs. This is spelled out more formally below:
    ///
    /// ```text
    ///  0 <= i < num_chains()
    ///  chain(i).length > 0, for all i
    ///  chain(0).start == 0
    ///  chain(i).start + chain(i).length == chain(i+1).start, for i < num_chains()-1
    ///  chain(i).start + chain(i).length == num_edges(), for i == num_chains()-1
    /// ```
    fn chain(&self, chain_id: usize) -> Chain;

    /// chain_edge returns the edge at offset "o" within the edge chain "chain_id".
    /// Equivalent to "edge(chain(chain_id).start + o)" but more efficient.
    fn chain_edge(&self, chain_id: usize, offset: usize) -> Edge;

    /// chain_position finds the chain containing the given edge, and returns the
    /// position of that edge as a ChainPosition(chain_id, offset) pair.
    ///
    /// ```text
    ///  shape.chain(pos.chain_id).start + pos.offset == edge_id
    ///  shape.chain(pos.chain_id + 1).start > edge_id
    /// ```
    ///
    /// where pos == shape.chain_position(edge_id).
    fn chain_position(&self, edge_id: usize) -> ChainPosition;

    /// dimension returns the dimension of the geometry represented by this shape,
    /// either PointGeometry, PolylineGeometry or PolygonGeometry.
    ///
    ///  - PointGeometry: Each point is represented as a degenerate edge.
    ///  - PolylineGeometry: Polyline edges may be degenerate. A shape may
    ///    represent any number of polylines. Polylines edges may intersect.
    ///  - PolygonGeometry: Edges should be oriented such that the polygon
    ///    interior is always on the left.
    fn dimension(&self) -> Dimension;

    /// has_interior reports whether this shape has an interior.
    fn has_interior(&self) -> bool {
        self.dimension() == Dimension::PolygonGeometry
    }

    /// reference_point returns an arbitrary reference point for the shape. (The
    /// containment boolean value must be false for shapes that do not have an interior.)
    ///
    /// This reference point may then be used to compute the containment of other
    /// points by counting edge crossings.
    fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::origin(self.contains_origin())
    }

    /// is_empty reports whether the shape contains no points.
    fn is_empty(&self) -> bool {
        self.num_edges() == 0 && (!self.has_interior() || !self.reference_point().contained)
    }

    /// is_full reports whether the shape contains all points on the sphere.
    fn is_full(&self) -> bool {
        self.num_edges() == 0 && self.has_interior() && self.reference_point().contained
    }
}

/// ShapeType holds any of the concrete shapes so that consumers such as a
/// spatial index can store them together.
#[enum_delegate::implement(Shape)]
#[derive(Clone, Debug)]
pub enum ShapeType {
    Polygon(Polygon),
    Loop(Loop),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s2::test_util::make_loop;

    #[test]
    fn test_reference_point_origin() {
        let r = ReferencePoint::origin(true);
        assert_eq!(r.point, ORIGIN);
        assert!(r.contained);
    }

    #[test]
    fn test_shape_type_delegates() {
        let l = make_loop("0:0, 0:10, 10:0");
        let shapes: Vec<ShapeType> = vec![
            ShapeType::Loop(l.clone()),
            ShapeType::Polygon(Polygon::from_loops(vec![l])),
            ShapeType::Polygon(Polygon::full()),
            ShapeType::Polygon(Polygon::empty()),
        ];

        let edges: Vec<usize> = shapes.iter().map(|s| s.num_edges()).collect();
        assert_eq!(edges, vec![3, 3, 0, 0]);
        assert!(shapes.iter().all(|s| s.dimension() == Dimension::PolygonGeometry));
        assert!(shapes.iter().all(|s| s.has_interior()));
        assert!(Shape::is_full(&shapes[2]));
        assert!(Shape::is_empty(&shapes[3]));
        assert!(!Shape::is_empty(&shapes[1]) && !Shape::is_full(&shapes[1]));
        assert_eq!(shapes[0].edge(1), shapes[1].edge(1));
    }
}
