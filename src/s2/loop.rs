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

use std::f64::consts::PI;
use std::fmt;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use cgmath::Matrix3;
use lazy_static::lazy_static;

use crate::r1;
use crate::r3::vector::Vector;
use crate::s1;
use crate::s1::angle::Angle;
use crate::s2::cap::Cap;
use crate::s2::edge_crosser::EdgeCrosser;
use crate::s2::edge_crossings::angle_contains_vertex;
use crate::s2::encoding::{write_bool, write_len, write_point, ENCODING_VERSION};
use crate::s2::error::{S2Error, S2Result};
use crate::s2::latlng::LatLng;
use crate::s2::point::{get_frame, regular_points_for_frame, Point, ORIGIN};
use crate::s2::rect::Rect;
use crate::s2::rect_bounder::{expand_for_subregions, RectBounder};
use crate::s2::region::Region;
use crate::s2::shape::{Chain, ChainPosition, Dimension, Edge, Shape};

lazy_static! {
    // These two points are used for the special Empty and Full loops.
    static ref EMPTY_LOOP_POINT: Point = Point(Vector::new(0., 0., 1.));
    static ref FULL_LOOP_POINT: Point = Point(Vector::new(0., 0., -1.));
}

/// Loop represents a simple spherical polygon. It consists of a sequence
/// of vertices where the first vertex is implicitly connected to the
/// last. All loops are defined to have a CCW orientation, i.e. the interior of
/// the loop is on the left side of the edges. This implies that a clockwise
/// loop enclosing a small area is interpreted to be a CCW loop enclosing a
/// very large area.
///
/// Loops are not allowed to have any duplicate vertices (whether adjacent or
/// not). Non-adjacent edges are not allowed to intersect, and furthermore edges
/// of length 180 degrees are not allowed (i.e., adjacent vertices cannot be
/// antipodal). Loops must have at least 3 vertices (except for the "empty" and
/// "full" loops discussed below).
///
/// There are two special loops: the "empty" loop contains no points and the
/// "full" loop contains all points. These loops do not have any edges, but to
/// preserve the invariant that every loop can be represented as a vertex
/// chain, they are defined as having exactly one vertex each (see Loop::empty
/// and Loop::full).
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loop {
    /// The vertices of the loop. These should be ordered counterclockwise
    /// around the loop interior.
    vertices: Vec<Point>,

    /// origin_inside keeps a precomputed value whether this loop contains the origin
    /// versus computing from the set of vertices every time.
    origin_inside: bool,

    /// depth is the nesting depth of this Loop if it is contained by a Polygon
    /// or other shape and is used to determine if this loop represents a hole
    /// or a filled in portion.
    depth: i32,

    /// bound is a conservative bound on all points contained by this loop.
    /// If l.contains_point(P), then l.bound.contains_point(P).
    bound: Rect,

    /// Since bound is not exact, it is possible that a loop A contains
    /// another loop B whose bounds are slightly larger. subregion_bound
    /// has been expanded sufficiently to account for this error, i.e.
    /// if A.contains(B), then A.subregion_bound.contains(B.bound).
    subregion_bound: Rect,
}

impl fmt::Debug for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Loop(empty)");
        }
        if self.is_full() {
            return write!(f, "Loop(full)");
        }
        write!(f, "Loop(depth={}, [", self.depth)?;
        for (i, v) in self.vertices.iter().enumerate() {
            let ll = LatLng::from(v);
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.7}:{:.7}", ll.lat.deg(), ll.lng.deg())?;
        }
        write!(f, "])")
    }
}

impl Loop {
    /// from_points constructs a loop from the given points. An empty vector
    /// gives the empty loop.
    pub fn from_points(pts: Vec<Point>) -> Self {
        if pts.is_empty() {
            return Loop::empty();
        }
        let mut l = Loop {
            vertices: pts,
            origin_inside: false,
            depth: 0,
            bound: Rect::empty(),
            subregion_bound: Rect::empty(),
        };
        l.init_origin_and_bound();
        l
    }

    /// empty returns a special "empty" loop.
    pub fn empty() -> Self {
        Loop {
            vertices: vec![*EMPTY_LOOP_POINT],
            origin_inside: false,
            depth: 0,
            bound: Rect::empty(),
            subregion_bound: Rect::empty(),
        }
    }

    /// full returns a special "full" loop.
    pub fn full() -> Self {
        Loop {
            vertices: vec![*FULL_LOOP_POINT],
            origin_inside: true,
            depth: 0,
            bound: Rect::full(),
            subregion_bound: Rect::full(),
        }
    }

    /// regular_loop creates a loop with the given number of vertices, all
    /// located on a circle of the specified radius around the given center.
    pub fn regular_loop(center: Point, radius: Angle, num_vertices: usize) -> Self {
        Loop::regular_loop_for_frame(&get_frame(&center), radius, num_vertices)
    }

    /// regular_loop_for_frame creates a loop centered at the z-axis of the given
    /// coordinate frame, with the specified angular radius and number of vertices.
    pub fn regular_loop_for_frame(
        frame: &Matrix3<f64>,
        radius: Angle,
        num_vertices: usize,
    ) -> Self {
        Loop::from_points(regular_points_for_frame(frame, radius, num_vertices))
    }

    /// init_origin_and_bound sets the origin containment for the given point and then calls
    /// the initialization for the bounds objects.
    fn init_origin_and_bound(&mut self) {
        if self.vertices.len() < 3 {
            // Check for the special "empty" and "full" loops (which have one vertex).
            if !self.is_empty_or_full() {
                self.origin_inside = false;
                return;
            }

            // This is the special empty or full loop, so the origin depends on if
            // the vertex is in the southern hemisphere or not.
            self.origin_inside = self.vertices[0].0.z < 0.;
        } else {
            // The brute force point containment algorithm works by counting edge
            // crossings starting at a fixed reference point (chosen as ORIGIN
            // for historical reasons). Loop initialization would be more efficient
            // if we used a loop vertex such as vertex(0) as the reference point
            // instead, however origin_inside is part of the encoding.
            //
            // In any case, we initialize origin_inside by first guessing that it is
            // outside, and then seeing whether we get the correct containment result
            // for vertex 1. If the result is incorrect, the origin must be inside
            // the loop instead. Note that the Loop is not necessarily valid and so
            // we need to check the requirements of angle_contains_vertex first.
            let v1_inside = self.vertex(0) != self.vertex(1)
                && self.vertex(2) != self.vertex(1)
                && angle_contains_vertex(&self.vertex(0), &self.vertex(1), &self.vertex(2));

            self.origin_inside = false;
            if v1_inside != self.brute_force_contains_point(&self.vertex(1)) {
                self.origin_inside = true;
            }
        }

        self.init_bound();
    }

    /// init_bound sets up the approximate bounding Rects for this loop.
    fn init_bound(&mut self) {
        // Check for the special "empty" and "full" loops.
        if self.is_empty_or_full() {
            self.bound = if self.is_empty() {
                Rect::empty()
            } else {
                Rect::full()
            };
            self.subregion_bound = self.bound;
            return;
        }

        // The bounding rectangle of a loop is not necessarily the same as the
        // bounding rectangle of its vertices. First, the maximal latitude may be
        // attained along the interior of an edge. Second, the loop may wrap
        // entirely around the sphere (e.g. a loop that defines two revolutions of a
        // candy-cane stripe). Third, the loop may include one or both poles.
        // Note that a small clockwise loop near the equator contains both poles.
        let mut bounder = RectBounder::new();
        for i in 0..=self.vertices.len() {
            // add vertex 0 twice
            bounder.add_point(&self.vertex(i));
        }
        let mut b = bounder.get_bound();

        if self.brute_force_contains_point(&Point(Vector::new(0., 0., 1.))) {
            b = Rect {
                lat: r1::interval::Interval::new(b.lat.lo, PI / 2.),
                lng: s1::interval::FULL,
            };
        }
        // If a loop contains the south pole, then either it wraps entirely
        // around the sphere (full longitude range), or it also contains the
        // north pole in which case b.lng.is_full() due to the test above.
        // Either way, we only need to do the south pole containment test if
        // b.lng.is_full().
        if b.lng.is_full() && self.brute_force_contains_point(&Point(Vector::new(0., 0., -1.))) {
            b.lat.lo = -PI / 2.;
        }
        self.bound = b;
        self.subregion_bound = expand_for_subregions(&self.bound);
    }

    /// is_empty reports whether this is the special empty loop that contains no points.
    pub fn is_empty(&self) -> bool {
        self.is_empty_or_full() && !self.origin_inside
    }

    /// is_full reports whether this is the special full loop that contains all points.
    pub fn is_full(&self) -> bool {
        self.is_empty_or_full() && self.origin_inside
    }

    /// is_empty_or_full reports whether this loop is either the "empty" or "full" special loops.
    pub fn is_empty_or_full(&self) -> bool {
        self.vertices.len() == 1
    }

    /// vertex returns the vertex for the given index. For convenience, the vertex indices
    /// wrap automatically for methods that do index math such as edge.
    /// i.e., vertex(num_edges() + n) is the same as vertex(n).
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i % self.vertices.len()]
    }

    /// vertices returns the vertices in the loop.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// num_vertices returns the number of the vertices in this loop.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// depth returns the nesting depth of this loop within its polygon.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    /// is_hole reports whether this loop represents a hole in its containing polygon.
    pub fn is_hole(&self) -> bool {
        self.depth & 1 != 0
    }

    /// sign returns -1 if this Loop represents a hole in its containing polygon, and +1 otherwise.
    pub fn sign(&self) -> i32 {
        if self.is_hole() {
            -1
        } else {
            1
        }
    }

    /// subregion_bound returns the bound expanded so that it contains the bound
    /// of any loop this loop contains.
    pub fn subregion_bound(&self) -> Rect {
        self.subregion_bound
    }

    /// brute_force_contains_point reports if the given point is contained by this loop.
    /// This method does not use an index, and counts edge crossings along the
    /// segment from ORIGIN to p.
    pub fn brute_force_contains_point(&self, p: &Point) -> bool {
        // Loops with fewer than 3 vertices have no edges to cross.
        if self.vertices.len() < 3 {
            return self.origin_inside;
        }

        let mut inside = self.origin_inside;
        let mut crosser = EdgeCrosser::new_chain(&ORIGIN, p, &self.vertex(0));
        for i in 1..=self.vertices.len() {
            // add vertex 0 twice
            inside ^= crosser.edge_or_vertex_chain_crossing(&self.vertex(i));
        }
        inside
    }

    /// find_validation_error_no_index reports whether this is not a valid loop, but
    /// skips checks that would require an index to be built for the loop. This
    /// is primarily used by Polygon to do validation so it doesn't trigger the
    /// creation of unneeded indices.
    pub fn find_validation_error_no_index(&self) -> S2Result<()> {
        // All vertices must be unit length.
        if let Some(i) = self.vertices.iter().position(|v| !v.is_unit()) {
            return Err(S2Error::InvalidLoop(format!(
                "vertex {} is not unit length",
                i
            )));
        }

        // Loops must have at least 3 vertices (except for empty and full).
        if self.vertices.len() < 3 {
            if self.is_empty_or_full() {
                // Skip remaining tests.
                return Ok(());
            }
            return Err(S2Error::InvalidLoop(
                "non-empty, non-full loops must have at least 3 vertices".to_string(),
            ));
        }

        // Loops are not allowed to have any duplicate vertices or edge crossings.
        // We split this check into two parts. First we check that no edge is
        // degenerate (identical endpoints). Then we check that there are no
        // intersections between non-adjacent edges (including at vertices). The
        // second check needs an index, so it does not fall within the scope
        // of this method.
        let n = self.vertices.len();
        for i in 0..n {
            if self.vertex(i) == self.vertex(i + 1) {
                return Err(S2Error::InvalidLoop(format!(
                    "edge {} is degenerate (duplicate vertex)",
                    i
                )));
            }

            // Antipodal vertices are not allowed.
            if self.vertex(i) == -self.vertex(i + 1) {
                return Err(S2Error::InvalidLoop(format!(
                    "vertices {} and {} are antipodal",
                    i,
                    (i + 1) % n
                )));
            }
        }

        Ok(())
    }

    /// validate checks the loop for the errors find_validation_error_no_index detects.
    pub fn validate(&self) -> S2Result<()> {
        self.find_validation_error_no_index()
    }

    /// encode writes the lossless encoding of the loop: the version, the vertex
    /// count, the vertices, origin containment, depth, and the bound.
    pub fn encode<W: Write>(&self, w: &mut W) -> S2Result<()> {
        w.write_i8(ENCODING_VERSION)?;
        write_len(w, self.vertices.len())?;
        for v in &self.vertices {
            write_point(w, v)?;
        }
        write_bool(w, self.origin_inside)?;
        w.write_i32::<LittleEndian>(self.depth)?;
        self.bound.encode(w)
    }
}

impl Region for Loop {
    /// cap_bound returns a bounding cap that may have more padding than the corresponding
    /// rect_bound. The bound is conservative such that if the loop contains a point P,
    /// the bound also contains it.
    fn cap_bound(&self) -> Cap {
        self.bound.cap_bound()
    }

    /// rect_bound returns a tight bounding rectangle. If the loop contains the point,
    /// the bound also contains it.
    fn rect_bound(&self) -> Rect {
        self.bound
    }

    /// contains_point returns true if the loop contains the point.
    fn contains_point(&self, p: &Point) -> bool {
        if !self.bound.contains_point(p) {
            return false;
        }
        self.brute_force_contains_point(p)
    }
}

impl Shape for Loop {
    fn num_edges(&self) -> usize {
        if self.is_empty_or_full() {
            0
        } else {
            self.vertices.len()
        }
    }

    fn edge(&self, e: usize) -> Edge {
        Edge {
            v0: self.vertex(e),
            v1: self.vertex(e + 1),
        }
    }

    fn contains_origin(&self) -> bool {
        self.origin_inside
    }

    fn num_chains(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            1
        }
    }

    fn chain(&self, _chain_id: usize) -> Chain {
        Chain {
            start: 0,
            length: self.num_edges(),
        }
    }

    fn chain_edge(&self, _chain_id: usize, offset: usize) -> Edge {
        self.edge(offset)
    }

    fn chain_position(&self, edge_id: usize) -> ChainPosition {
        ChainPosition {
            chain_id: 0,
            offset: edge_id,
        }
    }

    fn dimension(&self) -> Dimension {
        Dimension::PolygonGeometry
    }
}
