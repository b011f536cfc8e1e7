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

use crate::consts::DBL_EPSILON;
use crate::s2::edge_crossings::{vertex_crossing, Crossing};
use crate::s2::point::Point;
use crate::s2::predicates::{expensive_sign, robust_sign, triage_sign, Direction};

/// EdgeCrosser allows edges to be efficiently tested for intersection with a
/// given fixed edge AB. It is especially efficient when testing for
/// intersection with an edge chain connecting vertices v0, v1, v2, ...
pub struct EdgeCrosser {
    a: Point,
    b: Point,

    // To reduce the number of calls to expensive_sign, we compute an
    // outward-facing tangent at A and B if necessary. If the plane
    // perpendicular to one of these tangents separates AB from CD (i.e., one
    // edge on each side) then there is no intersection.
    a_tangent: Point, // Outward-facing tangent at A.
    b_tangent: Point, // Outward-facing tangent at B.

    // The fields below are updated for each vertex in the chain.
    c: Point,       // Previous vertex in the vertex chain.
    acb: Direction, // The orientation of triangle ACB.
}

impl EdgeCrosser {
    /// new returns an EdgeCrosser with the fixed edge AB.
    pub fn new(a: &Point, b: &Point) -> EdgeCrosser {
        let norm = a.0.cross(&b.0);
        EdgeCrosser {
            a: *a,
            b: *b,
            a_tangent: Point(a.0.cross(&norm)),
            b_tangent: Point(norm.cross(&b.0)),
            c: Point::default(),
            acb: Direction::Indeterminate,
        }
    }

    /// new_chain is a convenience constructor that uses AB as the fixed edge,
    /// and C as the first vertex of the vertex chain (equivalent to calling restart_at(c)).
    pub fn new_chain(a: &Point, b: &Point, c: &Point) -> EdgeCrosser {
        let mut e = EdgeCrosser::new(a, b);
        e.restart_at(c);
        e
    }

    /// crossing_sign reports whether the edge AB intersects the edge CD. If any two
    /// vertices from different edges are the same, returns Maybe. If either edge
    /// is degenerate (A == B or C == D), returns either DoNotCross or Maybe.
    pub fn crossing_sign(&mut self, c: &Point, d: &Point) -> Crossing {
        if *c != self.c {
            self.restart_at(c);
        }
        self.chain_crossing_sign(d)
    }

    /// edge_or_vertex_crossing reports whether crossing_sign(c, d) is Cross, or AB and
    /// CD share a vertex and vertex_crossing(a, b, c, d) is true.
    pub fn edge_or_vertex_crossing(&mut self, c: &Point, d: &Point) -> bool {
        if *c != self.c {
            self.restart_at(c);
        }
        self.edge_or_vertex_chain_crossing(d)
    }

    /// restart_at sets the current point of the edge crosser to be c.
    /// Call this method when your chain 'jumps' to a new place.
    pub fn restart_at(&mut self, c: &Point) {
        self.c = *c;
        self.acb = -triage_sign(&self.a, &self.b, &self.c);
    }

    /// chain_crossing_sign is like crossing_sign, but uses the last vertex passed to one of
    /// the crossing methods (or restart_at) as the first vertex of the current edge.
    pub fn chain_crossing_sign(&mut self, d: &Point) -> Crossing {
        // For there to be an edge crossing, the triangles ACB, CBD, BDA, DAC must
        // all be oriented the same way (CW or CCW). We keep the orientation of ACB
        // as part of our state. When each new point D arrives, we compute the
        // orientation of BDA and check whether it matches ACB. This checks whether
        // the points C and D are on opposite sides of the great circle through AB.

        // Recall that triage_sign is invariant with respect to rotating its
        // arguments, i.e. ABD has the same orientation as BDA.
        let bda = triage_sign(&self.a, &self.b, d);
        if self.acb == -bda && bda != Direction::Indeterminate {
            // The most common case: triangles have opposite orientations. Save the
            // current vertex D as the next vertex C, and also save the orientation of
            // the new triangle ACB (which is opposite to the current triangle BDA).
            self.c = *d;
            self.acb = -bda;
            return Crossing::DoNotCross;
        }
        self.crossing_sign_slow(d, bda)
    }

    /// edge_or_vertex_chain_crossing is like edge_or_vertex_crossing, but uses the last vertex
    /// passed to one of the crossing methods (or restart_at) as the first vertex of the current edge.
    pub fn edge_or_vertex_chain_crossing(&mut self, d: &Point) -> bool {
        // Copy c since it is clobbered by chain_crossing_sign.
        let c = self.c;
        match self.chain_crossing_sign(d) {
            Crossing::DoNotCross => false,
            Crossing::Cross => true,
            Crossing::Maybe => vertex_crossing(&self.a, &self.b, &c, d),
        }
    }

    /// crossing_sign_slow handles the slow path of crossing_sign. On return the
    /// current vertex D becomes the next vertex C, and the orientation of the
    /// next triangle ACB is the opposite of the current triangle BDA.
    fn crossing_sign_slow(&mut self, d: &Point, bda: Direction) -> Crossing {
        let (result, bda) = self.compute_crossing(d, bda);
        self.c = *d;
        self.acb = -bda;
        result
    }

    fn compute_crossing(&mut self, d: &Point, mut bda: Direction) -> (Crossing, Direction) {
        // At this point, a very common situation is that A,B,C,D are four points on
        // a line such that AB does not overlap CD. (For example, this happens when
        // a line or curve is sampled finely, or when geometry is constructed by
        // computing the union of cells.) Most of the time, we can determine
        // that AB and CD do not intersect using the two outward-facing
        // tangents at A and B (parallel to AB) and testing whether AB and CD are on
        // opposite sides of the plane perpendicular to one of these tangents. This
        // is moderately expensive but still much cheaper than expensive_sign.

        // The maximum error in the call to cross (i.e., the maximum norm of the
        // error vector) is (0.5 + 1/sqrt(3)) * DBL_EPSILON. The maximum error in
        // each call to dot below is DBL_EPSILON.
        let max_error = (1.5 + 1. / 3f64.sqrt()) * DBL_EPSILON;
        if (self.c.dot(&self.a_tangent) > max_error && d.dot(&self.a_tangent) > max_error)
            || (self.c.dot(&self.b_tangent) > max_error && d.dot(&self.b_tangent) > max_error)
        {
            return (Crossing::DoNotCross, bda);
        }

        // Otherwise, eliminate the cases where two vertices from different edges are
        // equal. (These cases could be handled in the code below, but we would rather
        // avoid calling expensive_sign if possible.)
        if self.a == self.c || self.a == *d || self.b == self.c || self.b == *d {
            return (Crossing::Maybe, bda);
        }

        // Eliminate the cases where an input edge is degenerate. (Note that in
        // most cases, if CD is degenerate then this method is not even called
        // because acb and bda have different signs.)
        if self.a == self.b || self.c == *d {
            return (Crossing::DoNotCross, bda);
        }

        // Otherwise it's time to break out the big guns.
        if self.acb == Direction::Indeterminate {
            self.acb = -expensive_sign(&self.a, &self.b, &self.c);
        }
        if bda == Direction::Indeterminate {
            bda = expensive_sign(&self.a, &self.b, d);
        }

        if bda != self.acb {
            return (Crossing::DoNotCross, bda);
        }

        let cbd = -robust_sign(&self.c, d, &self.b);
        if cbd != self.acb {
            return (Crossing::DoNotCross, bda);
        }
        let dac = robust_sign(&self.c, d, &self.a);
        if dac != self.acb {
            return (Crossing::DoNotCross, bda);
        }
        (Crossing::Cross, bda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3::vector::Vector;
    use crate::s2::point::ORIGIN;

    fn point(x: f64, y: f64, z: f64) -> Point {
        Point(Vector::new(x, y, z).normalize())
    }

    fn check_crossing(
        msg: &str,
        a: Point,
        b: Point,
        c: Point,
        d: Point,
        robust: Crossing,
        edge_or_vertex: bool,
    ) {
        // Modify the expected result if two vertices from different edges match.
        let robust = if a == c || a == d || b == c || b == d {
            Crossing::Maybe
        } else {
            robust
        };

        let mut crosser = EdgeCrosser::new_chain(&a, &b, &c);
        assert_eq!(crosser.chain_crossing_sign(&d), robust, "{}: chain_crossing_sign(d)", msg);
        assert_eq!(crosser.chain_crossing_sign(&c), robust, "{}: chain_crossing_sign(c)", msg);
        assert_eq!(crosser.crossing_sign(&d, &c), robust, "{}: crossing_sign(d, c)", msg);
        assert_eq!(crosser.crossing_sign(&c, &d), robust, "{}: crossing_sign(c, d)", msg);

        crosser.restart_at(&c);
        assert_eq!(
            crosser.edge_or_vertex_chain_crossing(&d),
            edge_or_vertex,
            "{}: edge_or_vertex_chain_crossing(d)",
            msg
        );
        assert_eq!(
            crosser.edge_or_vertex_chain_crossing(&c),
            edge_or_vertex,
            "{}: edge_or_vertex_chain_crossing(c)",
            msg
        );
        assert_eq!(
            crosser.edge_or_vertex_crossing(&d, &c),
            edge_or_vertex,
            "{}: edge_or_vertex_crossing(d, c)",
            msg
        );
        assert_eq!(
            crosser.edge_or_vertex_crossing(&c, &d),
            edge_or_vertex,
            "{}: edge_or_vertex_crossing(c, d)",
            msg
        );
    }

    #[test]
    fn test_edge_crosser_crossings() {
        // Nearest representable values below and above 1.
        let na1 = f64::from_bits(0x3fefffffffffffff);
        let na2 = f64::from_bits(0x3ff0000000000001);

        let tests = vec![
            (
                "two regular edges that cross",
                point(1., 2., 1.),
                point(1., -3., 0.5),
                point(1., -0.5, -3.),
                point(0.1, 0.5, 3.),
                Crossing::Cross,
                true,
            ),
            (
                "two regular edges that intersect antipodal points",
                point(1., 2., 1.),
                point(1., -3., 0.5),
                point(-1., 0.5, 3.),
                point(-0.1, -0.5, -3.),
                Crossing::DoNotCross,
                false,
            ),
            (
                "two edges on the same great circle that start at antipodal points",
                point(0., 0., -1.),
                point(0., 1., 0.),
                point(0., 0., 1.),
                point(0., 1., 1.),
                Crossing::DoNotCross,
                false,
            ),
            (
                "two edges that cross where one vertex is the origin point",
                point(1., 0., 0.),
                ORIGIN,
                point(1., -0.1, 1.),
                point(1., 1., -0.1),
                Crossing::Cross,
                true,
            ),
            (
                "two edges that intersect antipodal points where one vertex is the origin point",
                point(1., 0., 0.),
                ORIGIN,
                point(1., 0.1, -1.),
                point(1., 1., -0.1),
                Crossing::DoNotCross,
                false,
            ),
            (
                "two edges that cross antipodal points",
                point(1., 0., 0.),
                point(0., 1., 0.),
                point(0., 0., -1.),
                point(-1., -1., 1.),
                Crossing::DoNotCross,
                false,
            ),
            (
                "two edges that share an endpoint",
                point(2., 3., 4.),
                point(-1., 2., 5.),
                point(7., -2., 3.),
                point(2., 3., 4.),
                Crossing::Maybe,
                false,
            ),
            (
                "two edges that barely cross near the middle of one edge",
                point(1., 1., 1.),
                point(1., na1, -1.),
                point(11., -12., -1.),
                point(10., 10., 1.),
                Crossing::Cross,
                true,
            ),
            (
                "two edges that barely miss near the middle of one edge",
                point(1., 1., 1.),
                point(1., na2, -1.),
                point(1., -1., 0.),
                point(1., 1., 0.),
                Crossing::DoNotCross,
                false,
            ),
        ];

        for (msg, a, b, c, d, robust, edge_or_vertex) in tests {
            check_crossing(msg, a, b, c, d, robust, edge_or_vertex);
            check_crossing(msg, b, a, c, d, robust, edge_or_vertex);
            check_crossing(msg, a, b, d, c, robust, edge_or_vertex);
            check_crossing(msg, b, a, d, c, robust, edge_or_vertex);

            // Degenerate cases.
            check_crossing(msg, a, a, c, d, Crossing::DoNotCross, false);
            check_crossing(msg, a, b, c, c, Crossing::DoNotCross, false);
            check_crossing(msg, a, a, c, c, Crossing::DoNotCross, false);

            check_crossing(msg, a, b, a, b, Crossing::Maybe, true);
            check_crossing(
                msg,
                c,
                d,
                a,
                b,
                robust,
                edge_or_vertex != (robust == Crossing::Maybe),
            );
        }
    }
}
