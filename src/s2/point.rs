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

use std::cmp::Ordering;
use std::f64::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

use cgmath::{Matrix3, Vector3};

use crate::r3::vector::{Axis, Vector};
use crate::s1::angle::Angle;
use crate::s1::chordangle::ChordAngle;
use crate::s2::predicates::{robust_sign, Direction};

/// Point represents a point on the unit sphere as a normalized 3D vector.
/// Fields should be treated as read-only. Use one of the factory methods for creation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub Vector);

/// ORIGIN is a unique "origin" on the sphere for operations that need a fixed
/// reference point. In particular, this is the "point at infinity" used for
/// point-in-polygon testing (by counting the number of edge crossings).
///
/// It should *not* be a point that is commonly used in edge tests in order
/// to avoid triggering code to handle degenerate cases (this rules out the
/// north and south poles). It should also not be on the boundary of any
/// low-level cell for the same reason.
pub const ORIGIN: Point = Point(Vector {
    x: -0.0099994664350250197,
    y: 0.0025924542609324121,
    z: 0.99994664350250195,
});

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point(self.0 + other.0)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point(self.0 - other.0)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, m: f64) -> Point {
        Point(self.0 * m)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point(-self.0)
    }
}

impl Point {
    /// origin returns the fixed reference point used for containment tests.
    pub fn origin() -> Self {
        ORIGIN
    }

    /// from_coords creates a new normalized point from coordinates.
    ///
    /// This always returns a valid point. If the given coordinates can not be normalized
    /// the origin point will be returned.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        if x == 0. && y == 0. && z == 0. {
            return ORIGIN;
        }
        Point(Vector::new(x, y, z).normalize())
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Point) -> Point {
        Point(self.0.cross(&other.0))
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn normalize(&self) -> Point {
        Point(self.0.normalize())
    }

    pub fn is_unit(&self) -> bool {
        self.0.is_unit()
    }

    /// cmp compares the two points lexicographically by coordinates.
    pub fn cmp(&self, other: &Point) -> Ordering {
        self.0.cmp(&other.0)
    }

    /// chord_angle returns the ChordAngle corresponding to the distance between
    /// this point and other.
    pub fn chord_angle(&self, other: &Point) -> ChordAngle {
        ChordAngle((self.0 - other.0).norm2().min(4.))
    }

    /// distance returns the angle between two points.
    pub fn distance(&self, other: &Point) -> Angle {
        Angle(self.0.cross(&other.0).norm().atan2(self.0.dot(&other.0)))
    }

    /// approx_eq reports whether the two points are within a small angle of each other.
    pub fn approx_eq(&self, other: &Point) -> bool {
        self.distance(other).0 <= 1e-15
    }

    /// ortho returns a unit-length vector that is orthogonal to this point.
    /// Satisfies ortho(-a) = -ortho(a) for all a.
    ///
    /// Note that Vector3 also defines an ortho method, but this one is
    /// preferred for use in S2 code because it explicitly tries to avoid result
    /// coordinates that are zero. (This is a performance optimization that
    /// reduces the amount of time spent in functions that handle degeneracies.)
    pub fn ortho(&self) -> Point {
        let mut temp = Vector::new(0.012, 0.0053, 0.00457);
        match self.0.largest_component() {
            Axis::X => temp.z = 1.,
            Axis::Y => temp.x = 1.,
            Axis::Z => temp.y = 1.,
        }
        Point(self.0.cross(&temp).normalize())
    }

    /// reference_dir returns a unit-length vector to use as the reference direction for
    /// deciding whether a polygon with semi-open boundaries contains the given vertex "a"
    /// (see contains_vertex_query). The result is unit length and is guaranteed
    /// to be different from the given point "a".
    pub fn reference_dir(&self) -> Point {
        self.ortho()
    }
}

/// ordered_ccw returns true if the edges OA, OB, and OC are encountered in that
/// order while sweeping CCW around the point O.
///
/// You can think of this as testing whether A <= B <= C with respect to the
/// CCW ordering around O that starts at A, or equivalently, whether B is
/// contained in the range of angles (inclusive) that starts at A and extends
/// CCW to C. Properties:
///
/// ```text
///  (1) If ordered_ccw(a,b,c,o) && ordered_ccw(b,a,c,o), then a == b
///  (2) If ordered_ccw(a,b,c,o) && ordered_ccw(a,c,b,o), then b == c
///  (3) If ordered_ccw(a,b,c,o) && ordered_ccw(c,b,a,o), then a == b == c
///  (4) If a == b or b == c, then ordered_ccw(a,b,c,o) is true
///  (5) Otherwise if a == c, then ordered_ccw(a,b,c,o) is false
/// ```
pub fn ordered_ccw(a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
    let mut sum = 0;
    if robust_sign(b, o, a) != Direction::Clockwise {
        sum += 1;
    }
    if robust_sign(c, o, b) != Direction::Clockwise {
        sum += 1;
    }
    if robust_sign(a, o, c) == Direction::CounterClockwise {
        sum += 1;
    }
    sum >= 2
}

/// get_frame returns the orthonormal frame for the given point on the unit sphere.
/// The columns are (p × q, q, p) where q is ortho(p), forming a right-handed
/// coordinate frame with p as its z-axis.
pub fn get_frame(p: &Point) -> Matrix3<f64> {
    let q = p.ortho();
    let x = q.cross(p);
    Matrix3::from_cols(to_cg(&x), to_cg(&q), to_cg(p))
}

/// from_frame returns the coordinates of the given point in standard axis
/// coordinates, where the point is given in the coordinate frame m.
pub fn from_frame(m: &Matrix3<f64>, q: &Point) -> Point {
    let v = *m * to_cg(q);
    Point(Vector::new(v.x, v.y, v.z))
}

fn to_cg(p: &Point) -> Vector3<f64> {
    Vector3::new(p.0.x, p.0.y, p.0.z)
}

/// regular_points returns num_vertices points evenly spaced on a circle of the
/// given angular radius around center.
pub fn regular_points(center: &Point, radius: Angle, num_vertices: usize) -> Vec<Point> {
    regular_points_for_frame(&get_frame(center), radius, num_vertices)
}

/// regular_points_for_frame is like regular_points but the circle is centered
/// on the z-axis of the given frame.
pub fn regular_points_for_frame(
    frame: &Matrix3<f64>,
    radius: Angle,
    num_vertices: usize,
) -> Vec<Point> {
    // We construct the loop in the given frame coordinates, with the center at
    // (0, 0, 1). For a loop of radius r, the loop vertices have the form
    // (x, y, z) where x^2 + y^2 = sin(r) and z = cos(r). The distance on the
    // sphere (arc length) from each vertex to the center is acos(cos(r)) = r.
    let z = radius.rad().cos();
    let r = radius.rad().sin();
    let radian_step = 2. * PI / num_vertices as f64;

    (0..num_vertices)
        .map(|i| {
            let angle = i as f64 * radian_step;
            let p = Point(Vector::new(r * angle.cos(), r * angle.sin(), z));
            from_frame(frame, &p).normalize()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_unit() {
        assert!(Point::origin().is_unit());
    }

    #[test]
    fn test_ortho() {
        let points = [
            Point::from_coords(1., 0., 0.),
            Point::from_coords(0., -1., 0.),
            Point::from_coords(0., 0., 1.),
            Point::from_coords(1., 2., 3.),
            Point::from_coords(-0.3, 0.2, 0.01),
        ];
        for p in points.iter() {
            let o = p.ortho();
            assert!(o.is_unit(), "{:?}.ortho() is not unit length", p);
            assert!(p.dot(&o).abs() < 1e-15, "{:?}.ortho() is not orthogonal", p);
            assert!((-*p).ortho().approx_eq(&(-o)));
        }
    }

    #[test]
    fn test_ordered_ccw() {
        let o = Point::from_coords(0., 0., 1.);
        let a = Point::from_coords(1., 0., 0.);
        let b = Point::from_coords(0., 1., 0.);
        let c = Point::from_coords(-1., 0., 0.);
        assert!(ordered_ccw(&a, &b, &c, &o));
        assert!(!ordered_ccw(&c, &b, &a, &o));
        assert!(ordered_ccw(&a, &a, &c, &o));
        assert!(!ordered_ccw(&a, &b, &a, &o));
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let p = Point::from_coords(0.2, -0.5, 0.9);
        let m = get_frame(&p);
        let x = from_frame(&m, &Point(Vector::new(1., 0., 0.)));
        let y = from_frame(&m, &Point(Vector::new(0., 1., 0.)));
        let z = from_frame(&m, &Point(Vector::new(0., 0., 1.)));
        assert!(z.approx_eq(&p));
        assert!(x.dot(&y).abs() < 1e-15);
        assert!(x.cross(&y).approx_eq(&z));
    }

    #[test]
    fn test_regular_points() {
        let center = Point::from_coords(1., 1., 1.);
        let radius = Angle(0.1);
        let pts = regular_points(&center, radius, 7);
        assert_eq!(pts.len(), 7);
        for p in &pts {
            assert!(p.is_unit());
            assert!((center.distance(p).rad() - radius.rad()).abs() < 1e-14);
        }
    }

    #[test]
    fn test_chord_angle_and_distance() {
        let a = Point::from_coords(1., 0., 0.);
        let b = Point::from_coords(0., 1., 0.);
        assert!((a.chord_angle(&b).0 - 2.).abs() < 1e-15);
        assert!((a.distance(&b).rad() - PI / 2.).abs() < 1e-15);
        assert_eq!(a.chord_angle(&-a).0, 4.);
    }
}
