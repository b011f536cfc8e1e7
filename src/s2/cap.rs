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

use crate::r1;
use crate::r3::vector::Vector;
use crate::s1::angle::Angle;
use crate::s1::chordangle::{self, ChordAngle};
use crate::s1::interval::Interval;
use crate::s2::error::S2Result;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::region::Region;

/// Cap represents a disc-shaped region defined by a center and radius.
/// Technically this shape is called a "spherical cap" (rather than disc)
/// because it is not planar; the cap represents a portion of the sphere that
/// has been cut off by a plane. The boundary of the cap is the circle defined
/// by the intersection of the sphere and the plane. For containment purposes,
/// the cap is a closed set, i.e. it contains its boundary.
///
/// The radius is stored as a ChordAngle, so an empty cap has a negative
/// radius and a full cap has the maximal chord angle.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cap {
    pub center: Point,
    pub radius: ChordAngle,
}

impl fmt::Debug for Cap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[Center={:?}, Radius={:.7}]",
            self.center.0,
            Angle::from(self.radius).deg()
        )
    }
}

const CAP_AXIS: Point = Point(Vector::new(1., 0., 0.));

impl Cap {
    /// from_point constructs a cap containing a single point.
    pub fn from_point(p: &Point) -> Self {
        Cap::from_center_chord_angle(p, ChordAngle(0.))
    }

    /// from_center_angle constructs a cap with the given center and angle.
    pub fn from_center_angle(center: &Point, angle: Angle) -> Self {
        Cap::from_center_chord_angle(center, ChordAngle::from(angle))
    }

    /// from_center_chord_angle constructs a cap where the angle is expressed
    /// as a ChordAngle.
    pub fn from_center_chord_angle(center: &Point, radius: ChordAngle) -> Self {
        Cap {
            center: *center,
            radius,
        }
    }

    /// empty returns a cap that contains no points.
    pub fn empty() -> Self {
        Cap {
            center: CAP_AXIS,
            radius: chordangle::NEGATIVE,
        }
    }

    /// full returns a cap that contains all points.
    pub fn full() -> Self {
        Cap {
            center: CAP_AXIS,
            radius: chordangle::STRAIGHT,
        }
    }

    /// is_valid reports whether the Cap is considered valid.
    pub fn is_valid(&self) -> bool {
        self.center.is_unit() && self.radius.0 <= chordangle::MAX_LENGTH2
    }

    /// is_empty reports whether the cap is empty, i.e. it contains no points.
    pub fn is_empty(&self) -> bool {
        self.radius.0 < 0.
    }

    /// is_full reports whether the cap is full, i.e. it contains all points.
    pub fn is_full(&self) -> bool {
        self.radius == chordangle::STRAIGHT
    }

    /// radius returns the cap radius as an Angle.
    pub fn radius(&self) -> Angle {
        self.radius.into()
    }

    /// height returns the height of the cap. This is the distance from the center
    /// point to the cutoff plane.
    pub fn height(&self) -> f64 {
        0.5 * self.radius.0
    }

    /// add_point increases the cap if necessary to include the given point. If this cap is empty,
    /// then the center is set to the point with a zero height. p must be unit-length.
    pub fn add_point(&self, p: &Point) -> Self {
        if self.is_empty() {
            return Cap::from_point(p);
        }
        Cap {
            center: self.center,
            radius: self.radius.max(self.center.chord_angle(p)),
        }
    }

    /// encode writes the center coordinates followed by the squared chord length.
    pub fn encode<W: Write>(&self, w: &mut W) -> S2Result<()> {
        w.write_f64::<LittleEndian>(self.center.0.x)?;
        w.write_f64::<LittleEndian>(self.center.0.y)?;
        w.write_f64::<LittleEndian>(self.center.0.z)?;
        w.write_f64::<LittleEndian>(self.radius.0)?;
        Ok(())
    }
}

impl Region for Cap {
    fn cap_bound(&self) -> Cap {
        *self
    }

    fn rect_bound(&self) -> Rect {
        if self.is_empty() {
            return Rect::empty();
        }

        let cap_angle = self.radius().rad();
        let center = LatLng::from(&self.center);
        let mut all_longitudes = false;
        let mut lat = r1::interval::Interval::new(
            center.lat.rad() - cap_angle,
            center.lat.rad() + cap_angle,
        );
        let mut lng = Interval::full_interval();

        // Check whether cap includes the south pole.
        if lat.lo <= -PI / 2. {
            lat.lo = -PI / 2.;
            all_longitudes = true;
        }

        // Check whether cap includes the north pole.
        if lat.hi >= PI / 2. {
            lat.hi = PI / 2.;
            all_longitudes = true;
        }

        if !all_longitudes {
            // Compute the range of longitudes covered by the cap. We use the law
            // of sines for spherical triangles. Consider the triangle ABC where
            // A is the north pole, B is the center of the cap, and C is the point
            // of tangency between the cap boundary and a line of longitude. Then
            // C is a right angle, and letting a,b,c denote the sides opposite A,B,C,
            // we have sin(a)/sin(A) = sin(c)/sin(C), or sin(A) = sin(a)/sin(c).
            // Here "a" is the cap angle, and "c" is the colatitude (90 degrees
            // minus the latitude). This formula also works for negative latitudes.
            let sin_a = (self.radius.0 * (1. - 0.25 * self.radius.0)).sqrt();
            let sin_c = center.lat.rad().cos();
            if sin_a <= sin_c {
                let angle_a = (sin_a / sin_c).asin();
                lng.lo = libm::remainder(center.lng.rad() - angle_a, PI * 2.);
                lng.hi = libm::remainder(center.lng.rad() + angle_a, PI * 2.);
            }
        }
        Rect { lat, lng }
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.center.chord_angle(p) <= self.radius
    }
}
