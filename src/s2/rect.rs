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
use crate::s1;
use crate::s1::angle::Angle;
use crate::s2::cap::Cap;
use crate::s2::encoding::ENCODING_VERSION;
use crate::s2::error::S2Result;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::region::Region;

/// Rect represents a closed latitude-longitude rectangle.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub lat: r1::interval::Interval,
    pub lng: s1::interval::Interval,
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[Lo{:?}, Hi{:?}]", self.lo(), self.hi())
    }
}

/// VALID_RECT_LAT_RANGE is the range of valid latitudes.
const VALID_RECT_LAT_RANGE: r1::interval::Interval = r1::interval::Interval {
    lo: -PI / 2.,
    hi: PI / 2.,
};

impl Rect {
    /// empty returns the empty rectangle.
    pub fn empty() -> Self {
        Rect {
            lat: r1::interval::EMPTY,
            lng: s1::interval::EMPTY,
        }
    }

    /// full returns the full rectangle.
    pub fn full() -> Self {
        Rect {
            lat: VALID_RECT_LAT_RANGE,
            lng: s1::interval::FULL,
        }
    }

    /// from_latlng constructs a rectangle containing a single point p.
    pub fn from_latlng(p: &LatLng) -> Self {
        Rect {
            lat: r1::interval::Interval::from_point(p.lat.rad()),
            lng: s1::interval::Interval::from_endpoints(p.lng.rad(), p.lng.rad()),
        }
    }

    /// is_valid returns true iff the rectangle is valid.
    /// This requires lat.lo <= lat.hi, lat.lo >= -π/2, lat.hi <= π/2,
    /// and lng is valid; and lat and lng are either both empty or both non-empty.
    pub fn is_valid(&self) -> bool {
        self.lat.lo.abs() <= PI / 2.
            && self.lat.hi.abs() <= PI / 2.
            && self.lng.is_valid()
            && self.lat.is_empty() == self.lng.is_empty()
    }

    /// is_empty reports whether the rectangle is empty.
    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// is_full reports whether the rectangle is full.
    pub fn is_full(&self) -> bool {
        self.lat == VALID_RECT_LAT_RANGE && self.lng.is_full()
    }

    /// lo returns one corner of the rectangle.
    pub fn lo(&self) -> LatLng {
        LatLng::new(Angle(self.lat.lo), Angle(self.lng.lo))
    }

    /// hi returns the other corner of the rectangle.
    pub fn hi(&self) -> LatLng {
        LatLng::new(Angle(self.lat.hi), Angle(self.lng.hi))
    }

    /// center returns the center of the rectangle.
    pub fn center(&self) -> LatLng {
        LatLng::new(Angle(self.lat.center()), Angle(self.lng.center()))
    }

    /// vertex returns the i-th vertex of the rectangle (i = 0,1,2,3) in CCW order
    /// (lower left, lower right, upper right, upper left).
    pub fn vertex(&self, i: usize) -> LatLng {
        let (lat, lng) = match i & 3 {
            0 => (self.lat.lo, self.lng.lo),
            1 => (self.lat.lo, self.lng.hi),
            2 => (self.lat.hi, self.lng.hi),
            _ => (self.lat.hi, self.lng.lo),
        };
        LatLng::new(Angle(lat), Angle(lng))
    }

    /// add_point increases the size of the rectangle to include the given point.
    pub fn add_point(&self, ll: &LatLng) -> Self {
        if !ll.is_valid() {
            return *self;
        }
        Rect {
            lat: self.lat.add_point(ll.lat.rad()),
            lng: self.lng.add_point(ll.lng.rad()),
        }
    }

    /// expanded returns a rectangle that has been expanded by margin.lat on each side
    /// in the latitude direction, and by margin.lng on each side in the longitude
    /// direction. If either margin is negative, then it shrinks the rectangle on
    /// the corresponding sides instead. The resulting rectangle may be empty.
    ///
    /// The latitude-longitude space has the topology of a cylinder. Longitudes
    /// "wrap around" at +/-180 degrees, while latitudes are clamped to range [-90, 90].
    /// This means that any expansion (positive or negative) of the full longitude range
    /// remains full (since the "rectangle" is actually a continuous band around the
    /// cylinder), while expansion of the full latitude range remains full only if the
    /// margin is positive.
    pub fn expanded(&self, margin: &LatLng) -> Self {
        let lat = self.lat.expanded(margin.lat.rad());
        let lng = self.lng.expanded(margin.lng.rad());

        if lat.is_empty() || lng.is_empty() {
            return Rect::empty();
        }

        Rect {
            lat: lat.intersection(&VALID_RECT_LAT_RANGE),
            lng,
        }
    }

    /// polar_closure returns the rectangle unmodified if it does not include either pole.
    /// If it includes either pole, polar_closure returns an expansion of the rectangle along
    /// the longitudinal range to include all possible representations of the contained poles.
    pub fn polar_closure(&self) -> Self {
        if self.lat.lo == -PI / 2. || self.lat.hi == PI / 2. {
            return Rect {
                lat: self.lat,
                lng: s1::interval::FULL,
            };
        }
        *self
    }

    /// union returns the smallest Rect containing the union of this rectangle and the given rectangle.
    pub fn union(&self, other: &Rect) -> Self {
        Rect {
            lat: self.lat.union(&other.lat),
            lng: self.lng.union(&other.lng),
        }
    }

    /// contains reports whether this Rect contains the other Rect.
    pub fn contains(&self, other: &Rect) -> bool {
        self.lat.contains_interval(&other.lat) && self.lng.contains_interval(&other.lng)
    }

    /// contains_latlng reports whether the given LatLng is within the Rect.
    pub fn contains_latlng(&self, ll: &LatLng) -> bool {
        if !ll.is_valid() {
            return false;
        }
        self.lat.contains(ll.lat.rad()) && self.lng.contains(ll.lng.rad())
    }

    /// intersects reports whether this rectangle and the other have any points in common.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.lat.intersects(&other.lat) && self.lng.intersects(&other.lng)
    }

    /// encode writes the version byte followed by the latitude and longitude bounds.
    pub fn encode<W: Write>(&self, w: &mut W) -> S2Result<()> {
        w.write_i8(ENCODING_VERSION)?;
        w.write_f64::<LittleEndian>(self.lat.lo)?;
        w.write_f64::<LittleEndian>(self.lat.hi)?;
        w.write_f64::<LittleEndian>(self.lng.lo)?;
        w.write_f64::<LittleEndian>(self.lng.hi)?;
        Ok(())
    }
}

impl Region for Rect {
    /// cap_bound returns a cap that contains the Rect.
    fn cap_bound(&self) -> Cap {
        // We consider two possible bounding caps, one whose axis passes
        // through the center of the lat-long rectangle and one whose axis
        // is the north or south pole. We return the smaller of the two caps.
        if self.is_empty() {
            return Cap::empty();
        }

        let (pole_z, pole_angle) = if self.lat.hi + self.lat.lo < 0. {
            // South pole axis yields smaller cap.
            (-1., PI / 2. + self.lat.hi)
        } else {
            (1., PI / 2. - self.lat.lo)
        };
        let pole_cap = Cap::from_center_angle(&Point(Vector::new(0., 0., pole_z)), Angle(pole_angle));

        // For bounding rectangles that span 180 degrees or less in longitude, the
        // maximum cap size is achieved at one of the rectangle vertices. For
        // rectangles that are larger than 180 degrees, we punt and always return a
        // bounding cap centered at one of the two poles.
        let lng_span = self.lng.hi - self.lng.lo;
        if libm::remainder(lng_span, 2. * PI) >= 0. && lng_span < 2. * PI {
            let mut mid_cap = Cap::from_point(&Point::from(self.center()));
            for k in 0..4 {
                mid_cap = mid_cap.add_point(&Point::from(self.vertex(k)));
            }
            if mid_cap.height() < pole_cap.height() {
                return mid_cap;
            }
        }
        pole_cap
    }

    fn rect_bound(&self) -> Rect {
        *self
    }

    /// contains_point reports whether the given Point is within the Rect.
    fn contains_point(&self, p: &Point) -> bool {
        self.contains_latlng(&LatLng::from(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_from_degrees(lat_lo: f64, lng_lo: f64, lat_hi: f64, lng_hi: f64) -> Rect {
        Rect::from_latlng(&LatLng::from_degrees(lat_lo, lng_lo))
            .add_point(&LatLng::from_degrees(lat_hi, lng_hi))
    }

    #[test]
    fn test_rect_empty_and_full() {
        let empty = Rect::empty();
        let full = Rect::full();
        assert!(empty.is_valid() && empty.is_empty() && !empty.is_full());
        assert!(full.is_valid() && full.is_full() && !full.is_empty());
        assert!(full.contains(&empty));
        assert!(!empty.intersects(&full));
        assert_eq!(empty.union(&full), full);
    }

    #[test]
    fn test_rect_add_point_and_contains() {
        let r = rect_from_degrees(-10., -20., 10., 20.);
        assert!(r.contains_latlng(&LatLng::from_degrees(0., 0.)));
        assert!(r.contains_latlng(&LatLng::from_degrees(10., -20.)));
        assert!(!r.contains_latlng(&LatLng::from_degrees(11., 0.)));
        assert!(r.contains_point(&Point::from(LatLng::from_degrees(5., 5.))));
        assert!(!r.contains_latlng(&LatLng::from_degrees(100., 0.)));

        let inner = rect_from_degrees(-5., -5., 5., 5.);
        assert!(r.contains(&inner));
        assert!(!inner.contains(&r));
        assert!(r.intersects(&inner));
    }

    #[test]
    fn test_rect_polar_closure() {
        let r = rect_from_degrees(80., 10., 90., 20.);
        assert!(r.polar_closure().lng.is_full());
        let r = rect_from_degrees(-10., 10., 10., 20.);
        assert_eq!(r.polar_closure(), r);
    }

    #[test]
    fn test_rect_expanded() {
        let r = rect_from_degrees(70., 150., 80., 170.);
        let e = r.expanded(&LatLng::from_degrees(20., 20.));
        assert!((e.lat.hi - PI / 2.).abs() < 1e-15);
        assert!(e.lng.is_inverted());
        assert!(Rect::empty().expanded(&LatLng::from_degrees(10., 10.)).is_empty());
    }

    #[test]
    fn test_rect_cap_bound() {
        // Bounded by a pole cap.
        let r = Rect {
            lat: r1::interval::Interval::new(-PI / 4., PI / 2.),
            lng: s1::interval::Interval::from_endpoints(0., -PI / 2.),
        };
        let cap = r.cap_bound();
        assert_eq!(cap.center, Point(Vector::new(0., 0., 1.)));
        assert!((cap.radius().deg() - 135.).abs() < 1e-12);

        // Bounded by a cap around the center of a small rectangle.
        let r = rect_from_degrees(-10., -10., 10., 10.);
        let cap = r.cap_bound();
        assert!(cap.height() < 0.1);
        for k in 0..4 {
            assert!(cap.contains_point(&Point::from(r.vertex(k))));
        }

        assert!(Rect::empty().cap_bound().is_empty());
    }

    #[test]
    fn test_rect_encode_layout() {
        let r = rect_from_degrees(-10., -20., 10., 20.);
        let mut buf = Vec::new();
        r.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), 33);
        assert_eq!(buf[0] as i8, ENCODING_VERSION);
        assert_eq!(&buf[1..9], &r.lat.lo.to_le_bytes());
        assert_eq!(&buf[25..33], &r.lng.hi.to_le_bytes());
    }
}
