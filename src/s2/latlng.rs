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

use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Deg};
use crate::s2::point::Point;

/// LatLng represents a point on the unit sphere as a pair of angles.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: Angle,
    pub lng: Angle,
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lat.deg(), self.lng.deg())
    }
}

impl LatLng {
    /// new returns a LatLng for the given angles.
    pub fn new(lat: Angle, lng: Angle) -> Self {
        LatLng { lat, lng }
    }

    /// from_degrees returns a LatLng for the coordinates given in degrees.
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Deg(lat).into(),
            lng: Deg(lng).into(),
        }
    }

    /// is_valid returns true iff the LatLng is normalized, with lat ∈ [-π/2,π/2] and lng ∈ [-π,π].
    pub fn is_valid(&self) -> bool {
        self.lat.rad().abs() <= PI / 2. && self.lng.rad().abs() <= PI
    }
}

impl From<&Point> for LatLng {
    fn from(p: &Point) -> Self {
        let v = &p.0;
        LatLng {
            lat: Angle(v.z.atan2((v.x * v.x + v.y * v.y).sqrt())),
            lng: Angle(v.y.atan2(v.x)),
        }
    }
}

impl From<Point> for LatLng {
    fn from(p: Point) -> Self {
        LatLng::from(&p)
    }
}

impl From<&LatLng> for Point {
    fn from(ll: &LatLng) -> Self {
        let phi = ll.lat.rad();
        let theta = ll.lng.rad();
        let cosphi = phi.cos();
        Point(Vector::new(theta.cos() * cosphi, theta.sin() * cosphi, phi.sin()))
    }
}

impl From<LatLng> for Point {
    fn from(ll: LatLng) -> Self {
        Point::from(&ll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlng_point_conversion() {
        let cases = [(0., 0.), (90., 0.), (-45., 120.), (30., -170.), (-89., 179.)];
        for &(lat, lng) in &cases {
            let ll = LatLng::from_degrees(lat, lng);
            let p = Point::from(ll);
            assert!(p.is_unit());
            let back = LatLng::from(p);
            assert!((back.lat.deg() - lat).abs() < 1e-12, "lat {} vs {}", back.lat.deg(), lat);
            if lat.abs() < 90. {
                assert!((back.lng.deg() - lng).abs() < 1e-12, "lng {} vs {}", back.lng.deg(), lng);
            }
        }
    }

    #[test]
    fn test_latlng_is_valid() {
        assert!(LatLng::from_degrees(90., 180.).is_valid());
        assert!(!LatLng::from_degrees(91., 0.).is_valid());
        assert!(!LatLng::from_degrees(0., 181.).is_valid());
    }
}
