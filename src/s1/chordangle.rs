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

use crate::s1::angle::Angle;

/// ChordAngle represents the angle subtended by a chord (i.e., the straight
/// line segment connecting two points on the sphere). Its representation
/// makes it very efficient for computing and comparing distances, but unlike
/// Angle it is only capable of representing angles between 0 and π radians.
/// The value is stored as the squared chord length, capped at 4.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordAngle(pub f64);

/// NEGATIVE represents a chord angle smaller than the zero angle.
/// The only valid operations on a NEGATIVE are comparisons and Angle conversions.
pub const NEGATIVE: ChordAngle = ChordAngle(-1.);

/// RIGHT represents a chord angle of 90 degrees (a "right angle").
pub const RIGHT: ChordAngle = ChordAngle(2.);

/// STRAIGHT represents a chord angle of 180 degrees (a "straight angle").
/// This is the maximum finite chord angle.
pub const STRAIGHT: ChordAngle = ChordAngle(4.);

/// MAX_LENGTH2 is the square of the maximum length allowed in a ChordAngle.
pub const MAX_LENGTH2: f64 = 4.0;

impl From<Angle> for ChordAngle {
    /// Returns a ChordAngle from the given Angle.
    fn from(a: Angle) -> Self {
        if a.0 < 0. {
            NEGATIVE
        } else if a.is_inf() {
            ChordAngle(f64::INFINITY)
        } else {
            let l = 2. * (0.5 * a.0.min(std::f64::consts::PI)).sin();
            ChordAngle(l * l)
        }
    }
}

impl From<ChordAngle> for Angle {
    /// Converts this ChordAngle to an Angle.
    fn from(ca: ChordAngle) -> Self {
        if ca.0 < 0. {
            Angle(-1.)
        } else if ca.is_infinity() {
            Angle::inf()
        } else {
            Angle(2. * (0.5 * ca.0.sqrt()).asin())
        }
    }
}

impl ChordAngle {
    /// is_infinity reports whether this ChordAngle is infinite.
    pub fn is_infinity(&self) -> bool {
        self.0.is_infinite()
    }

    /// is_special reports whether this ChordAngle is one of the special cases.
    pub fn is_special(&self) -> bool {
        self.0 < 0. || self.is_infinity()
    }

    /// max returns the larger of the two chord angles.
    pub fn max(self, other: ChordAngle) -> ChordAngle {
        if self.0 < other.0 {
            other
        } else {
            self
        }
    }
}
