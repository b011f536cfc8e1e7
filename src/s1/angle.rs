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
use std::ops::{Add, Mul, Neg, Sub};

/// Angle represents a 1D angle. The internal representation is a double
/// precision value in radians, so conversion to and from radians is exact.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle(pub f64);

/// Deg is an angle expressed in degrees.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Deg(pub f64);

/// Rad is an angle expressed in radians.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Rad(pub f64);

impl From<Deg> for Angle {
    fn from(d: Deg) -> Self {
        Angle(d.0 * PI / 180.)
    }
}

impl From<Rad> for Angle {
    fn from(r: Rad) -> Self {
        Angle(r.0)
    }
}

impl Angle {
    /// inf returns an angle larger than any finite angle.
    pub fn inf() -> Self {
        Angle(f64::INFINITY)
    }

    /// rad returns the angle in radians.
    pub fn rad(&self) -> f64 {
        self.0
    }

    /// deg returns the angle in degrees.
    pub fn deg(&self) -> f64 {
        self.0 * 180. / PI
    }

    /// abs returns the absolute value of the angle.
    pub fn abs(&self) -> Self {
        Angle(self.0.abs())
    }

    /// is_inf reports whether this Angle is infinite.
    pub fn is_inf(&self) -> bool {
        self.0.is_infinite()
    }

    /// normalized returns an equivalent angle in (-π, π].
    pub fn normalized(&self) -> Self {
        let rad = libm::remainder(self.0, 2. * PI);
        if rad <= -PI {
            Angle(PI)
        } else {
            Angle(rad)
        }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Angle {
        Angle(self.0 + other.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, other: Angle) -> Angle {
        Angle(self.0 - other.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, m: f64) -> Angle {
        Angle(self.0 * m)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_radians() {
        let a: Angle = Deg(180.).into();
        assert_eq!(a.rad(), PI);
        assert_eq!(Angle::from(Rad(PI / 2.)).deg(), 90.);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Angle(-PI).normalized(), Angle(PI));
        assert!((Angle(2.5 * PI).normalized().rad() - PI / 2.).abs() < 1e-14);
    }
}
