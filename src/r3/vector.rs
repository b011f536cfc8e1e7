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
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Vector represents a point in ℝ³.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis enumerates the 3 axes of ℝ³.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.24}, {:.24}, {:.24})", self.x, self.y, self.z)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, m: f64) -> Vector {
        Vector {
            x: self.x * m,
            y: self.y * m,
            z: self.z * m,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self * -1.
    }
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// zero returns the zero vector.
    pub const fn zero() -> Self {
        Vector {
            x: 0.,
            y: 0.,
            z: 0.,
        }
    }

    /// abs returns the vector with nonnegative components.
    pub fn abs(&self) -> Self {
        Vector {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// norm returns the vector's norm.
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// norm2 returns the square of the norm.
    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    /// normalize returns a unit vector in the same direction as v.
    pub fn normalize(&self) -> Self {
        let n2 = self.norm2();
        if n2 == 0. {
            return Vector::zero();
        }
        *self * (1. / n2.sqrt())
    }

    /// is_unit returns whether this vector is of approximately unit length.
    pub fn is_unit(&self) -> bool {
        const EPSILON: f64 = 5e-14;
        (self.norm2() - 1.).abs() <= EPSILON
    }

    /// dot returns the standard dot product of v and ov.
    pub fn dot(&self, ov: &Vector) -> f64 {
        self.x * ov.x + self.y * ov.y + self.z * ov.z
    }

    /// cross returns the standard cross product of v and ov.
    pub fn cross(&self, ov: &Vector) -> Vector {
        Vector {
            x: self.y * ov.z - self.z * ov.y,
            y: self.z * ov.x - self.x * ov.z,
            z: self.x * ov.y - self.y * ov.x,
        }
    }

    /// largest_component returns the axis that represents the largest component in this vector.
    pub fn largest_component(&self) -> Axis {
        let t = self.abs();
        if t.x > t.y {
            if t.x > t.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if t.y > t.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// cmp compares v and ov lexicographically, first by x, then y, then z.
    pub fn cmp(&self, ov: &Vector) -> Ordering {
        self.x
            .partial_cmp(&ov.x)
            .unwrap_or(Ordering::Equal)
            .then(self.y.partial_cmp(&ov.y).unwrap_or(Ordering::Equal))
            .then(self.z.partial_cmp(&ov.z).unwrap_or(Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_and_dot() {
        let x = Vector::new(1., 0., 0.);
        let y = Vector::new(0., 1., 0.);
        assert_eq!(x.cross(&y), Vector::new(0., 0., 1.));
        assert_eq!(x.dot(&y), 0.);
        assert_eq!(x.dot(&x), 1.);
    }

    #[test]
    fn test_normalize() {
        let v = Vector::new(3., 0., 4.).normalize();
        assert!(v.is_unit());
        assert_eq!(Vector::zero().normalize(), Vector::zero());
    }

    #[test]
    fn test_largest_component() {
        assert_eq!(Vector::new(1., -5., 2.).largest_component(), Axis::Y);
        assert_eq!(Vector::new(-7., 1., 2.).largest_component(), Axis::X);
        assert_eq!(Vector::new(1., 1., 1.).largest_component(), Axis::Z);
    }

    #[test]
    fn test_cmp() {
        let a = Vector::new(0., 1., 2.);
        assert_eq!(a.cmp(&Vector::new(0., 1., 3.)), Ordering::Less);
        assert_eq!(a.cmp(&Vector::new(-1., 5., 5.)), Ordering::Greater);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}
