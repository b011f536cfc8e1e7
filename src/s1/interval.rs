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

use crate::consts::DBL_EPSILON;

/// Interval represents a closed interval on a unit circle (also known as a
/// 1-dimensional sphere). It is capable of representing the empty interval
/// (containing no points), the full interval (containing all points), and
/// zero-length intervals (containing a single point).
///
/// Points are represented by the angle they make with the positive x-axis in
/// the range [-π, π]. An interval is represented by its lower and upper
/// bounds (both inclusive, since the interval is closed). The lower bound may
/// be greater than the upper bound, in which case the interval is "inverted"
/// (i.e. it passes through the point (-1, 0)).
///
/// The point (-1, 0) has two valid representations, π and -π. The normalized
/// representation of this point is π, so that endpoints of normal intervals
/// are in the range (-π, π]. We normalize the latter to the former in
/// from_endpoints(). However, we take advantage of the point -π to construct
/// two special intervals:
/// ```text
///   the full interval is [-π, π]
///   the empty interval is [π, -π].
/// ```
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// EMPTY is the canonical empty interval.
pub const EMPTY: Interval = Interval { lo: PI, hi: -PI };

/// FULL is the canonical full interval.
pub const FULL: Interval = Interval { lo: -PI, hi: PI };

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lo, self.hi)
    }
}

impl Default for Interval {
    fn default() -> Self {
        EMPTY
    }
}

/// positive_distance returns the distance from a to b in the range [0, 2π).
/// This is equivalent to
///
/// ```text
///     remainder(b - a - π, 2π) + π
/// ```
///
/// except that it is more numerically stable (it does not lose
/// precision for very small positive distances).
fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0. {
        return d;
    }
    // We want to ensure that if b == π and a == (-π + eps),
    // the return result is approximately 2*π and not zero.
    (b + PI) - (a - PI)
}

impl Interval {
    /// from_endpoints constructs a new interval from endpoints.
    /// Both arguments must be in the range [-π,π]. This function allows inverted intervals
    /// to be created.
    pub fn from_endpoints(lo: f64, hi: f64) -> Self {
        let mut i = Interval { lo, hi };
        if lo == -PI && hi != PI {
            i.lo = PI;
        }
        if hi == -PI && lo != PI {
            i.hi = PI;
        }
        i
    }

    /// from_point_pair returns the minimal interval containing the two given points.
    /// Both arguments must be in [-π,π].
    pub fn from_point_pair(mut a: f64, mut b: f64) -> Self {
        if a == -PI {
            a = PI;
        }
        if b == -PI {
            b = PI;
        }
        if positive_distance(a, b) <= PI {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    /// empty_interval returns an empty interval.
    pub fn empty_interval() -> Self {
        EMPTY
    }

    /// full_interval returns a full interval.
    pub fn full_interval() -> Self {
        FULL
    }

    /// is_valid reports whether the interval is valid.
    pub fn is_valid(&self) -> bool {
        (self.lo.abs() <= PI && self.hi.abs() <= PI)
            && !(self.lo == -PI && self.hi != PI)
            && !(self.hi == -PI && self.lo != PI)
    }

    /// is_full reports whether the interval is full.
    pub fn is_full(&self) -> bool {
        self.lo == -PI && self.hi == PI
    }

    /// is_empty reports whether the interval is empty.
    pub fn is_empty(&self) -> bool {
        self.lo == PI && self.hi == -PI
    }

    /// is_inverted reports whether the interval is inverted; that is, whether lo > hi.
    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }

    /// center returns the midpoint of the interval.
    /// It is undefined for full and empty intervals.
    pub fn center(&self) -> f64 {
        let c = 0.5 * (self.lo + self.hi);
        if !self.is_inverted() {
            return c;
        }
        if c <= 0. {
            c + PI
        } else {
            c - PI
        }
    }

    /// len returns the length of the interval.
    /// The length of an empty interval is negative.
    pub fn len(&self) -> f64 {
        let mut l = self.hi - self.lo;
        if l >= 0. {
            return l;
        }
        l += 2. * PI;
        if l > 0. {
            return l;
        }
        -1.
    }

    /// fast_contains returns true iff the interval contains p.
    /// Assumes p ∈ (-π,π].
    fn fast_contains(&self, p: f64) -> bool {
        if self.is_inverted() {
            (p >= self.lo || p <= self.hi) && !self.is_empty()
        } else {
            p >= self.lo && p <= self.hi
        }
    }

    /// contains returns true iff the interval contains p.
    /// Assumes p ∈ [-π,π].
    pub fn contains(&self, mut p: f64) -> bool {
        if p == -PI {
            p = PI;
        }
        self.fast_contains(p)
    }

    /// contains_interval returns true iff the interval contains oi.
    pub fn contains_interval(&self, oi: &Self) -> bool {
        if self.is_inverted() {
            if oi.is_inverted() {
                return oi.lo >= self.lo && oi.hi <= self.hi;
            }
            return (oi.lo >= self.lo || oi.hi <= self.hi) && !self.is_empty();
        }
        if oi.is_inverted() {
            return self.is_full() || oi.is_empty();
        }
        oi.lo >= self.lo && oi.hi <= self.hi
    }

    /// intersects returns true iff the interval contains any points in common with oi.
    pub fn intersects(&self, oi: &Self) -> bool {
        if self.is_empty() || oi.is_empty() {
            return false;
        }
        if self.is_inverted() {
            return oi.is_inverted() || oi.lo <= self.hi || oi.hi >= self.lo;
        }
        if oi.is_inverted() {
            return oi.lo <= self.hi || oi.hi >= self.lo;
        }
        oi.lo <= self.hi && oi.hi >= self.lo
    }

    /// union returns the smallest interval that contains both the interval and oi.
    pub fn union(&self, oi: &Self) -> Self {
        if oi.is_empty() {
            return *self;
        }
        if self.fast_contains(oi.lo) {
            if self.fast_contains(oi.hi) {
                // Either oi ⊂ i, or i ∪ oi is the full interval.
                if self.contains_interval(oi) {
                    return *self;
                }
                return FULL;
            }
            return Interval {
                lo: self.lo,
                hi: oi.hi,
            };
        }
        if self.fast_contains(oi.hi) {
            return Interval {
                lo: oi.lo,
                hi: self.hi,
            };
        }

        // Neither endpoint of oi is in the interval. Either i ⊂ oi, or the two are disjoint.
        if self.is_empty() || oi.fast_contains(self.lo) {
            return *oi;
        }

        // This is the only hard case where we need to find the closest pair of endpoints.
        if positive_distance(oi.hi, self.lo) < positive_distance(self.hi, oi.lo) {
            return Interval {
                lo: oi.lo,
                hi: self.hi,
            };
        }
        Interval {
            lo: self.lo,
            hi: oi.hi,
        }
    }

    /// add_point returns the interval expanded by the minimum amount necessary such
    /// that it contains the given point "p" (an angle in the range [-π, π]).
    pub fn add_point(&self, mut p: f64) -> Self {
        if p.abs() > PI {
            return *self;
        }
        if p == -PI {
            p = PI;
        }
        if self.fast_contains(p) {
            return *self;
        }
        if self.is_empty() {
            return Interval { lo: p, hi: p };
        }
        if positive_distance(p, self.lo) < positive_distance(self.hi, p) {
            return Interval { lo: p, hi: self.hi };
        }
        Interval { lo: self.lo, hi: p }
    }

    /// expanded returns an interval that has been expanded on each side by margin.
    /// If margin is negative, then the function shrinks the interval on
    /// each side by margin instead. The resulting interval may be empty or
    /// full. Any expansion (positive or negative) of a full interval remains
    /// full, and any expansion of an empty interval remains empty.
    pub fn expanded(&self, margin: f64) -> Self {
        if margin >= 0. {
            if self.is_empty() {
                return *self;
            }
            // Check whether this interval will be full after expansion, allowing
            // for a rounding error when computing each endpoint.
            if self.len() + 2. * margin + 2. * DBL_EPSILON >= 2. * PI {
                return FULL;
            }
        } else {
            if self.is_full() {
                return *self;
            }
            // Check whether this interval will be empty after expansion, allowing
            // for a rounding error when computing each endpoint.
            if self.len() + 2. * margin - 2. * DBL_EPSILON <= 0. {
                return EMPTY;
            }
        }

        let mut result = Interval::from_endpoints(
            libm::remainder(self.lo - margin, 2. * PI),
            libm::remainder(self.hi + margin, 2. * PI),
        );
        if result.lo <= -PI {
            result.lo = PI;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn quad12() -> Interval {
        Interval::from_endpoints(0., -PI)
    }

    fn quad23() -> Interval {
        Interval::from_endpoints(FRAC_PI_2, -FRAC_PI_2)
    }

    fn quad34() -> Interval {
        Interval::from_endpoints(-PI, 0.)
    }

    #[test]
    fn test_constructors() {
        // Check that [-π,-π] is normalized to [π,π].
        let i = Interval::from_endpoints(-PI, -PI);
        assert_eq!(i.lo, PI);
        assert_eq!(i.hi, PI);
        assert!(EMPTY.is_empty() && EMPTY.is_valid());
        assert!(FULL.is_full() && FULL.is_valid());
        assert!(quad23().is_inverted());
    }

    #[test]
    fn test_from_point_pair() {
        assert_eq!(Interval::from_point_pair(-PI, PI), Interval::from_endpoints(PI, PI));
        assert_eq!(Interval::from_point_pair(PI, -PI), Interval::from_endpoints(PI, PI));
        assert_eq!(Interval::from_point_pair(3., -3.), Interval::from_endpoints(3., -3.));
        assert_eq!(Interval::from_point_pair(-3., 3.), Interval::from_endpoints(3., -3.));
    }

    #[test]
    fn test_length_and_center() {
        assert_eq!(quad12().len(), PI);
        assert_eq!(FULL.len(), 2. * PI);
        assert!(EMPTY.len() < 0.);
        assert_eq!(quad12().center(), FRAC_PI_2);
        assert_eq!(quad23().center(), PI);
    }

    #[test]
    fn test_contains() {
        assert!(quad12().contains(PI));
        assert!(quad12().contains(-PI));
        assert!(quad23().contains(PI));
        assert!(!quad23().contains(0.));
        assert!(!EMPTY.contains(0.));
        assert!(FULL.contains(0.));
        assert!(FULL.contains_interval(&quad23()));
        assert!(quad12().contains_interval(&Interval::from_endpoints(1., 2.)));
        assert!(!quad12().contains_interval(&quad34()));
    }

    #[test]
    fn test_union_and_add_point() {
        assert_eq!(quad12().union(&quad34()), FULL);
        assert_eq!(EMPTY.union(&quad12()), quad12());
        let i = EMPTY.add_point(0.).add_point(FRAC_PI_2);
        assert_eq!(i, Interval::from_endpoints(0., FRAC_PI_2));
        let j = Interval::from_endpoints(3., 3.).add_point(-3.);
        assert_eq!(j, Interval::from_endpoints(3., -3.));
    }

    #[test]
    fn test_intersects() {
        assert!(quad12().intersects(&quad23()));
        assert!(!EMPTY.intersects(&FULL));
        assert!(!Interval::from_endpoints(0.1, 0.2).intersects(&Interval::from_endpoints(0.3, 0.4)));
    }

    #[test]
    fn test_expanded() {
        assert_eq!(EMPTY.expanded(1.), EMPTY);
        assert_eq!(FULL.expanded(-1.), FULL);
        assert_eq!(quad12().expanded(PI), FULL);
        let i = Interval::from_endpoints(0.5, 1.).expanded(0.25);
        assert!((i.lo - 0.25).abs() < 1e-15 && (i.hi - 1.25).abs() < 1e-15);
    }
}
