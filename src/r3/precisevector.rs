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

use bigdecimal::BigDecimal;

use crate::r3::vector::Vector;

/// Number of binary places needed to shift the smallest subnormal f64 up to 1.
const SUBNORMAL_SHIFT: i64 = 1074;

/// PreciseVector represents a point in ℝ³ using exact arithmetic.
///
/// Each component is stored as an integer equal to the source f64 multiplied
/// by 2^1074, so every finite f64 maps to an exact value and every sum and
/// product of components stays exact. All vectors share the same scale, which
/// leaves the signs of dot products, cross products and determinants intact.
#[derive(Clone, Debug, PartialEq)]
pub struct PreciseVector {
    pub x: BigDecimal,
    pub y: BigDecimal,
    pub z: BigDecimal,
}

/// precise_zero returns an exact zero.
pub fn precise_zero() -> BigDecimal {
    BigDecimal::from(0i64)
}

/// sign returns -1, 0 or +1 according to the sign of the given exact value.
pub fn sign(v: &BigDecimal) -> i32 {
    match v.cmp(&precise_zero()) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// scaled_float returns f * 2^1074 as an exact integer-valued BigDecimal.
pub fn scaled_float(f: f64) -> BigDecimal {
    if f == 0. || !f.is_finite() {
        return precise_zero();
    }

    let bits = f.to_bits();
    let biased_exp = ((bits >> 52) & 0x7ff) as i64;
    let fraction = (bits & ((1u64 << 52) - 1)) as i64;

    // f == mantissa * 2^(exp - 1074), with exp >= 0.
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, 0)
    } else {
        (fraction | (1i64 << 52), biased_exp - 1075 + SUBNORMAL_SHIFT)
    };

    let v = BigDecimal::from(mantissa) * pow2(exp as u32);
    if f < 0. {
        -v
    } else {
        v
    }
}

/// pow2 returns 2^n computed by repeated squaring.
fn pow2(mut n: u32) -> BigDecimal {
    let mut result = BigDecimal::from(1i64);
    let mut base = BigDecimal::from(2i64);
    while n > 0 {
        if n & 1 == 1 {
            result = result * base.clone();
        }
        base = base.clone() * base;
        n >>= 1;
    }
    result
}

impl PreciseVector {
    /// from_vector creates a scaled exact vector from the given Vector.
    pub fn from_vector(v: &Vector) -> Self {
        PreciseVector {
            x: scaled_float(v.x),
            y: scaled_float(v.y),
            z: scaled_float(v.z),
        }
    }

    /// dot returns the exact dot product of v and ov.
    pub fn dot(&self, ov: &PreciseVector) -> BigDecimal {
        self.x.clone() * ov.x.clone() + self.y.clone() * ov.y.clone() + self.z.clone() * ov.z.clone()
    }

    /// cross returns the exact cross product of v and ov.
    pub fn cross(&self, ov: &PreciseVector) -> PreciseVector {
        PreciseVector {
            x: self.y.clone() * ov.z.clone() - self.z.clone() * ov.y.clone(),
            y: self.z.clone() * ov.x.clone() - self.x.clone() * ov.z.clone(),
            z: self.x.clone() * ov.y.clone() - self.y.clone() * ov.x.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_float_preserves_order_and_sign() {
        let values = [-1e300, -1.5, -f64::MIN_POSITIVE, -5e-324, 0., 5e-324, 0.1, 1., 3.25e10];
        for w in values.windows(2) {
            assert!(
                scaled_float(w[0]) < scaled_float(w[1]),
                "{} should scale below {}",
                w[0],
                w[1]
            );
        }
        assert_eq!(sign(&scaled_float(-2.)), -1);
        assert_eq!(sign(&scaled_float(0.)), 0);
        assert_eq!(sign(&scaled_float(7.)), 1);
    }

    #[test]
    fn test_scaled_float_is_exact() {
        // 0.1 + 0.2 != 0.3 in binary, and exact arithmetic has to see that.
        let sum = scaled_float(0.1) + scaled_float(0.2);
        assert_ne!(sum, scaled_float(0.3));
        assert_eq!(scaled_float(0.5) + scaled_float(0.25), scaled_float(0.75));
    }

    #[test]
    fn test_cross_and_dot() {
        let x = PreciseVector::from_vector(&Vector::new(1., 0., 0.));
        let y = PreciseVector::from_vector(&Vector::new(0., 1., 0.));
        let z = x.cross(&y);
        assert_eq!(sign(&z.z), 1);
        assert_eq!(sign(&z.x), 0);
        assert_eq!(sign(&x.dot(&y)), 0);
        assert_eq!(sign(&x.dot(&x)), 1);
    }
}
