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

//! Random geometry for randomized tests and benchmarks.

use cgmath::Matrix3;
use rand::Rng;

use crate::r3::vector::Vector;
use crate::s1::angle::Angle;
use crate::s2::point::{get_frame, Point};
use crate::s2::r#loop::Loop;

/// random_float64 returns a uniformly distributed value in the range [0,1).
pub fn random_float64() -> f64 {
    rand::thread_rng().gen()
}

/// random_uniform_float64 returns a uniformly distributed value in the range [lo, hi).
pub fn random_uniform_float64(lo: f64, hi: f64) -> f64 {
    lo + random_float64() * (hi - lo)
}

/// one_in returns true with a probability of 1/n.
pub fn one_in(n: u32) -> bool {
    rand::thread_rng().gen_range(0..n) == 0
}

/// random_point returns a random unit vector uniformly distributed over the sphere.
pub fn random_point() -> Point {
    let mut rng = rand::thread_rng();
    loop {
        let v = Vector::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let norm2 = v.norm2();
        if norm2 > 0. && norm2 <= 1. {
            return Point(v.normalize());
        }
    }
}

/// random_frame returns a right-handed orthonormal frame with a random z-axis.
pub fn random_frame() -> Matrix3<f64> {
    get_frame(&random_point())
}

/// random_regular_loop returns a regular loop around a random center with
/// a radius below max_radius and between 3 and max_vertices vertices.
pub fn random_regular_loop(max_radius: Angle, max_vertices: usize) -> Loop {
    let radius = Angle(random_uniform_float64(max_radius.rad() * 0.1, max_radius.rad()));
    let n = rand::thread_rng().gen_range(3..=max_vertices.max(3));
    Loop::regular_loop_for_frame(&random_frame(), radius, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s1::angle::Deg;
    use crate::s2::region::Region;
    use crate::s2::shape::Shape;

    #[test]
    fn test_random_values_in_range() {
        for _ in 0..100 {
            let f = random_float64();
            assert!((0. ..1.).contains(&f));
            let u = random_uniform_float64(-2., 3.);
            assert!((-2. ..3.).contains(&u));
            assert!(random_point().is_unit());
        }
        assert!(one_in(1));
    }

    #[test]
    fn test_random_regular_loop() {
        for _ in 0..20 {
            let l = random_regular_loop(Deg(10.).into(), 12);
            assert!((3..=12).contains(&l.num_vertices()));
            assert_eq!(l.num_edges(), l.num_vertices());
            assert!(l.validate().is_ok());
            assert!(!l.rect_bound().is_full());
        }
    }
}
