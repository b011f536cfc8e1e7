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

use crate::consts::DBL_EPSILON;
use crate::r1;
use crate::r3::vector::Vector;
use crate::s1;
use crate::s1::angle::Angle;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::rect::Rect;

/// RectBounder is used to compute a bounding rectangle that contains all edges
/// defined by a vertex chain, v0, v1, v2, ... All vertices must be unit length.
/// Note that the bounding rectangle of an edge can be larger than the bounding
/// rectangle of its endpoints, e.g. consider an edge that passes through the North Pole.
///
/// The bounds are calculated conservatively to account for numerical errors
/// when points are converted to LatLngs. More precisely, this function
/// guarantees the following:
/// Let L be a closed edge chain (Loop) such that the interior of the loop does
/// not contain either pole. Now if P is any point such that L.contains_point(P),
/// then rect_bound(L).contains_point(LatLng::from(P)).
pub struct RectBounder {
    // The previous vertex in the chain.
    a: Point,
    // The previous vertex latitude longitude.
    a_ll: LatLng,
    bound: Rect,
}

impl Default for RectBounder {
    fn default() -> Self {
        RectBounder::new()
    }
}

impl RectBounder {
    /// new returns a new instance of a RectBounder.
    pub fn new() -> Self {
        RectBounder {
            a: Point::default(),
            a_ll: LatLng::default(),
            bound: Rect::empty(),
        }
    }

    /// add_point adds the given point to the chain. The Point must be unit length.
    pub fn add_point(&mut self, b: &Point) {
        let b_ll = LatLng::from(b);

        if self.bound.is_empty() {
            self.a = *b;
            self.a_ll = b_ll;
            self.bound = self.bound.add_point(&b_ll);
            return;
        }

        // First compute the cross product N = A x B robustly. This is the normal
        // to the great circle through A and B. We don't use a robust cross product
        // since that method returns an arbitrary vector orthogonal to A if the two
        // vectors are proportional, and we want the zero vector in that case.
        let n = (self.a.0 - b.0).cross(&(self.a.0 + b.0)); // N = 2 * (A x B)

        // The relative error in N gets large as its norm gets very small (i.e.,
        // when the two points are nearly identical or antipodal). We handle these
        // cases by checking whether N is small enough that the error
        // could affect the result, and if so, we simply add both endpoints.
        let n_norm = n.norm();
        if n_norm < 1.91346e-15 {
            // A and B are either nearly identical or nearly antipodal (to within
            // 4.309 * DBL_EPSILON, or about 6 nanometers on the earth's surface).
            if self.a.dot(b) < 0. {
                // The two points are nearly antipodal. The easiest solution is to
                // assume that the edge between A and B could go in any direction
                // around the sphere.
                self.bound = Rect::full();
            } else {
                // The two points are nearly identical (to within 4.309 * DBL_EPSILON).
                // In this case we can just use the bounding rectangle of the points,
                // since after the expansion done by get_bound this Rect is
                // guaranteed to include the (lat,lng) values of all points along AB.
                self.bound = self
                    .bound
                    .union(&Rect::from_latlng(&self.a_ll).add_point(&b_ll));
            }
            self.a = *b;
            self.a_ll = b_ll;
            return;
        }

        // Compute the longitude range spanned by AB.
        let mut lng_ab = s1::interval::EMPTY
            .add_point(self.a_ll.lng.rad())
            .add_point(b_ll.lng.rad());
        if lng_ab.len() >= PI - 2. * DBL_EPSILON {
            // The points lie on nearly opposite lines of longitude to within the
            // maximum error of the calculation. The easiest solution is to assume
            // that AB could go on either side of the pole.
            lng_ab = s1::interval::FULL;
        }

        // Next we compute the latitude range spanned by the edge AB. We start
        // with the range spanning the two endpoints of the edge:
        let mut lat_ab =
            r1::interval::Interval::from_point(self.a_ll.lat.rad()).add_point(b_ll.lat.rad());

        // This is the desired range unless the edge AB crosses the plane
        // through N and the Z-axis (which is where the great circle through A
        // and B attains its minimum and maximum latitudes). To test whether AB
        // crosses this plane, we compute a vector M perpendicular to this
        // plane and then project A and B onto it.
        let m = n.cross(&Vector::new(0., 0., 1.));
        let m_a = m.dot(&self.a.0);
        let m_b = m.dot(&b.0);

        // We want to test the signs of "m_a" and "m_b", so we need to bound
        // the error in these calculations. It is possible to show that the
        // total error is bounded by
        //
        //  (1 + sqrt(3)) * DBL_EPSILON * n_norm + 8 * sqrt(3) * (DBL_EPSILON**2)
        //    = 6.06638e-16 * n_norm + 6.83174e-31
        let m_error = 6.06638e-16 * n_norm + 6.83174e-31;
        if m_a * m_b < 0. || m_a.abs() <= m_error || m_b.abs() <= m_error {
            // Minimum/maximum latitude *may* occur in the edge interior.
            //
            // The maximum latitude is 90 degrees minus the latitude of N. We
            // compute this directly using atan2 in order to get maximum accuracy
            // near the poles.
            //
            // Our goal is compute a bound that contains the computed latitudes of
            // all Points P that pass the point-in-polygon containment test.
            // There are three sources of error we need to consider:
            // - the directional error in N (at most 3.84 * DBL_EPSILON)
            // - converting N to a maximum latitude
            // - computing the latitude of the test point P
            // The latter two sources of error are at most 0.955 * DBL_EPSILON
            // individually, but it is possible to show by a more complex analysis
            // that together they can add up to at most 1.16 * DBL_EPSILON, for a
            // total error of 5 * DBL_EPSILON.
            //
            // We add 3 * DBL_EPSILON to the bound here, and get_bound() will pad
            // the bound by another 2 * DBL_EPSILON.
            let max_lat = ((n.x * n.x + n.y * n.y).sqrt().atan2(n.z.abs()) + 3. * DBL_EPSILON)
                .min(PI / 2.);

            // In order to get tight bounds when the two points are close together,
            // we also bound the min/max latitude relative to the latitudes of the
            // endpoints A and B. First we compute the distance between A and B,
            // and then we compute the maximum change in latitude between any two
            // points along the great circle that are separated by this distance.
            // This gives us a latitude change "budget". Some of this budget must
            // be spent getting from A to B; the remainder bounds the round-trip
            // distance (in latitude) from A or B to the min or max latitude
            // attained along the edge AB.
            let lat_budget = 2. * (0.5 * (self.a.0 - b.0).norm() * max_lat.sin()).asin();
            let max_delta = 0.5 * (lat_budget - lat_ab.len()) + DBL_EPSILON;

            // Test whether AB passes through the point of maximum latitude or
            // minimum latitude. If the dot product(s) are small enough then the
            // result may be ambiguous.
            if m_a <= m_error && m_b >= -m_error {
                lat_ab.hi = max_lat.min(lat_ab.hi + max_delta);
            }
            if m_b <= m_error && m_a >= -m_error {
                lat_ab.lo = (-max_lat).max(lat_ab.lo - max_delta);
            }
        }
        self.a = *b;
        self.a_ll = b_ll;
        self.bound = self.bound.union(&Rect {
            lat: lat_ab,
            lng: lng_ab,
        });
    }

    /// get_bound returns the bounding rectangle of the edge chain that connects the
    /// vertices defined so far. This bound satisfies the guarantee made
    /// above, i.e. if the edge chain defines a Loop, then the bound contains
    /// the LatLng coordinates of all Points contained by the loop.
    pub fn get_bound(&self) -> Rect {
        self.bound
            .expanded(&LatLng::new(Angle(2. * DBL_EPSILON), Angle(0.)))
            .polar_closure()
    }
}

/// expand_for_subregions expands a bounding Rect so that it is guaranteed to
/// contain the bounds of any subregion whose bounds are computed using
/// RectBounder. For example, consider a loop L that defines a square.
/// get_bound ensures that if a point P is contained by this square, then
/// LatLng::from(P) is contained by the bound. But now consider a diamond
/// shaped loop S contained by L. It is possible that get_bound returns a
/// *larger* bound for S than it does for L, due to rounding errors. This
/// method expands the bound for L so that it is guaranteed to contain the
/// bounds of any subregion S.
///
/// More precisely, if L is a loop that does not contain either pole, and S
/// is a loop such that L.contains(S), then
///
/// ```text
///   expand_for_subregions(L.rect_bound()).contains(S.rect_bound()).
/// ```
pub fn expand_for_subregions(bound: &Rect) -> Rect {
    // Empty bounds don't need expansion.
    if bound.is_empty() {
        return *bound;
    }

    // First we need to check whether the bound B contains any nearly-antipodal
    // points (to within 4.309 * DBL_EPSILON). If so then we need to return
    // the full Rect, since the subregion might have an edge between two
    // such points, and add_point returns Full for such edges. Note that
    // this can happen even if B is not Full; for example, consider a loop
    // that defines a 10km strip straddling the equator extending from
    // longitudes -100 to +80 degrees.
    //
    // It is easy to check whether B contains any antipodal points, but checking
    // for nearly-antipodal points is trickier. Essentially we consider the
    // original bound B and its reflection through the origin B', and then test
    // whether the minimum distance between B and B' is less than 4.309 * DBL_EPSILON.

    // lng_gap is a lower bound on the longitudinal distance between B and its
    // reflection B'. (2.5 * DBL_EPSILON is the maximum combined error of the
    // endpoint longitude calculations and the len call.)
    let lng_gap = (PI - bound.lng.len() - 2.5 * DBL_EPSILON).max(0.);

    // min_abs_lat is the minimum distance from B to the equator (if zero or
    // negative, then B straddles the equator).
    let min_abs_lat = bound.lat.lo.max(-bound.lat.hi);

    // lat_gap_south and lat_gap_north measure the minimum distance from B to the
    // south and north poles respectively.
    let lat_gap_south = PI / 2. + bound.lat.lo;
    let lat_gap_north = PI / 2. - bound.lat.hi;

    if min_abs_lat >= 0. {
        // The bound B does not straddle the equator. In this case the minimum
        // distance is between one endpoint of the latitude edge in B closest to
        // the equator and the other endpoint of that edge in B'. The latitude
        // distance between these two points is 2*min_abs_lat, and the longitude
        // distance is lng_gap. Since we only need accuracy when the distance is
        // very small, we substitute the Euclidean distance, which gives
        //
        //   z ~= sqrt(x^2 + y^2) >= (x + y) / sqrt(2)
        //
        // Therefore the region may contain nearly antipodal points only if
        //
        //  2*min_abs_lat + lng_gap < sqrt(2) * 4.309 * DBL_EPSILON ~= 1.354e-15
        if 2. * min_abs_lat + lng_gap < 1.354e-15 {
            return Rect::full();
        }
    } else if lng_gap >= PI / 2. {
        // B spans at most π/2 in longitude. The minimum distance is always
        // between one corner of B and the diagonally opposite corner of B'.
        // lat_gap_south and lat_gap_north can exceed their true values by up to
        // 0.75 * DBL_EPSILON, so the region may contain nearly antipodal points
        // only if
        //
        //   lat_gap_south + lat_gap_north < (sqrt(2) * 4.309 + 1.5) * DBL_EPSILON
        //                                 ~= 1.687e-15
        if lat_gap_south + lat_gap_north < 1.687e-15 {
            return Rect::full();
        }
    } else {
        // Otherwise we know that (1) the bound straddles the equator and (2) its
        // width in longitude is at least π/2. In this case the minimum
        // distance can occur either between a corner of B and the diagonally
        // opposite corner of B', or between a corner of B and the opposite
        // longitudinal edge reflected in B'. It is sufficient to only consider
        // the corner-edge case, since this distance is also a lower bound on
        // the corner-corner distance when that case applies.
        //
        // From the spherical law of sines on the right triangle formed by a
        // corner of B, its nearest pole and the closest point on the opposite
        // edge of B', the region may contain nearly antipodal points only if
        //
        //   max(lat_gap_south, lat_gap_north) * lng_gap < 1.765e-15
        if lat_gap_south.max(lat_gap_north) * lng_gap < 1.765e-15 {
            return Rect::full();
        }
    }

    // Next we need to check whether the subregion might contain any edges that
    // span (π - 2 * DBL_EPSILON) radians or more in longitude, since add_point
    // sets the longitude bound to Full in that case. This corresponds to
    // testing whether (lng_gap <= 0) in lng_expansion below.

    // Otherwise, the maximum latitude error in add_point is 4.8 * DBL_EPSILON.
    // In the worst case, the errors when computing the latitude bound for a
    // subregion could go in the opposite direction as the errors when computing
    // the bound for the original region, so we need to double this value.
    // (More analysis shows that it's okay to round down to a multiple of
    // DBL_EPSILON.)
    //
    // For longitude, we rely on the fact that atan2 is correctly rounded and
    // therefore no additional bounds expansion is necessary.
    let lat_expansion = 9. * DBL_EPSILON;
    let lng_expansion = if lng_gap <= 0. { PI } else { 0. };
    bound
        .expanded(&LatLng::new(Angle(lat_expansion), Angle(lng_expansion)))
        .polar_closure()
}
