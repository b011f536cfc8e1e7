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

use crate::s2::cap::Cap;
use crate::s2::point::Point;
use crate::s2::rect::Rect;

/// A Region represents a two-dimensional region on the unit sphere.
///
/// The purpose of this interface is to allow complex regions to be
/// approximated as simpler regions. The interface is restricted to methods
/// that are useful for computing approximations.
pub trait Region {
    /// cap_bound returns a bounding spherical cap. This is not guaranteed to be exact.
    fn cap_bound(&self) -> Cap;

    /// rect_bound returns a bounding latitude-longitude rectangle that contains
    /// the region. The bounds are not guaranteed to be tight.
    fn rect_bound(&self) -> Rect;

    /// contains_point reports whether the region contains the given point or not.
    /// The point should be unit length, although some implementations may relax
    /// this restriction.
    fn contains_point(&self, p: &Point) -> bool;
}
