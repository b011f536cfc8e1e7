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

use std::io::Write;

use byteorder::WriteBytesExt;
use log::debug;

use crate::s2::cap::Cap;
use crate::s2::chain_index::EdgeChainIndex;
use crate::s2::encoding::{write_bool, write_len, ENCODING_VERSION};
use crate::s2::error::{S2Error, S2Result};
use crate::s2::loop_hierarchy::LoopHierarchy;
use crate::s2::point::Point;
use crate::s2::r#loop::Loop;
use crate::s2::rect::Rect;
use crate::s2::rect_bounder::expand_for_subregions;
use crate::s2::region::Region;
use crate::s2::shape::{Chain, ChainPosition, Dimension, Edge, Shape};

/// Polygon represents a sequence of zero or more loops; recall that the
/// interior of a loop is defined to be its left-hand side (see Loop).
///
/// The loops are stored in a pre-order traversal of the nesting hierarchy,
/// each with its nesting depth. Loops at even depth are shells and loops at
/// odd depth are holes.
///
/// Polygons may represent any region of the sphere with a polygonal boundary,
/// including the entire sphere (known as the "full" polygon). The full polygon
/// consists of a single full loop (see Loop), whereas the empty polygon has no
/// loops at all.
///
/// Use Polygon::full() to construct a full polygon. The default constructor
/// creates an empty polygon.
///
/// Polygons have the following restrictions:
///
///   - Loops may not cross, i.e. the boundary of a loop may not intersect
///     both the interior and exterior of any other loop.
///
///   - Loops may not share edges, i.e. if a loop contains an edge AB, then
///     no other loop may contain AB or BA.
///
///   - Loops may share vertices, however no vertex may appear twice in a
///     single loop (see Loop).
///
///   - No loop may be empty. The full loop may appear only in the full polygon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Polygon {
    hierarchy: LoopHierarchy,

    // index maps global edge ids to loops and back.
    index: EdgeChainIndex,

    // has_holes tracks if this polygon has at least one hole.
    has_holes: bool,

    // num_vertices keeps the running total of all of the vertices of the contained loops.
    num_vertices: usize,

    // bound is a conservative bound on all points contained by this polygon.
    bound: Rect,

    // subregion_bound is the bound expanded so that if this polygon contains
    // another, it also contains the other's bound.
    subregion_bound: Rect,
}

impl Default for Polygon {
    fn default() -> Self {
        Polygon::empty()
    }
}

impl Polygon {
    /// empty returns the polygon with no loops, which contains no points.
    pub fn empty() -> Self {
        Polygon {
            hierarchy: LoopHierarchy::default(),
            index: EdgeChainIndex::default(),
            has_holes: false,
            num_vertices: 0,
            bound: Rect::empty(),
            subregion_bound: Rect::empty(),
        }
    }

    /// full returns a special "full" polygon consisting of the full loop.
    /// It has no edges and therefore no chains.
    pub fn full() -> Self {
        let l = Loop::full();
        let num_vertices = l.num_vertices();
        Polygon {
            hierarchy: LoopHierarchy::single(l),
            index: EdgeChainIndex::default(),
            has_holes: false,
            num_vertices,
            bound: Rect::full(),
            subregion_bound: Rect::full(),
        }
    }

    /// from_loops constructs a polygon from the given loops.
    ///
    /// Zero loops, or a single empty loop, give the empty polygon and a
    /// single full loop gives the full polygon.
    ///
    /// # Panics
    ///
    /// Panics if more than one loop is given. Assigning a nesting hierarchy
    /// to several loops is not supported.
    pub fn from_loops(mut loops: Vec<Loop>) -> Self {
        if loops.len() > 1 {
            panic!(
                "Polygon::from_loops supports at most one loop, got {}",
                loops.len()
            );
        }
        match loops.pop() {
            None => Polygon::empty(),
            Some(l) if l.is_empty() => Polygon::empty(),
            Some(l) if l.is_full() => Polygon::full(),
            Some(l) => Polygon::from_hierarchy(LoopHierarchy::single(l)),
        }
    }

    /// from_hierarchy builds a polygon over loops that are already in
    /// pre-order with their depths assigned.
    pub(crate) fn from_hierarchy(hierarchy: LoopHierarchy) -> Self {
        let loops = hierarchy.loops();
        let num_vertices = loops.iter().map(Loop::num_vertices).sum();
        let index = EdgeChainIndex::new(loops.iter().map(|l| l.num_edges()).collect());

        // Every contained point lies inside some top-level shell.
        let bound = loops
            .iter()
            .filter(|l| l.depth() == 0)
            .fold(Rect::empty(), |b, l| b.union(&l.rect_bound()));
        let subregion_bound = expand_for_subregions(&bound);
        let has_holes = hierarchy.has_holes();

        debug!(
            "polygon with {} loops, {} edges, has_holes={}, cumulative lookup={}",
            hierarchy.num_loops(),
            index.num_edges(),
            has_holes,
            index.is_cumulative()
        );

        Polygon {
            hierarchy,
            index,
            has_holes,
            num_vertices,
            bound,
            subregion_bound,
        }
    }

    pub fn hierarchy(&self) -> &LoopHierarchy {
        &self.hierarchy
    }

    /// num_loops returns the number of loops in this polygon.
    pub fn num_loops(&self) -> usize {
        self.hierarchy.num_loops()
    }

    /// loops returns the loops in this polygon.
    pub fn loops(&self) -> &[Loop] {
        self.hierarchy.loops()
    }

    /// loop_at returns the loop at the given index. Note that during initialization,
    /// the given loops are reordered according to a pre-order traversal of the loop
    /// nesting hierarchy. This implies that every loop is immediately followed by
    /// its descendants. This hierarchy can be traversed using the methods parent,
    /// last_descendant, and Loop::depth.
    pub fn loop_at(&self, k: usize) -> &Loop {
        self.hierarchy.loop_at(k)
    }

    /// parent returns the index of the parent of loop k.
    /// If the loop does not have a parent, None is returned.
    pub fn parent(&self, k: usize) -> Option<usize> {
        self.hierarchy.parent(k)
    }

    /// last_descendant returns the index of the last loop that is contained within loop k.
    /// If k is None, returns the last loop in the polygon.
    /// Note that loops are indexed according to a pre-order traversal of the nesting
    /// hierarchy, so the immediate children of loop k can be found by iterating over
    /// the loops (k+1)..=last_descendant(k) and selecting those whose depth is equal
    /// to loop_at(k).depth() + 1.
    pub fn last_descendant(&self, k: Option<usize>) -> Option<usize> {
        self.hierarchy.last_descendant(k)
    }

    pub fn loop_is_hole(&self, k: usize) -> bool {
        self.hierarchy.is_hole(k)
    }

    pub fn loop_sign(&self, k: usize) -> i32 {
        self.hierarchy.sign(k)
    }

    pub fn has_holes(&self) -> bool {
        self.has_holes
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn subregion_bound(&self) -> Rect {
        self.subregion_bound
    }

    /// is_empty reports whether this is the special "empty" polygon (consisting of no loops).
    pub fn is_empty(&self) -> bool {
        self.hierarchy.num_loops() == 0
    }

    /// is_full reports whether this is the special "full" polygon (consisting of a
    /// single loop that encompasses the entire sphere).
    pub fn is_full(&self) -> bool {
        self.hierarchy.num_loops() == 1 && self.loop_at(0).is_full()
    }

    /// validate checks whether this is a valid polygon. It checks every loop
    /// without building an index, then the loop placement and depths.
    pub fn validate(&self) -> S2Result<()> {
        let loops = self.loops();
        for (i, l) in loops.iter().enumerate() {
            l.find_validation_error_no_index().map_err(|err| match err {
                S2Error::InvalidLoop(msg) => S2Error::InvalidLoop(format!("loop {}: {}", i, msg)),
                other => other,
            })?;
            if l.is_empty() {
                return Err(S2Error::InvalidLoop(format!(
                    "loop {}: empty loops are not allowed",
                    i
                )));
            }
            if l.is_full() && loops.len() > 1 {
                return Err(S2Error::InvalidLoop(format!(
                    "loop {}: full loop appears in non-full polygon",
                    i
                )));
            }
        }

        let mut prev_depth = -1;
        for (i, l) in loops.iter().enumerate() {
            if l.depth() < 0 || l.depth() > prev_depth + 1 {
                return Err(S2Error::InvalidArgument(format!(
                    "loop {} has invalid depth {} after depth {}",
                    i,
                    l.depth(),
                    prev_depth
                )));
            }
            prev_depth = l.depth();
        }
        Ok(())
    }

    /// encode writes the polygon in its lossless format.
    pub fn encode<W: Write>(&self, w: &mut W) -> S2Result<()> {
        self.encode_lossless(w)
    }

    /// encode_lossless writes the version, a legacy flag that is always set,
    /// the hole flag, the loop count, every loop in hierarchy order and
    /// finally the bound. The empty polygon has no lossless form and nothing
    /// is written for it.
    pub fn encode_lossless<W: Write>(&self, w: &mut W) -> S2Result<()> {
        if self.num_vertices == 0 {
            debug!("refusing lossless encoding of a polygon with no vertices");
            return Err(S2Error::Unsupported(
                "lossless encoding of a polygon with no vertices".to_string(),
            ));
        }

        w.write_i8(ENCODING_VERSION)?;
        write_bool(w, true)?;
        write_bool(w, self.has_holes)?;
        write_len(w, self.num_loops())?;
        for l in self.loops() {
            l.encode(w)?;
        }
        self.bound.encode(w)
    }
}

impl Region for Polygon {
    /// cap_bound returns a bounding spherical cap.
    fn cap_bound(&self) -> Cap {
        self.bound.cap_bound()
    }

    /// rect_bound returns a bounding latitude-longitude rectangle.
    fn rect_bound(&self) -> Rect {
        self.bound
    }

    /// contains_point reports whether the polygon contains the point. A point
    /// is inside when an odd number of loops contain it.
    fn contains_point(&self, p: &Point) -> bool {
        if !self.bound.contains_point(p) {
            return false;
        }
        self.loops()
            .iter()
            .fold(false, |inside, l| inside ^ l.contains_point(p))
    }
}

impl Shape for Polygon {
    /// num_edges returns the number of edges in this shape.
    fn num_edges(&self) -> usize {
        self.index.num_edges()
    }

    /// edge returns endpoints for the given edge index.
    fn edge(&self, e: usize) -> Edge {
        let pos = self.index.chain_position(e);
        self.chain_edge(pos.chain_id, pos.offset)
    }

    /// contains_origin reports whether this shape contains the origin.
    fn contains_origin(&self) -> bool {
        self.loops()
            .iter()
            .fold(false, |inside, l| inside ^ l.contains_origin())
    }

    /// num_chains reports the number of contiguous edge chains in the Polygon.
    fn num_chains(&self) -> usize {
        self.index.num_chains()
    }

    /// chain returns the i-th edge Chain (loop) in the Shape.
    fn chain(&self, chain_id: usize) -> Chain {
        self.index.chain(chain_id)
    }

    /// chain_edge returns the j-th edge of the i-th edge Chain (loop).
    fn chain_edge(&self, i: usize, j: usize) -> Edge {
        let l = self.loop_at(i);
        Edge {
            v0: l.vertex(j),
            v1: l.vertex(j + 1),
        }
    }

    /// chain_position returns a pair (i, j) such that edge_id is the
    /// j-th edge of the i-th edge Chain.
    fn chain_position(&self, edge_id: usize) -> ChainPosition {
        self.index.chain_position(edge_id)
    }

    /// dimension returns the dimension of the geometry represented by this Polygon.
    fn dimension(&self) -> Dimension {
        Dimension::PolygonGeometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s1::angle::Deg;
    use crate::s2::chain_index::MAX_LINEAR_SEARCH_LOOPS;
    use crate::s2::random::random_regular_loop;
    use crate::s2::test_util::{make_loop, make_point, nested_loops};

    fn triangle() -> Polygon {
        Polygon::from_loops(vec![make_loop("0:0, 0:10, 10:0")])
    }

    fn nested(num_holes: usize) -> Polygon {
        Polygon::from_hierarchy(LoopHierarchy::from_preordered(nested_loops(num_holes)).unwrap())
    }

    #[test]
    fn test_triangle_shape() {
        let p = triangle();
        assert_eq!(p.num_loops(), 1);
        assert_eq!(p.num_edges(), 3);
        assert_eq!(p.num_vertices(), 3);
        assert_eq!(p.num_chains(), 1);
        assert_eq!(p.chain(0), Chain { start: 0, length: 3 });
        assert_eq!(p.edge(1), p.chain_edge(0, 1));
        assert_eq!(
            p.edge(2),
            Edge {
                v0: make_point("10:0"),
                v1: make_point("0:0")
            }
        );
        assert_eq!(p.chain_position(2), ChainPosition { chain_id: 0, offset: 2 });
        assert_eq!(p.dimension(), Dimension::PolygonGeometry);
        assert!(p.has_interior());
        assert!(!p.contains_origin());
        assert!(!Shape::is_empty(&p) && !Shape::is_full(&p));
    }

    #[test]
    fn test_single_loop_properties() {
        let p = triangle();
        assert!(!p.has_holes());
        assert!(!p.loop_is_hole(0));
        assert_eq!(p.loop_sign(0), 1);
        assert_eq!(p.loop_at(0).depth(), 0);
        assert_eq!(p.parent(0), None);
        assert_eq!(p.last_descendant(Some(0)), Some(0));
        assert_eq!(p.last_descendant(None), Some(0));
        assert_eq!(p.rect_bound(), p.loop_at(0).rect_bound());
        assert_eq!(p.subregion_bound(), expand_for_subregions(&p.rect_bound()));
        assert!(p.subregion_bound().contains(&p.rect_bound()));
        assert!(p.contains_point(&make_point("2:2")));
        assert!(!p.contains_point(&make_point("20:20")));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_depth_reset_on_construction() {
        let mut l = make_loop("0:0, 0:10, 10:0");
        l.set_depth(3);
        let p = Polygon::from_loops(vec![l]);
        assert_eq!(p.loop_at(0).depth(), 0);
        assert!(!p.loop_is_hole(0));
    }

    #[test]
    fn test_empty_polygon() {
        for p in [
            Polygon::empty(),
            Polygon::default(),
            Polygon::from_loops(vec![]),
            Polygon::from_loops(vec![Loop::empty()]),
        ] {
            assert_eq!(p.num_loops(), 0);
            assert!(p.is_empty());
            assert!(!p.is_full());
            assert_eq!(p.num_chains(), 0);
            assert_eq!(p.num_edges(), 0);
            assert!(!p.contains_origin());
            assert!(Shape::is_empty(&p));
            assert!(p.rect_bound().is_empty());
            assert!(p.validate().is_ok());
            assert_eq!(p.last_descendant(None), None);
        }
    }

    #[test]
    fn test_full_polygon() {
        for p in [Polygon::full(), Polygon::from_loops(vec![Loop::full()])] {
            assert_eq!(p.num_loops(), 1);
            assert!(p.is_full());
            assert!(!p.is_empty());
            assert!(p.loop_at(0).is_full());
            assert_eq!(p.num_chains(), 0);
            assert_eq!(p.num_edges(), 0);
            assert_eq!(p.num_vertices(), 1);
            assert!(p.contains_origin());
            assert!(Shape::is_full(&p));
            assert!(p.rect_bound().is_full());
            assert!(p.contains_point(&make_point("-89:123")));
            assert!(p.validate().is_ok());
        }
    }

    #[test]
    #[should_panic]
    fn test_from_loops_rejects_many() {
        Polygon::from_loops(vec![
            make_loop("0:0, 0:10, 10:0"),
            make_loop("20:20, 20:30, 30:20"),
        ]);
    }

    #[test]
    fn test_encode_header() {
        let p = triangle();
        let mut buf = Vec::new();
        p.encode(&mut buf).unwrap();

        let mut loop_buf = Vec::new();
        p.loop_at(0).encode(&mut loop_buf).unwrap();
        let mut rect_buf = Vec::new();
        p.rect_bound().encode(&mut rect_buf).unwrap();

        assert_eq!(buf[0] as i8, ENCODING_VERSION);
        assert_eq!(buf[1], 1);
        assert_eq!(buf[2], 0);
        assert_eq!(&buf[3..7], &1u32.to_le_bytes());
        assert_eq!(&buf[7..7 + loop_buf.len()], &loop_buf[..]);
        assert_eq!(&buf[7 + loop_buf.len()..], &rect_buf[..]);
        assert_eq!(buf.len(), 7 + loop_buf.len() + 33);
    }

    #[test]
    fn test_encode_has_holes_flag() {
        let p = nested(2);
        let mut buf = Vec::new();
        p.encode_lossless(&mut buf).unwrap();
        assert_eq!(buf[2], 1);
        assert_eq!(&buf[3..7], &(p.num_loops() as u32).to_le_bytes());
    }

    #[test]
    fn test_encode_full() {
        let mut buf = Vec::new();
        Polygon::full().encode(&mut buf).unwrap();
        assert_eq!(&buf[3..7], &1u32.to_le_bytes());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serialize_json() {
        let json = serde_json::to_value(nested(2)).unwrap();
        assert_eq!(json["has_holes"], serde_json::json!(true));
        assert_eq!(json["hierarchy"]["loops"].as_array().unwrap().len(), 4);
        assert_eq!(json["index"]["lookup"], serde_json::json!("Linear"));
    }

    #[test]
    fn test_encode_empty_fails() {
        let mut buf = Vec::new();
        let err = Polygon::empty().encode(&mut buf).unwrap_err();
        assert!(matches!(err, S2Error::Unsupported(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_nested_lookup_modes() {
        for num_holes in [2, 4, 9, 20] {
            let p = nested(num_holes);
            assert_eq!(
                p.index.is_cumulative(),
                p.num_loops() > MAX_LINEAR_SEARCH_LOOPS
            );
            let lengths: Vec<usize> = p.loops().iter().map(|l| l.num_vertices()).collect();
            let lin = EdgeChainIndex::linear(lengths.clone());
            let cum = EdgeChainIndex::cumulative(lengths);

            assert_eq!(p.num_chains(), p.num_loops());
            assert_eq!(p.num_edges(), p.num_vertices());
            for e in 0..p.num_edges() {
                let pos = p.chain_position(e);
                assert_eq!(pos, lin.chain_position(e));
                assert_eq!(pos, cum.chain_position(e));
                assert_eq!(p.edge(e), p.chain_edge(pos.chain_id, pos.offset));
                assert_eq!(p.chain(pos.chain_id).start + pos.offset, e);
            }
        }
    }

    #[test]
    fn test_nested_hierarchy() {
        let p = nested(9);
        assert!(p.has_holes());
        assert!(p.validate().is_ok());
        assert_eq!(p.last_descendant(Some(0)), Some(p.num_loops() - 1));
        for k in 1..p.num_loops() {
            let parent = p.parent(k).unwrap();
            assert!(parent < k);
            assert_eq!(p.loop_at(parent).depth(), p.loop_at(k).depth() - 1);
            assert_eq!(p.loop_is_hole(k), p.loop_at(k).depth() == 1);
            assert_eq!(p.loop_sign(k), if p.loop_is_hole(k) { -1 } else { 1 });
        }
        assert_eq!(p.rect_bound(), p.loop_at(0).rect_bound());
    }

    #[test]
    fn test_nested_contains_point() {
        let p = nested(4);
        // Inside the shell, away from the holes.
        assert!(p.contains_point(&make_point("5:20")));
        // Inside hole 1, which has no island.
        assert!(!p.contains_point(&make_point("0:-5.5")));
        // Inside the island in hole 0.
        assert!(p.contains_point(&make_point("0:-8")));
        // Outside the shell.
        assert!(!p.contains_point(&make_point("30:0")));
        assert!(!p.contains_origin());
    }

    #[test]
    fn test_random_single_loops() {
        for _ in 0..50 {
            let l = random_regular_loop(Deg(20.).into(), 40);
            let n = l.num_vertices();
            let p = Polygon::from_loops(vec![l]);
            assert_eq!(p.num_edges(), n);
            assert_eq!(p.chain(0), Chain { start: 0, length: n });
            assert_eq!(p.contains_origin(), p.loop_at(0).contains_origin());
            for e in 0..n {
                assert_eq!(p.edge(e), p.loop_at(0).edge(e));
            }
            let mut buf = Vec::new();
            p.encode(&mut buf).unwrap();
            assert_eq!(buf.len(), 7 + (1 + 4 + 24 * n + 1 + 4 + 33) + 33);
        }
    }

    #[test]
    fn test_validate_rejects_bad_loops() {
        let bad = Loop::from_points(vec![make_point("0:0"), make_point("0:0"), make_point("10:0")]);
        let p = Polygon::from_loops(vec![bad]);
        assert!(matches!(p.validate(), Err(S2Error::InvalidLoop(ref m)) if m.starts_with("loop 0")));

        let h = LoopHierarchy::from_preordered(vec![
            (make_loop("0:0, 0:10, 10:0"), 0),
            (Loop::full(), 0),
        ])
        .unwrap();
        assert!(Polygon::from_hierarchy(h).validate().is_err());
    }
}
