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

use log::trace;

use crate::s2::error::{S2Error, S2Result};
use crate::s2::r#loop::Loop;

/// LoopHierarchy stores the loops of a polygon in depth-first preorder:
/// every loop is followed immediately by the loops nested inside it. Each
/// loop carries its nesting depth. Shells have even depth and holes odd.
///
/// The hierarchy is read-only once built; all navigation is done by
/// scanning the depths.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoopHierarchy {
    loops: Vec<Loop>,
}

impl LoopHierarchy {
    /// from_preordered builds a hierarchy from loops already in preorder
    /// together with their depths. The first loop must have depth 0 and a
    /// loop may be at most one level deeper than the loop before it.
    pub(crate) fn from_preordered(entries: Vec<(Loop, i32)>) -> S2Result<Self> {
        let mut loops = Vec::with_capacity(entries.len());
        let mut prev_depth = -1;
        for (i, (mut l, depth)) in entries.into_iter().enumerate() {
            if depth < 0 {
                return Err(S2Error::InvalidArgument(format!(
                    "loop {} has negative depth {}",
                    i, depth
                )));
            }
            if depth > prev_depth + 1 {
                return Err(S2Error::InvalidArgument(format!(
                    "loop {} at depth {} skips a level after depth {}",
                    i, depth, prev_depth
                )));
            }
            l.set_depth(depth);
            loops.push(l);
            prev_depth = depth;
        }
        trace!("built loop hierarchy with {} loops", loops.len());
        Ok(LoopHierarchy { loops })
    }

    /// single wraps one loop as a hierarchy of depth 0.
    pub(crate) fn single(mut l: Loop) -> Self {
        l.set_depth(0);
        LoopHierarchy { loops: vec![l] }
    }

    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn loop_at(&self, k: usize) -> &Loop {
        &self.loops[k]
    }

    /// parent returns the index of the loop that directly encloses loop k,
    /// or None if k is a top-level shell.
    pub fn parent(&self, k: usize) -> Option<usize> {
        let depth = self.loops[k].depth();
        if depth == 0 {
            return None;
        }
        (0..k).rev().find(|&i| self.loops[i].depth() < depth)
    }

    /// last_descendant returns the index of the last loop contained within
    /// loop k, or k itself if it has no descendants. None stands for the
    /// virtual root above all shells, in which case the last loop is returned.
    /// An empty hierarchy has no loops and so no last descendant.
    pub fn last_descendant(&self, k: Option<usize>) -> Option<usize> {
        let Some(k) = k else {
            return self.loops.len().checked_sub(1);
        };
        let depth = self.loops[k].depth();
        let mut last = k;
        while last + 1 < self.loops.len() && self.loops[last + 1].depth() > depth {
            last += 1;
        }
        Some(last)
    }

    pub fn is_hole(&self, k: usize) -> bool {
        self.loops[k].is_hole()
    }

    pub fn sign(&self, k: usize) -> i32 {
        self.loops[k].sign()
    }

    /// has_holes reports whether any loop in the hierarchy is a hole.
    pub fn has_holes(&self) -> bool {
        self.loops.iter().any(Loop::is_hole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s2::test_util::{make_loop, nested_loops};

    fn tri() -> Loop {
        make_loop("0:0, 0:10, 10:0")
    }

    #[test]
    fn test_rejects_bad_depths() {
        assert!(LoopHierarchy::from_preordered(vec![(tri(), 1)]).is_err());
        assert!(LoopHierarchy::from_preordered(vec![(tri(), 0), (tri(), 2)]).is_err());
        assert!(LoopHierarchy::from_preordered(vec![(tri(), 0), (tri(), -1)]).is_err());
        assert!(LoopHierarchy::from_preordered(vec![]).is_ok());
    }

    #[test]
    fn test_single() {
        let mut l = tri();
        l.set_depth(5);
        let h = LoopHierarchy::single(l);
        assert_eq!(h.num_loops(), 1);
        assert_eq!(h.loop_at(0).depth(), 0);
        assert_eq!(h.parent(0), None);
        assert_eq!(h.last_descendant(Some(0)), Some(0));
        assert_eq!(h.last_descendant(None), Some(0));
        assert!(!h.has_holes());
        assert_eq!(h.sign(0), 1);
    }

    #[test]
    fn test_navigation() {
        // 0
        //   1
        //     2
        //   3
        // 4
        //   5
        let h = LoopHierarchy::from_preordered(vec![
            (tri(), 0),
            (tri(), 1),
            (tri(), 2),
            (tri(), 1),
            (tri(), 0),
            (tri(), 1),
        ])
        .unwrap();

        let parents: Vec<_> = (0..6).map(|k| h.parent(k)).collect();
        assert_eq!(
            parents,
            vec![None, Some(0), Some(1), Some(0), None, Some(4)]
        );
        let last: Vec<_> = (0..6).map(|k| h.last_descendant(Some(k))).collect();
        assert_eq!(
            last,
            vec![Some(3), Some(2), Some(2), Some(3), Some(5), Some(5)]
        );
        assert_eq!(h.last_descendant(None), Some(5));

        assert!(h.has_holes());
        assert!(h.is_hole(1) && h.is_hole(3) && h.is_hole(5));
        assert!(!h.is_hole(2));
        assert_eq!(h.sign(3), -1);
        assert_eq!(h.sign(2), 1);
    }

    #[test]
    fn test_parent_and_descendant_consistent() {
        let h = LoopHierarchy::from_preordered(nested_loops(9)).unwrap();
        for k in 0..h.num_loops() {
            let last = h.last_descendant(Some(k)).unwrap();
            assert!(last >= k);
            for d in k + 1..=last {
                assert!(h.loop_at(d).depth() > h.loop_at(k).depth());
                // Every descendant's ancestor chain passes through k.
                let mut p = h.parent(d);
                while let Some(i) = p {
                    if i == k {
                        break;
                    }
                    p = h.parent(i);
                }
                assert_eq!(p, Some(k));
            }
            if let Some(p) = h.parent(k) {
                assert_eq!(h.loop_at(p).depth() + 1, h.loop_at(k).depth());
                assert!(h.last_descendant(Some(p)).unwrap() >= last);
            }
        }
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_decoded_loops_are_revalidated() {
        let mut nested = tri();
        nested.set_depth(2);
        let json = serde_json::to_string(&vec![tri(), nested]).unwrap();

        let loops: Vec<Loop> = serde_json::from_str(&json).unwrap();
        assert_eq!(loops[1].depth(), 2);
        let entries = loops
            .into_iter()
            .map(|l| {
                let depth = l.depth();
                (l, depth)
            })
            .collect();
        assert!(LoopHierarchy::from_preordered(entries).is_err());
    }

    #[test]
    fn test_empty_hierarchy() {
        let h = LoopHierarchy::default();
        assert_eq!(h.num_loops(), 0);
        assert_eq!(h.last_descendant(None), None);
        assert!(!h.has_holes());
    }
}
