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

use crate::s2::shape::{Chain, ChainPosition};

/// Polygons with more loops than this keep a table of cumulative edge
/// counts so that chain_position does not have to scan every loop.
pub const MAX_LINEAR_SEARCH_LOOPS: usize = 12;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
enum Lookup {
    /// Walk the chains in order, subtracting their lengths.
    Linear,
    /// offsets[i] is the total number of edges in chains 0..i.
    Cumulative(Vec<usize>),
}

/// EdgeChainIndex maps between global edge ids and (chain, offset) pairs
/// for a sequence of chains laid end to end.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeChainIndex {
    lengths: Vec<usize>,
    num_edges: usize,
    lookup: Lookup,
}

impl Default for EdgeChainIndex {
    fn default() -> Self {
        EdgeChainIndex::linear(Vec::new())
    }
}

impl EdgeChainIndex {
    /// new builds an index over chains with the given edge counts, choosing
    /// the cumulative table once there are more than MAX_LINEAR_SEARCH_LOOPS
    /// chains.
    pub fn new(lengths: Vec<usize>) -> Self {
        if lengths.len() > MAX_LINEAR_SEARCH_LOOPS {
            trace!("cumulative edge lookup over {} chains", lengths.len());
            EdgeChainIndex::cumulative(lengths)
        } else {
            trace!("linear edge lookup over {} chains", lengths.len());
            EdgeChainIndex::linear(lengths)
        }
    }

    pub(crate) fn linear(lengths: Vec<usize>) -> Self {
        let num_edges = lengths.iter().sum();
        EdgeChainIndex {
            lengths,
            num_edges,
            lookup: Lookup::Linear,
        }
    }

    pub(crate) fn cumulative(lengths: Vec<usize>) -> Self {
        let mut offsets = Vec::with_capacity(lengths.len());
        let mut num_edges = 0;
        for &n in &lengths {
            offsets.push(num_edges);
            num_edges += n;
        }
        EdgeChainIndex {
            lengths,
            num_edges,
            lookup: Lookup::Cumulative(offsets),
        }
    }

    pub fn num_chains(&self) -> usize {
        self.lengths.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub(crate) fn is_cumulative(&self) -> bool {
        matches!(self.lookup, Lookup::Cumulative(_))
    }

    /// chain returns the start and length of chain i in the global edge numbering.
    pub fn chain(&self, i: usize) -> Chain {
        let start = match &self.lookup {
            Lookup::Cumulative(offsets) => offsets[i],
            Lookup::Linear => self.lengths[..i].iter().sum(),
        };
        Chain {
            start,
            length: self.lengths[i],
        }
    }

    /// chain_position returns the chain holding global edge e and the
    /// offset of e within it. e must be less than num_edges.
    pub fn chain_position(&self, e: usize) -> ChainPosition {
        match &self.lookup {
            Lookup::Cumulative(offsets) => {
                // Empty chains share an offset with their successor, so take
                // the last chain starting at or before e.
                let i = offsets.partition_point(|&start| start <= e) - 1;
                ChainPosition {
                    chain_id: i,
                    offset: e - offsets[i],
                }
            }
            Lookup::Linear => {
                let mut e = e;
                let mut i = 0;
                while e >= self.lengths[i] {
                    e -= self.lengths[i];
                    i += 1;
                }
                ChainPosition {
                    chain_id: i,
                    offset: e,
                }
            }
        }
    }
}
