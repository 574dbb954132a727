//! Block execution-frequency resolution.
//!
//! Frequencies come from one of two sources, decided once per module:
//! profiled counters when any function carries profiling metadata, or a
//! static loop-nest estimate otherwise. The two are never mixed within a
//! rendering pass.

use std::collections::{BTreeMap, HashSet};

use crate::domain::ir::{Function, Module};

/// Where a module's frequency samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencySource {
    /// Real counters recorded by a profiling run.
    Profiled,
    /// Structural estimate based on loop nesting.
    Heuristic,
}

impl FrequencySource {
    pub fn for_module(module: &Module) -> Self {
        if module.has_profile_data() {
            FrequencySource::Profiled
        } else {
            FrequencySource::Heuristic
        }
    }
}

/// Per-pass frequency table for every block in a module.
///
/// Built once at the start of a rendering pass and discarded after it;
/// all lookups afterwards are read-only.
#[derive(Debug)]
pub struct FrequencyOracle {
    source: FrequencySource,
    samples: Vec<Vec<u64>>,
}

impl FrequencyOracle {
    pub fn new(module: &Module) -> Self {
        let source = FrequencySource::for_module(module);
        let samples = module
            .functions
            .iter()
            .map(|f| match source {
                FrequencySource::Profiled => f
                    .blocks
                    .iter()
                    .map(|b| b.profile_count.unwrap_or(0))
                    .collect(),
                FrequencySource::Heuristic => loop_depths(f)
                    .into_iter()
                    .map(|depth| 10u64.saturating_pow(depth))
                    .collect(),
            })
            .collect();
        FrequencyOracle { source, samples }
    }

    pub fn source(&self) -> FrequencySource {
        self.source
    }

    /// Frequency sample for one block. Missing data resolves to 0 rather
    /// than an error.
    pub fn block_freq(&self, func: usize, block: usize) -> u64 {
        self.samples
            .get(func)
            .and_then(|blocks| blocks.get(block))
            .copied()
            .unwrap_or(0)
    }

    /// Maximum block frequency within one function; 0 for declarations.
    pub fn max_freq_of(&self, func: usize) -> u64 {
        self.samples
            .get(func)
            .map(|blocks| blocks.iter().copied().max().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Maximum block frequency across the whole module, the
    /// normalization ceiling for module-wide heat coloring.
    pub fn module_max_freq(&self) -> u64 {
        self.samples
            .iter()
            .flat_map(|blocks| blocks.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Loop nesting depth per block, the input to the heuristic estimate.
///
/// Back edges are found by DFS from the entry block; each loop body is
/// the set of blocks that reach a latch without passing through the
/// header, plus the header itself. Blocks unreachable from the entry
/// stay at depth 0.
fn loop_depths(func: &Function) -> Vec<u32> {
    let n = func.blocks.len();
    let mut depths = vec![0u32; n];
    if n == 0 {
        return depths;
    }

    let succs: Vec<Vec<usize>> = func
        .blocks
        .iter()
        .map(|b| {
            b.terminator
                .successors()
                .iter()
                .filter_map(|t| func.block_index(t))
                .collect()
        })
        .collect();
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (from, targets) in succs.iter().enumerate() {
        for &to in targets {
            preds[to].push(from);
        }
    }

    // Iterative DFS; an edge into a block still on the stack is a back
    // edge, its target the loop header.
    const UNVISITED: u8 = 0;
    const ON_STACK: u8 = 1;
    const DONE: u8 = 2;
    let mut state = vec![UNVISITED; n];
    let mut latches: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    state[0] = ON_STACK;
    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        if frame.1 < succs[node].len() {
            let succ = succs[node][frame.1];
            frame.1 += 1;
            match state[succ] {
                UNVISITED => {
                    state[succ] = ON_STACK;
                    stack.push((succ, 0));
                }
                ON_STACK => latches.entry(succ).or_default().push(node),
                _ => {}
            }
        } else {
            state[node] = DONE;
            stack.pop();
        }
    }

    for (header, latch_list) in latches {
        let mut body: HashSet<usize> = HashSet::new();
        body.insert(header);
        let mut worklist: Vec<usize> = Vec::new();
        for latch in latch_list {
            if body.insert(latch) {
                worklist.push(latch);
            }
        }
        while let Some(block) = worklist.pop() {
            for &pred in &preds[block] {
                if body.insert(pred) {
                    worklist.push(pred);
                }
            }
        }
        for block in body {
            depths[block] += 1;
        }
    }

    depths
}
