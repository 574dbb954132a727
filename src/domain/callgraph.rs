//! Call graph construction, sanitization and call-count estimation.
//!
//! Vertices are the module's functions plus two synthetic sentinels: an
//! external caller (calls entering the module) and an external callee
//! (calls leaving it). A caller holds one outgoing edge per call site,
//! so parallel edges are common until `remove_parallel_edges` runs.

use std::collections::HashSet;

use crate::domain::frequency::FrequencyOracle;
use crate::domain::ir::Module;

/// Node index of the synthetic external-caller sentinel.
pub const EXTERNAL_CALLER: usize = 0;
/// Node index of the synthetic external-callee sentinel.
pub const EXTERNAL_CALLEE: usize = 1;
/// Index of the first function node.
const FIRST_FUNCTION: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallNodeKind {
    ExternalCaller,
    ExternalCallee,
    /// Index into `Module::functions`.
    Function(usize),
}

#[derive(Debug)]
pub struct CallNode {
    pub kind: CallNodeKind,
    /// Outgoing edges as node indices, in call-site order.
    pub callees: Vec<usize>,
}

#[derive(Debug)]
pub struct CallGraph {
    pub nodes: Vec<CallNode>,
}

impl CallGraph {
    /// Build the call graph for a module. Every function is assumed
    /// reachable from outside, so the external caller points at each of
    /// them; call sites naming a function not present in the module
    /// become edges to the external callee.
    pub fn build(module: &Module) -> Self {
        let mut nodes = vec![
            CallNode {
                kind: CallNodeKind::ExternalCaller,
                callees: (0..module.functions.len())
                    .map(|i| FIRST_FUNCTION + i)
                    .collect(),
            },
            CallNode {
                kind: CallNodeKind::ExternalCallee,
                callees: vec![],
            },
        ];
        for (index, func) in module.functions.iter().enumerate() {
            let mut callees = Vec::new();
            for block in &func.blocks {
                for callee in &block.calls {
                    match module.function_index(callee) {
                        Some(target) => callees.push(FIRST_FUNCTION + target),
                        None => callees.push(EXTERNAL_CALLEE),
                    }
                }
            }
            nodes.push(CallNode {
                kind: CallNodeKind::Function(index),
                callees,
            });
        }
        CallGraph { nodes }
    }

    /// Node index for a function index.
    pub fn node_of(&self, func: usize) -> usize {
        FIRST_FUNCTION + func
    }

    /// Drop duplicate (parallel) edges so each distinct callee is
    /// reached through at most one edge per caller, keeping the first.
    ///
    /// Destructive: run exactly once, before any decorator reads the
    /// graph. The restart-on-delete scan is quadratic per node but call
    /// sites per function are few. Idempotent; the set of distinct
    /// callees per node is unchanged.
    pub fn remove_parallel_edges(&mut self) {
        for node in &mut self.nodes {
            loop {
                let mut seen: HashSet<usize> = HashSet::new();
                let duplicate = node
                    .callees
                    .iter()
                    .position(|&callee| !seen.insert(callee));
                match duplicate {
                    Some(index) => {
                        node.callees.remove(index);
                    }
                    None => break,
                }
            }
        }
    }
}

/// Estimate how many times `caller` invokes the function named `callee`
/// by summing the frequency of every enclosing call-site block.
///
/// This is an estimate, not an exact dynamic count: it cannot exceed the
/// caller block frequencies it is derived from, and a block that calls
/// the same callee twice contributes its frequency twice (a known bias,
/// kept as-is). Returns 0 when there are no matching call sites.
pub fn estimate_calls(
    module: &Module,
    oracle: &FrequencyOracle,
    caller: usize,
    callee: &str,
) -> u64 {
    let Some(func) = module.functions.get(caller) else {
        return 0;
    };
    let mut total: u64 = 0;
    for (block_index, block) in func.blocks.iter().enumerate() {
        for call in &block.calls {
            if call == callee {
                total = total.saturating_add(oracle.block_freq(caller, block_index));
            }
        }
    }
    total
}

/// Per-pass heat values for call-graph rendering: one resolved frequency
/// per function plus the program-wide ceiling. Discarded after the pass.
#[derive(Debug)]
pub struct CallGraphView {
    freqs: Vec<u64>,
    max_freq: u64,
}

impl CallGraphView {
    /// With `use_entry_counts`, a function's own profiled entry count is
    /// its heat value when available; otherwise (and by default) the
    /// maximum internal block frequency is used. Declarations stay at 0.
    pub fn new(module: &Module, oracle: &FrequencyOracle, use_entry_counts: bool) -> Self {
        let freqs: Vec<u64> = module
            .functions
            .iter()
            .enumerate()
            .map(|(index, func)| {
                if func.is_declaration() {
                    return 0;
                }
                if use_entry_counts {
                    if let Some(count) = func.entry_count {
                        return count;
                    }
                }
                oracle.max_freq_of(index)
            })
            .collect();
        let max_freq = freqs.iter().copied().max().unwrap_or(0);
        CallGraphView { freqs, max_freq }
    }

    pub fn freq(&self, func: usize) -> u64 {
        self.freqs.get(func).copied().unwrap_or(0)
    }

    pub fn max_freq(&self) -> u64 {
        self.max_freq
    }
}
