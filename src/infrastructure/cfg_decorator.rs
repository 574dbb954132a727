//! CFG flavor of the heat decoration protocol.
//!
//! Adapts one function's control-flow graph: block labels (short name
//! or full 80-column-wrapped instruction dump), branch/switch edge
//! markers, raw-weight or percentage edge labels, and heat-colored node
//! attributes.

use crate::common::RenderConfig;
use crate::domain::frequency::FrequencyOracle;
use crate::domain::heat;
use crate::domain::ir::{Function, Terminator};
use crate::ports::GraphDecorator;

const MAX_COLUMNS: usize = 80;

pub struct CfgHeatGraph<'a> {
    func: &'a Function,
    func_index: usize,
    oracle: &'a FrequencyOracle,
    /// Normalization ceiling: module-wide or per-function, chosen by
    /// the output driver.
    max_freq: u64,
    config: &'a RenderConfig,
}

impl<'a> CfgHeatGraph<'a> {
    pub fn new(
        func: &'a Function,
        func_index: usize,
        oracle: &'a FrequencyOracle,
        max_freq: u64,
        config: &'a RenderConfig,
    ) -> Self {
        CfgHeatGraph {
            func,
            func_index,
            oracle,
            max_freq,
            config,
        }
    }

    /// Successors resolved to block indices, paired with their position
    /// in terminator order so edge markers and weights stay aligned
    /// even if a target name fails to resolve.
    fn resolved_successors(&self, block: usize) -> Vec<(usize, usize)> {
        self.func.blocks[block]
            .terminator
            .successors()
            .iter()
            .enumerate()
            .filter_map(|(pos, target)| self.func.block_index(target).map(|t| (pos, t)))
            .collect()
    }

    /// Full block dump: header line plus one line per instruction,
    /// comment text (';' to end of line) removed, long lines wrapped at
    /// the nearest preceding space, every line closed with the DOT
    /// left-justification marker.
    fn complete_label(&self, block: usize) -> String {
        let bb = &self.func.blocks[block];
        let mut out = String::new();
        push_wrapped(&mut out, &format!("{}:", bb.display_name(block)));
        for inst in &bb.insts {
            let stripped = strip_comment(inst);
            if stripped.trim().is_empty() {
                continue;
            }
            push_wrapped(&mut out, &format!("  {}", stripped));
        }
        out
    }

    /// Two-decimal percentage of this successor's frequency against the
    /// sum over all sibling successors. None when every sibling is at 0
    /// (the percentage is undefined, so the label is omitted).
    fn percent_label(&self, block: usize, succ: usize) -> Option<String> {
        let resolved = self.resolved_successors(block);
        let total: u64 = resolved
            .iter()
            .map(|&(_, target)| self.oracle.block_freq(self.func_index, target))
            .sum();
        if total == 0 {
            return None;
        }
        let (_, target) = *resolved.get(succ)?;
        let freq = self.oracle.block_freq(self.func_index, target);
        let percent = (freq as f64 / total as f64) * 100.0;
        Some(format!("label=\"{:.2}%\"", percent))
    }
}

impl GraphDecorator for CfgHeatGraph<'_> {
    fn graph_name(&self) -> String {
        format!("Heat CFG for '{}' function", self.func.name)
    }

    fn node_count(&self) -> usize {
        self.func.blocks.len()
    }

    fn node_label(&self, node: usize) -> String {
        if self.config.simple {
            self.func.blocks[node].display_name(node)
        } else {
            self.complete_label(node)
        }
    }

    fn node_attributes(&self, node: usize) -> Option<String> {
        let freq = self.oracle.block_freq(self.func_index, node);
        Some(heat::heat_attributes(freq, self.max_freq))
    }

    fn successors(&self, node: usize) -> Vec<usize> {
        self.resolved_successors(node)
            .into_iter()
            .map(|(_, target)| target)
            .collect()
    }

    fn edge_source_label(&self, node: usize, succ: usize) -> Option<String> {
        let resolved = self.resolved_successors(node);
        let (pos, _) = *resolved.get(succ)?;
        match &self.func.blocks[node].terminator {
            Terminator::Branch { .. } => Some(if pos == 0 { "T" } else { "F" }.to_string()),
            Terminator::Switch { cases, .. } => {
                if pos == 0 {
                    Some("def".to_string())
                } else {
                    cases.get(pos - 1).map(|c| c.value.to_string())
                }
            }
            _ => None,
        }
    }

    fn edge_attributes(&self, node: usize, succ: usize) -> Option<String> {
        if self.config.no_edge_weight {
            return None;
        }
        let term = &self.func.blocks[node].terminator;
        if term.successors().len() <= 1 {
            return None;
        }
        if self.config.raw_edge_weight {
            let resolved = self.resolved_successors(node);
            let (pos, _) = *resolved.get(succ)?;
            // 'W' marks a scaled weight rather than an execution count.
            term.raw_weight(pos).map(|w| format!("label=\"W:{}\"", w))
        } else {
            self.percent_label(node, succ)
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

/// Append `line` to `out`, broken at the last space within 80 columns;
/// continuations are marked with a leading "..." the way unwrappable
/// dumps conventionally are. Every emitted line ends with `\l`.
fn push_wrapped(out: &mut String, line: &str) {
    let mut rest: Vec<char> = line.chars().collect();
    let mut first = true;
    while !rest.is_empty() {
        let prefix = if first { "" } else { "..." };
        let budget = MAX_COLUMNS - prefix.len();
        if rest.len() <= budget {
            out.push_str(prefix);
            out.extend(rest.iter());
            out.push_str("\\l");
            break;
        }
        let split = match rest[..budget].iter().rposition(|&c| c == ' ') {
            // No usable space (or only a leading one): break hard.
            None | Some(0) => budget,
            Some(pos) => pos,
        };
        out.push_str(prefix);
        out.extend(rest[..split].iter());
        out.push_str("\\l");
        rest.drain(..split);
        while rest.first() == Some(&' ') {
            rest.remove(0);
        }
        first = false;
    }
}
