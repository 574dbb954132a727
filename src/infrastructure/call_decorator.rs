//! Call-graph flavor of the heat decoration protocol.
//!
//! Functions are heat-colored by their resolved frequency; the
//! synthetic external caller/callee sentinels stay hidden unless the
//! full-call-graph toggle is set, and declarations are never colored.

use crate::common::RenderConfig;
use crate::domain::callgraph::{estimate_calls, CallGraph, CallGraphView, CallNodeKind};
use crate::domain::frequency::FrequencyOracle;
use crate::domain::heat;
use crate::domain::ir::Module;
use crate::ports::GraphDecorator;

pub struct CallHeatGraph<'a> {
    module: &'a Module,
    /// Sanitized call graph: `remove_parallel_edges` must already have
    /// run, this decorator only reads.
    graph: &'a CallGraph,
    view: &'a CallGraphView,
    oracle: &'a FrequencyOracle,
    config: &'a RenderConfig,
}

impl<'a> CallHeatGraph<'a> {
    pub fn new(
        module: &'a Module,
        graph: &'a CallGraph,
        view: &'a CallGraphView,
        oracle: &'a FrequencyOracle,
        config: &'a RenderConfig,
    ) -> Self {
        CallHeatGraph {
            module,
            graph,
            view,
            oracle,
            config,
        }
    }

    fn function_of(&self, node: usize) -> Option<usize> {
        match self.graph.nodes.get(node)?.kind {
            CallNodeKind::Function(index) => Some(index),
            _ => None,
        }
    }
}

impl GraphDecorator for CallHeatGraph<'_> {
    fn graph_name(&self) -> String {
        format!("Call graph of module {}", self.module.name)
    }

    fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    fn node_visible(&self, node: usize) -> bool {
        match self.graph.nodes[node].kind {
            CallNodeKind::ExternalCaller | CallNodeKind::ExternalCallee => {
                self.config.full_call_graph
            }
            CallNodeKind::Function(_) => true,
        }
    }

    fn node_label(&self, node: usize) -> String {
        match self.graph.nodes[node].kind {
            CallNodeKind::ExternalCaller => "external caller".to_string(),
            CallNodeKind::ExternalCallee => "external callee".to_string(),
            CallNodeKind::Function(index) => self.module.functions[index].name.clone(),
        }
    }

    fn node_attributes(&self, node: usize) -> Option<String> {
        let index = self.function_of(node)?;
        if self.module.functions[index].is_declaration() {
            return None;
        }
        Some(heat::heat_attributes(
            self.view.freq(index),
            self.view.max_freq(),
        ))
    }

    fn successors(&self, node: usize) -> Vec<usize> {
        self.graph.nodes[node].callees.clone()
    }

    fn edge_attributes(&self, node: usize, succ: usize) -> Option<String> {
        if !self.config.estimate_call_weight {
            return None;
        }
        let caller = self.function_of(node)?;
        let target = *self.graph.nodes[node].callees.get(succ)?;
        let callee = self.function_of(target)?;
        let count = estimate_calls(
            self.module,
            self.oracle,
            caller,
            &self.module.functions[callee].name,
        );
        Some(format!("label=\"{}\"", count))
    }
}
