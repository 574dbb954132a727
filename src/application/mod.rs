//! Output driver: one full rendering pass over a module.
//!
//! Compute the frequency ceiling, walk the functions, hand each graph
//! to the exporter. A unit that cannot be written is reported and
//! skipped; the pass itself never fails.

use std::path::{Path, PathBuf};

use crate::common::RenderConfig;
use crate::domain::callgraph::{CallGraph, CallGraphView};
use crate::domain::frequency::FrequencyOracle;
use crate::domain::ir::Module;
use crate::infrastructure::{CallHeatGraph, CfgHeatGraph};
use crate::ports::OutputExporter;

pub struct RenderPass<'a> {
    pub config: RenderConfig,
    pub exporter: &'a dyn OutputExporter,
}

impl<'a> RenderPass<'a> {
    pub fn new(config: RenderConfig, exporter: &'a dyn OutputExporter) -> Self {
        RenderPass { config, exporter }
    }

    /// Emit `heatcfg.<function>.dot` for every defined function.
    /// Returns the paths actually written.
    pub fn render_cfgs(&self, module: &Module, out_dir: &Path) -> Vec<PathBuf> {
        let oracle = FrequencyOracle::new(module);
        let module_max = oracle.module_max_freq();
        let mut written = Vec::new();
        for (index, func) in module.functions.iter().enumerate() {
            if func.is_declaration() {
                continue;
            }
            let max_freq = if self.config.per_function_ceiling {
                oracle.max_freq_of(index)
            } else {
                module_max
            };
            let graph = CfgHeatGraph::new(func, index, &oracle, max_freq, &self.config);
            let filename = format!("heatcfg.{}.dot", func.name);
            let path = out_dir.join(&filename);
            println!("Writing '{}'...", filename);
            match self.exporter.export(&graph, &path) {
                Ok(()) => written.push(path),
                Err(e) => eprintln!("[WARN] Cannot write '{}': {}", path.display(), e),
            }
        }
        written
    }

    /// Emit `<module>.heatcallgraph.dot` for the whole module. Parallel
    /// call edges are removed before the decorator ever sees the graph.
    pub fn render_call_graph(&self, module: &Module, out_dir: &Path) -> Option<PathBuf> {
        let oracle = FrequencyOracle::new(module);
        let mut graph = CallGraph::build(module);
        graph.remove_parallel_edges();
        let view = CallGraphView::new(module, &oracle, self.config.call_counter_heat);
        let decorated = CallHeatGraph::new(module, &graph, &view, &oracle, &self.config);
        let filename = format!("{}.heatcallgraph.dot", module.name);
        let path = out_dir.join(&filename);
        println!("Writing '{}'...", filename);
        match self.exporter.export(&decorated, &path) {
            Ok(()) => Some(path),
            Err(e) => {
                eprintln!("[WARN] Cannot write '{}': {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ir::{BasicBlock, Function, Terminator};
    use crate::infrastructure::DotWriter;

    fn tiny_module() -> Module {
        Module {
            name: "tiny".to_string(),
            functions: vec![
                Function {
                    name: "main".to_string(),
                    blocks: vec![BasicBlock {
                        name: "entry".to_string(),
                        insts: vec![],
                        profile_count: None,
                        terminator: Terminator::Ret,
                        calls: vec![],
                    }],
                    entry_count: None,
                },
                Function {
                    name: "decl_only".to_string(),
                    blocks: vec![],
                    entry_count: None,
                },
            ],
        }
    }

    #[test]
    fn test_declarations_are_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let pass = RenderPass::new(RenderConfig::default(), &DotWriter);
        let written = pass.render_cfgs(&tiny_module(), dir.path());
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("heatcfg.main.dot"));
    }

    #[test]
    fn test_unwritable_unit_is_skipped_not_fatal() {
        let pass = RenderPass::new(RenderConfig::default(), &DotWriter);
        let bogus = Path::new("/nonexistent-dir/for-heatscope");
        let written = pass.render_cfgs(&tiny_module(), bogus);
        assert!(written.is_empty());
        assert!(pass.render_call_graph(&tiny_module(), bogus).is_none());
    }

    #[test]
    fn test_call_graph_file_is_named_after_module() {
        let dir = tempfile::tempdir().unwrap();
        let pass = RenderPass::new(RenderConfig::default(), &DotWriter);
        let path = pass.render_call_graph(&tiny_module(), dir.path()).unwrap();
        assert!(path.ends_with("tiny.heatcallgraph.dot"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("digraph"));
        assert!(text.contains("Call graph of module tiny"));
    }
}
