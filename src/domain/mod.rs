// Domain layer for Heatscope: IR model, frequency analysis, heat
// mapping and the call graph.

pub mod callgraph;
pub mod frequency;
pub mod heat;
pub mod ir;
