// Infrastructure implementations for Heatscope.

pub mod call_decorator;
pub mod cfg_decorator;
pub mod dot_writer;
pub mod loader;

pub use call_decorator::CallHeatGraph;
pub use cfg_decorator::CfgHeatGraph;
pub use dot_writer::DotWriter;
pub use loader::ModuleLoader;
