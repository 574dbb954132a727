//! Process-wide rendering configuration.

/// Toggles for one rendering pass.
///
/// Built once from the command line, then threaded by reference through
/// every component; nothing reads ambient global state mid-pass. Note
/// that per-function ceilings make colors non-comparable across
/// functions; that is the point of the mode, not a defect.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    /// Recompute the frequency ceiling per function instead of using
    /// one module-wide ceiling.
    pub per_function_ceiling: bool,
    /// Label edges with raw profiling weight counters instead of
    /// computed percentages.
    pub raw_edge_weight: bool,
    /// Omit edge weight labels entirely.
    pub no_edge_weight: bool,
    /// Label call-graph edges with estimated call counts.
    pub estimate_call_weight: bool,
    /// Show the synthetic external-caller/external-callee nodes.
    pub full_call_graph: bool,
    /// Heat a function by its profiled entry count when available,
    /// instead of its maximum internal block frequency.
    pub call_counter_heat: bool,
    /// Short CFG node labels (block names only, no instruction dump).
    pub simple: bool,
}
