// Command-line entry point for Heatscope.

use std::path::Path;

use anyhow::bail;
use clap::Parser;

use heatscope::application::RenderPass;
use heatscope::common::RenderConfig;
use heatscope::infrastructure::{DotWriter, ModuleLoader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input module description (JSON)
    #[arg(short, long)]
    input: String,

    /// Output directory for .dot files
    #[arg(short, long, default_value = ".")]
    out_dir: String,

    /// Graphs to render (cfg, callgraph, all)
    #[arg(short, long, default_value = "all")]
    graph: String,

    /// Recompute the heat ceiling per function instead of module-wide.
    /// Colors are then not comparable across functions.
    #[arg(long)]
    per_function_ceiling: bool,

    /// Label CFG edges with raw profiling weights instead of percentages
    #[arg(long)]
    raw_edge_weight: bool,

    /// Omit edge weight labels entirely
    #[arg(long)]
    no_edge_weight: bool,

    /// Label call-graph edges with estimated call counts
    #[arg(long)]
    estimate_call_weight: bool,

    /// Include the synthetic external-caller/external-callee nodes
    #[arg(long)]
    full_call_graph: bool,

    /// Heat functions by profiled entry count when available
    #[arg(long)]
    call_counter_heat: bool,

    /// Short CFG node labels (no instruction dumps)
    #[arg(long)]
    simple: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let module = ModuleLoader::load(Path::new(&cli.input))?;
    let config = RenderConfig {
        per_function_ceiling: cli.per_function_ceiling,
        raw_edge_weight: cli.raw_edge_weight,
        no_edge_weight: cli.no_edge_weight,
        estimate_call_weight: cli.estimate_call_weight,
        full_call_graph: cli.full_call_graph,
        call_counter_heat: cli.call_counter_heat,
        simple: cli.simple,
    };

    let pass = RenderPass::new(config, &DotWriter);
    let out_dir = Path::new(&cli.out_dir);

    let mut count = 0usize;
    match cli.graph.as_str() {
        "cfg" => count += pass.render_cfgs(&module, out_dir).len(),
        "callgraph" => count += usize::from(pass.render_call_graph(&module, out_dir).is_some()),
        "all" => {
            count += pass.render_cfgs(&module, out_dir).len();
            count += usize::from(pass.render_call_graph(&module, out_dir).is_some());
        }
        other => bail!("Unknown graph kind: {} (expected cfg, callgraph or all)", other),
    }

    println!("Rendered {} graph file(s) to {}", count, out_dir.display());
    Ok(())
}
