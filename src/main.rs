use anyhow::Result;
use puregraph::algo::{get_nodes_of_subgraph_to, has_cycles_in_connected_component};
use puregraph::{CompactGraph, Graph, GraphBuilder};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Pure Graph v{}", puregraph::version());
    println!("==========================================");
    println!();

    let graph: Graph<&str> = GraphBuilder::new()
        .node_with_data("fetch", "download sources")
        .node_with_data("unpack", "extract archive")
        .node_with_data("configure", "run configure")
        .node_with_data("build", "compile")
        .node_with_data("docs", "render docs")
        .edge("fetch->unpack", "fetch", "unpack")
        .edge("unpack->configure", "unpack", "configure")
        .edge("configure->build", "configure", "build")
        .edge("unpack->docs", "unpack", "docs")
        .build()?;
    info!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    println!("=== Closure ===");
    let needed: Vec<String> = get_nodes_of_subgraph_to(&graph, "build")?
        .iter()
        .map(|id| id.to_string())
        .collect();
    println!("build depends on: {}", needed.join(", "));

    println!("\n=== Tree check ===");
    println!(
        "component of fetch has cycles: {}",
        has_cycles_in_connected_component(&graph, "fetch")?
    );
    let looped = graph.add_edge("docs->build", "docs", "build")?;
    println!(
        "after docs->build it has cycles: {}",
        has_cycles_in_connected_component(&looped, "fetch")?
    );

    println!("\n=== Compact form ===");
    let json = graph.to_compact().to_json()?;
    println!("{}", json);
    let restored: Graph = CompactGraph::from_json(&json)?.into_graph()?;
    info!(
        "Restored {} nodes and {} edges from compact form",
        restored.node_count(),
        restored.edge_count()
    );

    Ok(())
}
