use puregraph::algo::{
    get_nodes_of_subgraph_from, get_nodes_of_subgraph_to, has_cycles_in_connected_component,
    has_cycles_in_connected_component_with, StructureConfig,
};
use puregraph::{Graph, GraphBuilder, GraphError};

/// Directed path 0 -> 1 -> ... -> n
fn path(n: usize) -> Graph {
    (0..n)
        .fold(GraphBuilder::new().node("0"), |builder, i| {
            let (a, b) = (i.to_string(), (i + 1).to_string());
            builder.node(b.as_str()).edge(format!("{}__{}", a, b), a, b)
        })
        .build()
        .unwrap()
}

#[test]
fn test_closure_from_middle_of_path() {
    let graph = path(8);
    let reached: Vec<String> = get_nodes_of_subgraph_from(&graph, "2")
        .unwrap()
        .iter()
        .map(|id| id.to_string())
        .collect();

    assert_eq!(reached, vec!["2", "3", "4", "5", "6", "7", "8"]);
}

#[test]
fn test_closure_to_contains_seed() {
    let graph = path(8);

    for seed in ["0", "4", "8"] {
        let nodes = get_nodes_of_subgraph_to(&graph, seed).unwrap();
        assert!(nodes.contains(seed));
    }
    assert_eq!(get_nodes_of_subgraph_to(&graph, "8").unwrap().len(), 9);
    assert_eq!(get_nodes_of_subgraph_to(&graph, "0").unwrap().len(), 1);
}

#[test]
fn test_closure_follows_diamond_once() {
    let graph = GraphBuilder::<()>::new()
        .node("top")
        .node("left")
        .node("right")
        .node("bottom")
        .edge("t-l", "top", "left")
        .edge("t-r", "top", "right")
        .edge("l-b", "left", "bottom")
        .edge("r-b", "right", "bottom")
        .build()
        .unwrap();

    let ancestors = get_nodes_of_subgraph_to(&graph, "bottom").unwrap();
    assert_eq!(ancestors.len(), 4);
    assert_eq!(ancestors.get_index(0).map(|id| id.as_str()), Some("bottom"));
}

#[test]
fn test_tree_check_simple_tree() {
    let graph: Graph = Graph::new()
        .add_node("0")
        .add_node("1")
        .add_edge("0-1", "0", "1")
        .unwrap();

    assert!(!has_cycles_in_connected_component(&graph, "0").unwrap());
    assert!(!has_cycles_in_connected_component(&graph, "1").unwrap());
}

#[test]
fn test_tree_check_three_cycle() {
    let graph = GraphBuilder::<()>::new()
        .node("0")
        .node("1")
        .node("2")
        .edge("0-1", "0", "1")
        .edge("1-2", "1", "2")
        .edge("2-0", "2", "0")
        .build()
        .unwrap();

    assert!(has_cycles_in_connected_component(&graph, "0").unwrap());
    assert!(has_cycles_in_connected_component(&graph, "1").unwrap());
}

#[test]
fn test_tree_check_medium_cycle() {
    let graph = GraphBuilder::<()>::new()
        .node("0")
        .node("1")
        .node("2")
        .node("3")
        .node("4")
        .edge("0-1", "0", "1")
        .edge("1-2", "1", "2")
        .edge("2-3", "2", "3")
        .edge("4-3", "4", "3")
        .edge("4-2", "4", "2")
        .build()
        .unwrap();

    assert!(has_cycles_in_connected_component(&graph, "0").unwrap());
}

#[test]
fn test_tree_check_directed_k2() {
    let graph = GraphBuilder::<()>::new()
        .node("0")
        .node("1")
        .edge("0-1", "0", "1")
        .edge("1-0", "1", "0")
        .build()
        .unwrap();

    assert!(has_cycles_in_connected_component(&graph, "0").unwrap());
    assert!(has_cycles_in_connected_component(&graph, "1").unwrap());
}

#[test]
fn test_tree_check_large_tree() {
    let graph = path(100);
    assert!(!has_cycles_in_connected_component(&graph, "50").unwrap());
}

#[test]
fn test_tree_check_large_cycle() {
    let graph = path(100).add_edge("0__100", "0", "100").unwrap();
    assert!(has_cycles_in_connected_component(&graph, "50").unwrap());
}

#[test]
fn test_tree_check_exhausts_round_cap() {
    let graph = path(1000);
    let err = has_cycles_in_connected_component(&graph, "0").unwrap_err();

    assert_eq!(err, GraphError::ResourceExhausted { rounds: 1000 });
    assert!(err.is_resource_exhausted());
    assert!(err.to_string().contains("more than 1000 checks"));
}

#[test]
fn test_tree_check_with_raised_cap() {
    let graph = path(1000);
    let config = StructureConfig::default().with_max_rounds(2000);

    assert!(!has_cycles_in_connected_component_with(&graph, "0", &config).unwrap());
}
