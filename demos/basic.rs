use rulegraph::{Graph, Node, RulegraphError, Solver};
use serde_json::json;

fn main() -> Result<(), RulegraphError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // `a` is a terminal start node; `b` routes to `c` when `foo` holds.
    let mut graph = Graph::new();
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b").with_rules(json!({"var": ["foo"]})));
    let c = graph.add_node(Node::new("c"));
    graph.add_transition(b, c)?;

    println!("{graph}");

    for data in [json!({"foo": true}), json!({"foo": false})] {
        let report = Solver::new().solve_detailed(&graph, &[a, b], &data)?;
        println!("{data} -> {report}");
    }
    Ok(())
}
