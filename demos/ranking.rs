use rulegraph::{Graph, Solver};
use serde_json::json;

const PLANS: &str = r#"[
    {"Payload": "intake", "Transitions": [
        {"Payload": "standard", "Weight": 10},
        {"Payload": "senior", "Weight": 20,
         "Rules": {">=": [{"var": "user.age"}, 65]}},
        {"Payload": "smoker",
         "Rules": {"var": "user.smoker"},
         "WeightRules": {"if": [{">": [{"var": "user.age"}, 50]}, 100, 50]}}
    ]}
]"#;

fn main() {
    let (graph, start) = Graph::<String>::from_json(PLANS).expect("plan definitions are valid");
    let solver = Solver::new();

    let applicants = [
        json!({"user": {"age": 30, "smoker": false}}),
        json!({"user": {"age": 45, "smoker": true}}),
        json!({"user": {"age": 70, "smoker": true}}),
    ];

    for data in &applicants {
        let results = solver
            .solve(&graph, &start, data)
            .expect("plan rules are well formed");
        let ranked: Vec<String> = results
            .iter()
            .map(|r| format!("{} ({})", r.payload(), r.weight()))
            .collect();
        println!("{data}: {}", ranked.join(", "));
    }
}
