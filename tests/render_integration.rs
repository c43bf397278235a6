//! End-to-end rendering scenarios: documents and typed records through the
//! full column pipeline, and diagnostic results through both printers.

use doctable::{
    printer_for, tree_prefix, Category, Check, CheckResults, Column, DoctableError, OutputFormat,
    Printer, Record, Renderer, Stage, Status, TablePrinter,
};
use serde_json::{json, Value};

fn components() -> Vec<Value> {
    vec![
        json!({
            "kind": "Dashboard",
            "status": {"conditions": [
                {"type": "Available", "status": "True"},
                {"type": "Ready", "status": "True", "message": "all replicas up"}
            ]}
        }),
        json!({
            "kind": "Workbenches",
            "status": {"conditions": [
                {"type": "Ready", "status": "False", "message": "deployment not ready"}
            ]}
        }),
        json!({"kind": "Kserve"}),
    ]
}

#[test]
fn component_list_table() {
    let mut out = Vec::new();
    let mut renderer = Renderer::with_columns(
        &mut out,
        vec![
            Column::new("TYPE").with_path(".kind").unwrap(),
            Column::new("READY")
                .with_path(r#".status.conditions[]? | select(.type=="Ready") | .status // "Unknown""#)
                .unwrap(),
            Column::new("MESSAGE")
                .with_path(r#".status.conditions[]? | select(.type=="Ready") | .message // """#)
                .unwrap(),
        ],
    )
    .unwrap();
    renderer.append_all(&components()).unwrap();
    renderer.render().unwrap();

    let table = String::from_utf8(out).unwrap();
    let expected = "\
TYPE         READY    MESSAGE
Dashboard    True     all replicas up
Workbenches  False    deployment not ready
Kserve       Unknown
";
    assert_eq!(table, expected);
}

struct User {
    name: String,
    age: u32,
}

impl Record for User {
    fn field(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(json!(self.name)),
            "age" => Some(json!(self.age)),
            _ => None,
        }
    }
}

#[test]
fn typed_records_match_headers_case_insensitively() {
    let users = vec![
        User {
            name: "Alice".to_string(),
            age: 30,
        },
        User {
            name: "Bob".to_string(),
            age: 7,
        },
    ];

    let mut out = Vec::new();
    let mut renderer =
        Renderer::with_columns(&mut out, vec![Column::new("name"), Column::new("AGE")]).unwrap();
    renderer.append_all(&users).unwrap();
    renderer.render().unwrap();

    let table = String::from_utf8(out).unwrap();
    assert_eq!(table, "name   AGE\nAlice  30\nBob    7\n");
}

#[test]
fn formatter_chain_runs_after_extraction() {
    let mut out = Vec::new();
    let mut renderer = Renderer::with_columns(
        &mut out,
        vec![Column::new("TYPE")
            .with_path(".kind")
            .unwrap()
            .with_stage(Stage::uppercase())
            .with_stage(Stage::truncate(7))],
    )
    .unwrap();
    renderer.append(&json!({"kind": "Workbenches"})).unwrap();
    renderer.render().unwrap();

    let table = String::from_utf8(out).unwrap();
    assert_eq!(table, "TYPE\nWORKBE…\n");
}

#[test]
fn malformed_query_fails_at_configuration_time() {
    let err = Column::new("TYPE").with_path(".kind[").unwrap_err();
    assert!(matches!(err, DoctableError::InvalidQuery { .. }));
}

#[test]
fn malformed_value_renders_in_place() {
    let mut out = Vec::new();
    let mut renderer = Renderer::with_columns(
        &mut out,
        vec![
            Column::new("NAME").with_path(".name").unwrap(),
            Column::new("INNER").with_path(".meta.inner").unwrap(),
        ],
    )
    .unwrap();
    renderer
        .append(&json!({"name": "good", "meta": {"inner": "fine"}}))
        .unwrap();
    renderer
        .append(&json!({"name": "odd", "meta": "not an object"}))
        .unwrap();
    renderer.render().unwrap();

    let table = String::from_utf8(out).unwrap();
    assert!(table.contains("fine"));
    assert!(table.contains("cannot index string with \"inner\""));
    // The bad cell did not take the rest of its row or table down.
    assert!(table.contains("odd"));
    assert_eq!(table.lines().count(), 3);
}

fn doctor_results() -> CheckResults {
    CheckResults::from_categories(vec![
        Category {
            name: "components".to_string(),
            status: Status::Warning,
            message: "1 of 3 degraded".to_string(),
            checks: vec![
                Check {
                    name: "dashboard".to_string(),
                    status: Status::Ok,
                    message: "ready".to_string(),
                },
                Check {
                    name: "kserve".to_string(),
                    status: Status::Ok,
                    message: "ready".to_string(),
                },
                Check {
                    name: "workbenches".to_string(),
                    status: Status::Warning,
                    message: "deployment not ready".to_string(),
                },
            ],
        },
        Category {
            name: "connectivity".to_string(),
            status: Status::Ok,
            message: "cluster reachable".to_string(),
            checks: vec![],
        },
    ])
}

#[test]
fn doctor_table_groups_checks_under_categories() {
    let mut out = Vec::new();
    TablePrinter::new(&mut out)
        .print_results(&doctor_results())
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("CHECK"));
    assert!(lines[1].starts_with("components"));
    assert!(lines[2].starts_with("├── dashboard"));
    assert!(lines[3].starts_with("├── kserve"));
    assert!(lines[4].starts_with("└── workbenches"));
    assert!(lines[5].starts_with("connectivity"));
}

#[test]
fn doctor_json_round_trips_with_summary() {
    let results = doctor_results();
    let mut printer = printer_for(OutputFormat::Json, Vec::new());
    printer.print_results(&results).unwrap();

    let direct = serde_json::to_value(&results).unwrap();
    assert_eq!(direct["summary"]["ok"], json!(3));
    assert_eq!(direct["summary"]["warning"], json!(1));
    assert_eq!(direct["summary"]["error"], json!(0));
}

#[test]
fn tree_prefixes_for_single_child() {
    assert_eq!(tree_prefix(0, 1), "└── ");
}
