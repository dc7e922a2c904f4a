//! 客户端命令集成测试
//!
//! 测试范围:
//! - GRAPH.EXPLAIN / GRAPH.DELETE 命令与回复
//! - 存储过程调用的参数转义
//! - 从配置文件构造客户端
//! - 传输层错误原样透出

mod common;

use common::assertions::{assert_err_with, assert_ok};
use common::data_fixtures::query_reply;
use common::{test_graph, Call, ScriptedTransport};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

use redisgraph::api::Graph;
use redisgraph::cache::SchemaKind;
use redisgraph::config::Config;
use redisgraph::core::{GraphError, Reply, TransportError};

#[test]
fn test_explain_returns_plan_lines() {
    let (transport, graph) = test_graph();
    transport.push_json(json!(["Results", "    Project", "        All Node Scan | (a)"]));

    let plan = assert_ok(graph.explain("MATCH (a) RETURN a"));
    assert_eq!(plan.len(), 3);
    assert_eq!(plan[1].trim(), "Project");
    assert_eq!(
        transport.calls(),
        vec![Call {
            command: "GRAPH.EXPLAIN".to_string(),
            args: vec!["social".to_string(), "MATCH (a) RETURN a".to_string()],
        }]
    );
}

#[test]
fn test_delete_keeps_metadata_cache() {
    let (transport, graph) = test_graph();
    transport.set_labels(&["person"]);
    assert_eq!(graph.schema().refresh(SchemaKind::Label).ok(), Some(1));

    transport.push_reply(Reply::String(
        "Graph removed, internal execution time: 0.1 milliseconds".into(),
    ));
    let message = assert_ok(graph.delete());
    assert!(message.starts_with("Graph removed"));
    assert_eq!(graph.schema().labels(), vec!["person"]);

    let last = transport.calls().pop().expect("delete call");
    assert_eq!(last.command, "GRAPH.DELETE");
    assert_eq!(last.args, vec!["social"]);
}

#[test]
fn test_delete_missing_graph() {
    let (transport, graph) = test_graph();
    transport.push_reply(Reply::Error("ERR Invalid graph operation on empty key".into()));
    let err = graph.delete().unwrap_err();
    assert!(matches!(err, GraphError::Server(ref m) if m.contains("empty key")));
}

#[test]
fn test_call_procedure_quotes_arguments() {
    let (transport, graph) = test_graph();
    transport.push_json(query_reply(&["node"], vec![], &[]));

    let result = assert_ok(graph.call_procedure("db.idx.fulltext.queryNodes", &["Movie", "Jun\"gle"]));
    assert!(result.is_empty());

    let call = transport.calls().pop().expect("procedure call");
    assert_eq!(call.command, "GRAPH.QUERY");
    assert_eq!(
        call.args[1],
        "CALL db.idx.fulltext.queryNodes(\"Movie\",\"Jun\\\"gle\")"
    );
    assert_eq!(call.args[2], "--compact");
}

#[test]
fn test_graph_from_config_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(b"graph = \"imdb\"\n")
        .expect("Failed to write TOML content to temporary file");
    let config = Config::load(file.path()).expect("Failed to load config");

    let transport = ScriptedTransport::new();
    let graph = Graph::from_config(&config, transport.clone());
    assert_eq!(graph.id(), "imdb");
    assert_eq!(graph.schema().graph(), "imdb");

    transport.push_json(json!([[]]));
    assert_ok(graph.query("RETURN 1"));
    assert_eq!(transport.calls()[0].args[0], "imdb");
}

#[test]
fn test_transport_errors_pass_through() {
    let (transport, graph) = test_graph();
    transport.push_failure("connection reset by peer");

    let err = assert_err_with(graph.query("RETURN 1"), "connection reset by peer");
    assert!(matches!(
        err,
        GraphError::Transport(TransportError::Other(ref m)) if m == "connection reset by peer"
    ));

    // 队列已空
    assert!(matches!(
        graph.explain("RETURN 1").unwrap_err(),
        GraphError::Transport(TransportError::Closed)
    ));
}
