//! End-to-end MCP sessions over in-memory line-delimited JSON-RPC.
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::seeded_lookups;
use serde_json::{Value, json};
use tokio::io::BufReader;
use workfacts::ToolRegistry;
use workfacts::mcp::McpServer;

/// Feeds one message per line through `serve` and returns the parsed responses.
async fn session(server: &McpServer, messages: &[Value]) -> Vec<Value> {
    let input: String = messages.iter().map(|m| format!("{m}\n")).collect();
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("session completes");

    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json response"))
        .collect()
}

fn server() -> McpServer {
    McpServer::new(ToolRegistry::new(seeded_lookups()))
}

#[tokio::test]
async fn test_full_session() {
    let responses = session(
        &server(),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "lookup_wages",
                    "arguments": {"soc_code": "29-2052", "state": "IA"}
                }
            }),
        ],
    )
    .await;

    // The notification gets no response.
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "workfacts");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 16);

    let call = &responses[2]["result"];
    assert_eq!(call["isError"], false);
    let text = call["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("$38,120"));
    assert!(text.contains("Source: BLS Occupational Employment and Wage Statistics (May 2024)"));
}

#[tokio::test]
async fn test_persona_session_advertises_subset_but_serves_all() {
    let server = server().with_persona("compliance_reviewer");
    let responses = session(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "get_institution_profile", "arguments": {"institution_id": 1}}
            }),
        ],
    )
    .await;

    let names: Vec<&str> = responses[0]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 6);
    assert!(names.contains(&"search_statutes"));
    assert!(!names.contains(&"get_institution_profile"));

    let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Kirkwood Community College"));
}

#[tokio::test]
async fn test_errors_keep_the_session_alive() {
    let responses = session(
        &server(),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "lookup_wages", "arguments": {"soc_code": 29}}
            }),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "lookup_wages", "arguments": {"soc_code": "29-2052", "state": "NE"}}
            }),
            json!({"jsonrpc": "2.0", "id": 4, "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32601);

    assert_eq!(responses[1]["result"]["isError"], true);
    let invalid = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(invalid.starts_with("Invalid input:"));

    assert_eq!(responses[2]["result"]["isError"], false);
    let missing = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(missing.starts_with("No verified data found"));

    assert_eq!(responses[3]["id"], 4);
    assert!(responses[3]["error"].is_null());
}
