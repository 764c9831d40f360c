#![forbid(unsafe_code)]

mod support;

use serde_json::json;
use std::collections::BTreeSet;
use support::*;

#[test]
fn tools_list_exposes_exactly_the_monitor_tools() {
    let mut server = Server::start_initialized("tools_list");
    let resp = server.request(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {} }));
    let tools = resp
        .get("result")
        .and_then(|v| v.get("tools"))
        .and_then(|v| v.as_array())
        .expect("result.tools");
    assert_eq!(tools.len(), 2);

    for tool in tools {
        let name = tool["name"].as_str().expect("tool name");
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
        assert_eq!(tool["inputSchema"]["type"], json!("object"));
        match name {
            "run_training_monitor" => {
                let required = tool["inputSchema"].get("required");
                assert!(
                    required.is_none_or(|r| r.as_array().is_some_and(|r| r.is_empty())),
                    "status tool must not require arguments"
                );
                let platforms = tool["inputSchema"]["properties"]["platform"]["enum"]
                    .as_array()
                    .expect("platform enum")
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<BTreeSet<_>>();
                assert_eq!(
                    platforms,
                    BTreeSet::from(["local", "sagemaker", "vertex-ai"])
                );
            }
            "create_example_training_job" => {
                assert_eq!(tool["inputSchema"]["required"], json!(["job_id"]));
            }
            other => panic!("unexpected tool {other}"),
        }
    }
}

#[test]
fn unknown_tools_are_method_not_found() {
    let mut server = Server::start_initialized("unknown_tool");
    let resp = server.call_tool(2, "delete_everything", json!({}));
    assert_json_rpc_error(&resp, -32601);
    assert_eq!(resp["id"], json!(2));
    assert_eq!(resp["error"]["message"], json!("Unknown tool: delete_everything"));
}

#[test]
fn create_then_status_round_trip() {
    let mut server = Server::start_initialized("create_status");
    let resp = server.call_tool(
        3,
        "create_example_training_job",
        json!({ "job_id": "j1", "status": "completed" }),
    );
    let text = extract_tool_text_str(&resp);
    assert!(text.starts_with("Created example training job: "), "text: {text}");
    assert!(server.log_dir().join("job_j1.json").is_file());

    let resp = server.call_tool(4, "run_training_monitor", json!({ "job_id": "j1" }));
    let payload = extract_tool_text(&resp);
    assert_eq!(payload["job_id"], json!("j1"));
    assert_eq!(payload["status"], json!("completed"));
    assert_eq!(payload["platform"], json!("local"));
    assert_eq!(payload["model"], json!("example-model"));
    assert_eq!(payload["progress"], json!("75%"));
    assert_eq!(payload["metrics"]["epoch"], json!(10));
}

#[test]
fn create_defaults_to_running() {
    let mut server = Server::start_initialized("create_default_status");
    server.call_tool(5, "create_example_training_job", json!({ "job_id": "j2" }));
    let resp = server.call_tool(6, "run_training_monitor", json!({ "job_id": "j2" }));
    assert_eq!(extract_tool_text(&resp)["status"], json!("running"));
}

#[test]
fn missing_job_is_an_application_result() {
    let mut server = Server::start_initialized("missing_job");
    let resp = server.call_tool(7, "run_training_monitor", json!({ "job_id": "nope" }));
    assert!(resp.get("error").is_none(), "must not be a protocol error: {resp}");
    let payload = extract_tool_text(&resp);
    assert_eq!(payload["error"], json!("Job nope not found on any platform"));
    assert_eq!(payload["job_id"], json!("nope"));
}

#[test]
fn resource_path_job_ids_are_looked_up_not_rejected() {
    let mut server = Server::start_initialized("resource_path_id");
    let job_id = "projects/p/locations/us-central1/trainingPipelines/123";
    let resp = server.call_tool(12, "run_training_monitor", json!({ "job_id": job_id }));
    assert!(resp.get("error").is_none(), "must not be a protocol error: {resp}");
    let payload = extract_tool_text(&resp);
    assert_eq!(
        payload["error"],
        json!(format!("Job {job_id} not found on any platform"))
    );
    assert_eq!(payload["job_id"], json!(job_id));
}

#[test]
fn path_like_ids_cannot_be_created() {
    let mut server = Server::start_initialized("create_path_id");
    let resp = server.call_tool(13, "create_example_training_job", json!({ "job_id": "a/b" }));
    assert_json_rpc_error(&resp, -32603);
}

#[test]
fn missing_job_id_on_create_is_internal_error() {
    let mut server = Server::start_initialized("create_missing_id");
    let resp = server.call_tool(8, "create_example_training_job", json!({}));
    assert_json_rpc_error(&resp, -32603);
    assert_eq!(resp["id"], json!(8));
}

#[test]
fn last_write_wins() {
    let mut server = Server::start_initialized("last_write");
    server.call_tool(9, "create_example_training_job", json!({ "job_id": "j3", "status": "running" }));
    server.call_tool(10, "create_example_training_job", json!({ "job_id": "j3", "status": "failed" }));
    let resp = server.call_tool(11, "run_training_monitor", json!({ "job_id": "j3" }));
    assert_eq!(extract_tool_text(&resp)["status"], json!("failed"));
}

#[test]
fn summary_counts_match_and_name_every_platform() {
    let mut server = Server::start_with_args("summary", &["--no-demo-job"]);
    for (id, job) in ["a", "b", "c"].into_iter().enumerate() {
        server.call_tool(id as i64, "create_example_training_job", json!({ "job_id": job }));
    }
    let resp = server.call_tool(20, "run_training_monitor", json!({}));
    let payload = extract_tool_text(&resp);
    let jobs = payload["jobs"].as_array().expect("jobs");
    assert_eq!(payload["total_jobs"], json!(jobs.len()));
    assert_eq!(jobs.len(), 3);
    assert!(jobs.iter().all(|job| job["platform"] == json!("local")));

    let platforms = payload["platforms"].as_object().expect("platforms");
    let keys = platforms.keys().map(String::as_str).collect::<BTreeSet<_>>();
    assert_eq!(keys, BTreeSet::from(["local", "sagemaker", "vertex-ai"]));
    assert_eq!(platforms["local"], json!(true));
    assert_eq!(platforms["sagemaker"], json!(false));
    assert_eq!(platforms["vertex-ai"], json!(false));
}

#[test]
fn platform_filter_narrows_the_summary() {
    let mut server = Server::start_initialized("filter_local");
    let resp = server.call_tool(21, "run_training_monitor", json!({ "platform": "local" }));
    let payload = extract_tool_text(&resp);
    assert_eq!(payload["total_jobs"], json!(1));

    let resp = server.call_tool(22, "run_training_monitor", json!({ "platform": "sagemaker" }));
    let payload = extract_tool_text(&resp);
    assert_eq!(payload["platform"], json!("sagemaker"));
    assert!(
        payload["error"].as_str().is_some_and(|e| e.contains("not configured")),
        "payload: {payload}"
    );
}
