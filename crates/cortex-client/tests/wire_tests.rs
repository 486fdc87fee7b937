//! Wire-level tests for the engine client
//!
//! Each test runs a single-shot HTTP server on a loopback port, points the
//! client at it, and asserts both what went over the wire (method, path,
//! headers, body) and how the response was interpreted.

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use pretty_assertions::assert_eq;
use tiny_http::{Response, Server};

use cortex_client::{AlertmanagerApi, Config, CortexClient, Error, RuleGroupApi};
use cortex_rules::native::{AlertmanagerConfig, Rule, RuleGroup};

/// What the test server saw for one request
struct Seen {
    method: String,
    path: String,
    tenant: Option<String>,
    body: String,
}

/// Serve exactly one request with the given status and body, reporting
/// what was received back to the test
fn single_shot_server(status: u16, body: &'static str) -> (String, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let address = format!("http://{}", server.server_addr());
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let tenant = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("X-Scope-OrgID"))
                .map(|h| h.value.as_str().to_string());
            let mut request_body = String::new();
            let _ = request.as_reader().read_to_string(&mut request_body);
            let seen = Seen {
                method: request.method().as_str().to_string(),
                path: request.url().to_string(),
                tenant,
                body: request_body,
            };
            let _ = request.respond(Response::from_string(body).with_status_code(status));
            let _ = sender.send(seen);
        }
    });

    (address, receiver)
}

fn tenant_client(address: &str) -> CortexClient {
    let mut config = Config::for_address(address);
    config.tenant_id = Some("team-a".to_string());
    CortexClient::new(&config).unwrap()
}

fn sample_group() -> RuleGroup {
    RuleGroup {
        name: "node-alerts".to_string(),
        interval: Some("5m".parse().unwrap()),
        rules: vec![Rule {
            alert: Some("HighCPU".to_string()),
            expr: "cpu_usage > 0.8".to_string(),
            ..Rule::default()
        }],
    }
}

#[tokio::test]
async fn get_rule_group_parses_engine_response() {
    let (address, seen) = single_shot_server(
        200,
        "name: node-alerts\ninterval: 5m\nrules:\n- alert: HighCPU\n  expr: cpu_usage > 0.8\n",
    );
    let client = tenant_client(&address);

    let observed = client.get_rule_group("ops", "node-alerts").await.unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/v1/rules/ops/node-alerts");
    assert_eq!(request.tenant.as_deref(), Some("team-a"));

    let group = observed.unwrap();
    assert_eq!(group.name, "node-alerts");
    assert_eq!(group.interval, Some("5m".parse().unwrap()));
    assert_eq!(group.rules[0].alert.as_deref(), Some("HighCPU"));
}

#[tokio::test]
async fn get_rule_group_maps_404_to_absent() {
    let (address, _seen) = single_shot_server(404, "group does not exist\n");
    let client = tenant_client(&address);

    let observed = client.get_rule_group("ops", "missing").await.unwrap();
    assert_eq!(observed, None);
}

#[tokio::test]
async fn set_rule_group_posts_yaml_to_namespace() {
    let (address, seen) = single_shot_server(202, "");
    let client = tenant_client(&address);

    client.set_rule_group("ops", &sample_group()).await.unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v1/rules/ops");

    let posted: RuleGroup = serde_yaml::from_str(&request.body).unwrap();
    assert_eq!(posted, sample_group());
}

#[tokio::test]
async fn delete_rule_group_treats_404_as_success() {
    let (address, seen) = single_shot_server(404, "group does not exist\n");
    let client = tenant_client(&address);

    client.delete_rule_group("ops", "gone").await.unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/v1/rules/ops/gone");
}

#[tokio::test]
async fn server_error_surfaces_status_and_message() {
    let (address, _seen) = single_shot_server(500, "ruler unavailable\n");
    let client = tenant_client(&address);

    let result = client.get_rule_group("ops", "node-alerts").await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "ruler unavailable");
        }
        other => panic!("expected Api error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn get_alertmanager_config_parses_document_and_templates() {
    let (address, seen) = single_shot_server(
        200,
        "template_files:\n  pager.tmpl: \"{{ define }}\"\nalertmanager_config: |\n  route:\n    receiver: on-call\n",
    );
    let client = tenant_client(&address);

    let observed = client.get_alertmanager_config().await.unwrap().unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.path, "/api/v1/alerts");
    assert_eq!(observed.alertmanager_config, "route:\n  receiver: on-call\n");
    assert_eq!(
        observed.template_files.get("pager.tmpl").map(String::as_str),
        Some("{{ define }}")
    );
}

#[tokio::test]
async fn empty_alertmanager_document_reads_as_absent() {
    let (address, _seen) = single_shot_server(200, "alertmanager_config: \"\"\n");
    let client = tenant_client(&address);

    let observed = client.get_alertmanager_config().await.unwrap();
    assert_eq!(observed, None);
}

#[tokio::test]
async fn set_alertmanager_config_posts_full_payload() {
    let (address, seen) = single_shot_server(201, "");
    let client = tenant_client(&address);

    let desired = AlertmanagerConfig {
        template_files: [("pager.tmpl".to_string(), "{{ define }}".to_string())].into(),
        alertmanager_config: "route:\n  receiver: on-call\n".to_string(),
    };
    client.set_alertmanager_config(&desired).await.unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v1/alerts");

    let posted: AlertmanagerConfig = serde_yaml::from_str(&request.body).unwrap();
    assert_eq!(posted, desired);
}

#[tokio::test]
async fn delete_alertmanager_config_treats_404_as_success() {
    let (address, seen) = single_shot_server(404, "the Alertmanager config does not exist\n");
    let client = tenant_client(&address);

    client.delete_alertmanager_config().await.unwrap();

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/v1/alerts");
}
