use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use pipeline_server::{PipelineResponse, PipelineServer, ServerConfig, ServerResult};

struct TestContext {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<ServerResult<()>>,
}

// Start a server on an ephemeral port
async fn setup_test() -> TestContext {
    let config = ServerConfig {
        port: 0,
        bind_address: "127.0.0.1".to_string(),
        ..ServerConfig::default()
    };
    let server = PipelineServer::new(config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve_with_shutdown(listener, async move {
        let _ = rx.await;
    }));

    TestContext { addr, shutdown, handle }
}

#[tokio::test]
async fn test_live_server_round_trip() {
    let ctx = setup_test().await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", ctx.addr);

    let ping: Value = client
        .get(&base)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ping, json!({"Ping": "Pong"}));

    let response = client
        .post(format!("{}/pipelines/parse", base))
        .json(&json!({
            "nodes": [{"id": "input"}, {"id": "filter"}, {"id": "merge"}, {"id": "output"}],
            "edges": [
                {"source": "input", "target": "filter"},
                {"source": "input", "target": "merge"},
                {"source": "filter", "target": "merge"},
                {"source": "merge", "target": "output"},
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let result: PipelineResponse = response.json().await.unwrap();
    assert_eq!(
        result,
        PipelineResponse {
            num_nodes: 4,
            num_edge: 4,
            is_dag: true,
        }
    );

    drop(client);
    ctx.shutdown.send(()).unwrap();
    ctx.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let ctx = setup_test().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/pipelines/parse", ctx.addr);

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = url.clone();
        async move {
            // Odd requests close the chain into a loop
            let mut edges = vec![
                json!({"source": "a", "target": "b"}),
                json!({"source": "b", "target": "c"}),
            ];
            if i % 2 == 1 {
                edges.push(json!({"source": "c", "target": "a"}));
            }
            let body = json!({"nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}], "edges": edges});

            let result: PipelineResponse = client
                .post(&url)
                .json(&body)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            (i, result)
        }
    });

    let mut handles = Vec::new();
    for request in requests {
        handles.push(tokio::spawn(request));
    }

    for handle in handles {
        let (i, result) = handle.await.unwrap();
        assert_eq!(result.num_nodes, 3);
        assert_eq!(result.is_dag, i % 2 == 0);
        assert_eq!(result.num_edge, if i % 2 == 0 { 2 } else { 3 });
    }

    drop(client);
    ctx.shutdown.send(()).unwrap();
    ctx.handle.await.unwrap().unwrap();
}
