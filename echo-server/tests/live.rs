//! Round trips against the live echo server.
//!
//! # Design
//! Starts the server on a random port, sends real requests with ureq, and
//! checks the curl command the server saw. ureq adds its own headers (user
//! agent, accept-encoding), so assertions look for the pieces the test
//! controls rather than comparing whole strings.

use std::net::SocketAddr;

use curl_echo::EchoConfig;

fn start_server(config: EchoConfig) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            curl_echo::run(listener, config).await
        })
        .unwrap();
    });

    addr
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

#[test]
fn live_round_trips() {
    let addr = start_server(EchoConfig::default());
    let base = format!("http://{addr}");
    let agent = agent();

    // Plain GET with a custom header.
    let mut response = agent
        .get(&format!("{base}/status"))
        .header("X-Trace", "abc 123")
        .call()
        .expect("HTTP transport error");
    assert_eq!(response.status().as_u16(), 200);
    let cmd = response.body_mut().read_to_string().unwrap();
    assert!(cmd.starts_with("curl -X GET "), "{cmd}");
    assert!(cmd.contains("-H 'x-trace: abc 123'"), "{cmd}");
    assert!(cmd.ends_with(&format!(" {base}/status")), "{cmd}");

    // POST with a JSON body: content-length is dropped, the body is kept.
    let mut response = agent
        .post(&format!("{base}/todos"))
        .content_type("application/json")
        .send(r#"{"title":"Integration test"}"#.as_bytes())
        .expect("HTTP transport error");
    assert_eq!(response.status().as_u16(), 200);
    let cmd = response.body_mut().read_to_string().unwrap();
    assert!(cmd.starts_with("curl -X POST "), "{cmd}");
    assert!(!cmd.contains("content-length"), "{cmd}");
    assert!(cmd.contains(r#"-d '{"title":"Integration test"}'"#), "{cmd}");

    // Secrets are redacted.
    let mut response = agent
        .get(&format!("{base}/me"))
        .header("Authorization", "Bearer live-secret")
        .call()
        .expect("HTTP transport error");
    let cmd = response.body_mut().read_to_string().unwrap();
    assert!(!cmd.contains("live-secret"), "{cmd}");
    assert!(cmd.contains("'authorization: <redacted>'"), "{cmd}");
}

#[test]
fn live_insecure_config() {
    let mut config = EchoConfig::default();
    config.options = config.options.verify(false);
    let addr = start_server(config);

    let mut response = agent()
        .delete(&format!("http://{addr}/todos/1"))
        .call()
        .expect("HTTP transport error");
    let cmd = response.body_mut().read_to_string().unwrap();
    assert!(cmd.starts_with("curl -X DELETE "), "{cmd}");
    assert!(cmd.contains(" --insecure "), "{cmd}");
}
