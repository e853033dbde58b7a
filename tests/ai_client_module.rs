use bizsite::ai::{AiError, ChatMessage, HttpTextGenerator, TextGenerator};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    auth_header: String,
    body: String,
}

struct MockModelServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockModelServer {
    fn start(status_line: &'static str, response_body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_for_thread = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .expect("read request line");
            let path = request_line
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .to_string();

            let mut auth_header = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if lower.starts_with("authorization:") {
                    auth_header = line
                        .split_once(':')
                        .map(|(_, v)| v.trim().to_string())
                        .unwrap_or_default();
                }
                if lower.starts_with("content-length:") {
                    content_length = line
                        .split_once(':')
                        .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                        .unwrap_or(0);
                }
            }

            let mut body = vec![0_u8; content_length];
            if content_length > 0 {
                reader.read_exact(&mut body).expect("read body");
            }

            requests_for_thread
                .lock()
                .expect("lock requests")
                .push(RecordedRequest {
                    path,
                    auth_header,
                    body: String::from_utf8_lossy(&body).to_string(),
                });

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );
            stream
                .write_all(response.as_bytes())
                .expect("write response");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle: Some(handle),
        }
    }

    fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        self.requests.lock().expect("lock requests").clone()
    }
}

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("Respond with JSON."),
        ChatMessage::user("Write a tagline."),
    ]
}

#[test]
fn ai_client_module_posts_messages_with_bearer_token() {
    let server = MockModelServer::start(
        "200 OK",
        r#"{"result":{"response":"{\"tagline\":\"Hi\"}"},"success":true}"#,
    );
    let client = HttpTextGenerator::new(server.base_url.clone(), "@cf/meta/llama-3-8b-instruct")
        .with_token(Some("secret-token".to_string()));

    let text = client.generate_text(&messages(), 500).expect("generate");
    assert_eq!(text, r#"{"tagline":"Hi"}"#);

    let requests = server.finish();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/run/@cf/meta/llama-3-8b-instruct");
    assert_eq!(requests[0].auth_header, "Bearer secret-token");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Write a tagline.");
}

#[test]
fn ai_client_module_reads_flat_response_field() {
    let server = MockModelServer::start("200 OK", r#"{"response":"plain text"}"#);
    let client = HttpTextGenerator::new(server.base_url.clone(), "model");
    let text = client.generate_text(&messages(), 100).expect("generate");
    assert_eq!(text, "plain text");
    let requests = server.finish();
    assert_eq!(requests[0].auth_header, "");
}

#[test]
fn ai_client_module_surfaces_http_status() {
    let server = MockModelServer::start("503 Service Unavailable", r#"{"error":"overloaded"}"#);
    let client = HttpTextGenerator::new(server.base_url.clone(), "model");
    let err = client.generate_text(&messages(), 100).expect_err("status");
    match err {
        AiError::Status { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("overloaded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.finish();
}

#[test]
fn ai_client_module_reply_without_text_is_response_error() {
    let server = MockModelServer::start("200 OK", r#"{"success":true}"#);
    let client = HttpTextGenerator::new(server.base_url.clone(), "model");
    let err = client.generate_text(&messages(), 100).expect_err("no text");
    assert!(matches!(err, AiError::Response(_)));
    server.finish();
}
