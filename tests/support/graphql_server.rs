use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::mpsc,
    thread,
};

/// Local HTTP endpoint that answers a fixed number of requests with canned replies.
pub struct CannedServer {
    pub url: String,
    requests: mpsc::Receiver<String>,
}

impl CannedServer {
    /// Serve each `(status line, body)` once, in order.
    pub fn start(replies: Vec<(&'static str, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("test server addr");
        let (tx, requests) = mpsc::channel();
        thread::spawn(move || {
            for (status, body) in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request_body(&mut stream);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = tx.send(request);
            }
        });
        Self {
            url: format!("http://{addr}/graphql"),
            requests,
        }
    }

    /// Reply with one successful prediction.
    pub fn predicting(rating: f64, confidence: f64) -> Self {
        Self::start(vec![(
            "200 OK",
            format!(r#"{{"data":{{"predict":{{"rating":{rating},"confidence":{confidence}}}}}}}"#),
        )])
    }

    /// JSON body of the next request the server handled.
    pub fn next_request(&self) -> serde_json::Value {
        let body = self
            .requests
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("request received");
        serde_json::from_str(&body).expect("request body is JSON")
    }
}

fn read_request_body(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let read = stream.read(&mut buf).unwrap_or(0);
        if read == 0 {
            return String::new();
        }
        data.extend_from_slice(&buf[..read]);
        let Some(split) = find_header_end(&data) else {
            continue;
        };
        let headers = String::from_utf8_lossy(&data[..split]).to_ascii_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let body_start = split + 4;
        if data.len() >= body_start + length {
            return String::from_utf8_lossy(&data[body_start..body_start + length]).into_owned();
        }
    }
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}
