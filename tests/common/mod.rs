//! Shared fixtures for the integration tests.
//!
//! `spawn_search_api()` starts a throwaway HTTP responder on localhost that
//! answers every request with a canned status and body, recording the request
//! lines it saw.

use dash_ml::config::AppConfig;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct FakeApi {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn config(&self) -> AppConfig {
        AppConfig {
            api_base: self.base_url.clone(),
            timeout_seconds: Some(5),
            ..AppConfig::default()
        }
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub async fn spawn_search_api(status: u16, body: &'static str) -> FakeApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf);
                if let Some(line) = head.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    FakeApi {
        base_url: format!("http://{}", addr),
        requests,
    }
}

pub const SEARCH_BODY: &str = r#"{
    "site_id": "MLB",
    "query": "fone bluetooth",
    "results": [
        {
            "id": "MLB1",
            "title": "Fone Bluetooth Pro",
            "price": 100,
            "original_price": 200,
            "thumbnail": "http://img/1.jpg",
            "available_quantity": 12,
            "permalink": "http://item/1",
            "seller": {"id": 1, "nickname": "AUDIO_SHOP"}
        },
        {
            "id": "MLB2",
            "title": "Fone Basic",
            "price": 50,
            "original_price": null,
            "thumbnail": "http://img/2.jpg",
            "permalink": "http://item/2",
            "seller": {"id": 2, "nickname": "BARATO"}
        },
        {
            "id": "MLB3",
            "title": "Fone Bluetooth Lite",
            "price": 100,
            "original_price": 100,
            "thumbnail": "http://img/3.jpg",
            "available_quantity": 3,
            "permalink": "http://item/3",
            "seller": {"id": 1, "nickname": "AUDIO_SHOP"}
        },
        {
            "id": "MLB4",
            "title": "Fone sem vendedor",
            "price": 10,
            "thumbnail": "http://img/4.jpg",
            "permalink": "http://item/4",
            "seller": {"id": 4}
        }
    ]
}"#;
