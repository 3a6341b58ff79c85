use std::collections::BTreeMap;
use std::time::Duration;

use requester_exec::{HttpClient, HttpRequest, HttpResponse, RequestBody, ReqwestHttpClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// Answers every connection with the same status line and body.
async fn canned_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&chunk[..n]),
                }
            }
            let reply = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

async fn get(client: &ReqwestHttpClient, url: &str) -> HttpResponse {
    let req = HttpRequest {
        method: "GET".to_string(),
        url: url::Url::parse(url).unwrap(),
        headers: BTreeMap::new(),
        query: Vec::new(),
        body: RequestBody::Empty,
    };
    client.send(req, Duration::from_secs(5)).await.unwrap()
}

#[tokio::test]
async fn scheme_proxy_wins_over_all() {
    let all = canned_server("200 OK", "ALL").await;
    let http = canned_server("200 OK", "HTTP").await;
    let proxies = BTreeMap::from([("all".to_string(), all), ("http".to_string(), http)]);
    let client = ReqwestHttpClient::new(proxies).unwrap();

    let resp = get(&client, "http://api.example.test/x").await;
    assert_eq!(resp.body, b"HTTP");
}

#[tokio::test]
async fn all_proxy_covers_schemes_without_their_own() {
    let all = canned_server("200 OK", "ALL").await;
    let https = canned_server("200 OK", "HTTPS").await;
    let proxies = BTreeMap::from([("all".to_string(), all), ("https".to_string(), https)]);
    let client = ReqwestHttpClient::new(proxies).unwrap();

    let resp = get(&client, "http://api.example.test/x").await;
    assert_eq!(resp.body, b"ALL");
}

#[tokio::test]
async fn reason_phrase_is_the_one_the_server_sent() {
    let client = ReqwestHttpClient::new(BTreeMap::new()).unwrap();

    let expired = canned_server("401 Token Expired", "").await;
    let resp = get(&client, &expired).await;
    assert_eq!(resp.status, 401);
    assert_eq!(resp.reason, "Token Expired");
    assert!(!resp.is_success());

    let custom = canned_server("499 Client Closed Request", "").await;
    assert_eq!(get(&client, &custom).await.reason, "Client Closed Request");

    let canonical = canned_server("404 Not Found", "").await;
    assert_eq!(get(&client, &canonical).await.reason, "Not Found");
}
