#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// Answers each connection with the next canned response and reports the
/// request line it received. Every response closes the connection.
pub fn serve(responses: Vec<(&'static str, String)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            let _ = tx.send(request_line.trim_end().to_string());
            let mut stream = reader.into_inner();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });
    (format!("http://{addr}/v1/Categories/6327/Details.json"), rx)
}

pub fn canonical_body() -> String {
    serde_json::json!({
        "Name": "Carbon credits",
        "CanRelist": true,
        "Promotions": [{"Name": "Gallery", "Description": "Get a 2x larger image"}]
    })
    .to_string()
}

pub fn relist_false_body() -> String {
    serde_json::json!({
        "Name": "Carbon credits",
        "CanRelist": false,
        "Promotions": [{"Name": "Gallery", "Description": "Get a 2x larger image"}]
    })
    .to_string()
}
