//! `lull watch` specs
//!
//! Run the daemon against a local webhook and verify what it delivers.

use crate::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::{Child, Stdio};
use std::sync::mpsc;
use std::time::Duration;

/// Kills the daemon when the test ends, pass or fail
struct Daemon(Child);

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Accept requests on a local port and forward each raw request
fn webhook() -> (String, mpsc::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 8192];
            loop {
                let n = match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            if tx.send(buf).is_err() {
                return;
            }
        }
    });

    (url, rx)
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());
    match length {
        Some(len) => buf.len() >= head_end + 4 + len,
        None => buf.ends_with(b"0\r\n\r\n"),
    }
}

fn start_watch(temp: &Project, url: &str) -> Daemon {
    let child = std::process::Command::new(lull_bin())
        .args([
            "watch",
            "--watch-folder",
            temp.watched().to_str().unwrap(),
            "--webhook-url",
            url,
            "--upload-timeout",
            "300ms",
        ])
        .env("RUST_LOG", "debug")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Give the watcher time to register
    std::thread::sleep(Duration::from_millis(500));
    Daemon(child)
}

#[test]
fn quiet_matching_file_is_uploaded_once_as_archive() {
    let temp = Project::empty();
    let (url, requests) = webhook();
    let _daemon = start_watch(&temp, &url);

    let demo = temp.watched().join("match.demo");
    for frame in 0..3 {
        std::fs::write(&demo, format!("frame {}", frame)).unwrap();
        std::thread::sleep(Duration::from_millis(50));
    }

    let request = requests.recv_timeout(Duration::from_secs(20)).unwrap();
    let request = String::from_utf8_lossy(&request).to_string();
    assert!(request.starts_with("POST /hook"), "{}", request);
    assert!(
        request.contains("filename=\"match.demo.tar.gz\""),
        "{}",
        request
    );

    // Coalesced into one upload, and the archive is cleaned up
    assert!(requests.recv_timeout(Duration::from_secs(2)).is_err());
    assert!(!temp.watched().join("match.demo.tar.gz").exists());
    assert!(demo.exists());
}

#[test]
fn non_matching_file_is_not_uploaded() {
    let temp = Project::empty();
    let (url, requests) = webhook();
    let _daemon = start_watch(&temp, &url);

    std::fs::write(temp.watched().join("notes.txt"), "hello").unwrap();

    assert!(requests.recv_timeout(Duration::from_secs(2)).is_err());
}
