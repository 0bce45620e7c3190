//! Client tests against one-shot loopback HTTP listeners.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use tramas_core::Section;
use tramas_data::{ArchiveClient, DataError};

/// Serve a single canned HTTP response on a loopback port and return the
/// base URL. The listener thread handles exactly one connection.
fn serve_once(status_line: &str, content_type: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            // Drain the request head before answering.
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

fn json_server(body: &str) -> String {
    serve_once("200 OK", "application/json", body)
}

#[test]
fn gallery_fetch_decodes_and_sorts() {
    let base = json_server(
        r#"[
            {"id": 2, "fileName": "b.jpg", "chronological_order": 9},
            {"id": 1, "fileName": "Historia_Panceri.jpg", "chronological_order": 3}
        ]"#,
    );
    let records = ArchiveClient::new(&base).fetch_gallery().unwrap();
    assert_eq!(records.len(), 2);
    // Sorted chronologically, not in payload order.
    assert_eq!(records[0].id, 1);
    // Missing detected_topics are filled by topic detection.
    assert_eq!(records[0].detected_topics, vec!["Panceri"]);
}

#[test]
fn timeline_fetch_decodes_events() {
    let base = json_server(
        r#"[{"year": 1917, "title": "Início de Manoel Scavino", "text": "caronas e ombreiras", "images": ["Historia tecelagem em Museu.jpg"]}]"#,
    );
    let events = ArchiveClient::new(&base)
        .fetch_timeline(Section::Scavino)
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].year, Some(1917));
    assert_eq!(events[0].images.len(), 1);
}

#[test]
fn non_2xx_status_is_an_error() {
    let base = serve_once(
        "500 Internal Server Error",
        "application/json",
        r#"{"erro": "Erro interno na API da timeline."}"#,
    );
    let err = ArchiveClient::new(&base)
        .fetch_timeline(Section::Panceri)
        .unwrap_err();
    match err {
        DataError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("expected status error, got {other}"),
    }
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind and immediately drop to get a port nothing listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = ArchiveClient::new(&format!("http://{addr}"))
        .fetch_gallery()
        .unwrap_err();
    assert!(matches!(err, DataError::Transport(_)));
}

#[test]
fn malformed_body_is_no_data_not_an_error() {
    let base = json_server(r#"{"erro": "shape errada"}"#);
    let records = ArchiveClient::new(&base).fetch_gallery().unwrap();
    assert!(records.is_empty());
}

/// One failing section leaves the others' data intact: each fetch is an
/// independent request with independent error containment.
#[test]
fn one_failed_section_does_not_affect_the_others() {
    let ok_panceri = json_server(r#"[{"title": "a", "text": "b"}]"#);
    let ok_scavino = json_server(r#"[{"title": "c", "text": "d"}]"#);
    let broken = serve_once("500 Internal Server Error", "text/plain", "boom");

    let panceri = ArchiveClient::new(&ok_panceri).fetch_timeline(Section::Panceri);
    let pompeia = ArchiveClient::new(&broken).fetch_timeline(Section::Pompeia);
    let scavino = ArchiveClient::new(&ok_scavino).fetch_timeline(Section::Scavino);

    assert_eq!(panceri.unwrap().len(), 1);
    assert!(pompeia.is_err());
    assert_eq!(scavino.unwrap().len(), 1);
}

#[test]
fn asset_fetch_returns_bytes_and_404_is_an_error() {
    let base = serve_once("200 OK", "image/jpeg", "not-really-a-jpeg");
    let bytes = ArchiveClient::new(&base).fetch_asset("a.jpg").unwrap();
    assert_eq!(bytes, b"not-really-a-jpeg");

    let base = serve_once("404 Not Found", "text/plain", "nope");
    let err = ArchiveClient::new(&base).fetch_asset("missing.jpg").unwrap_err();
    assert!(matches!(err, DataError::Status { status: 404, .. }));
}
