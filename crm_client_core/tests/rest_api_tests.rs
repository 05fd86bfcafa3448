//! REST client tests against a local HTTP listener

use crm_client_core::error::ApiError;
use crm_client_core::*;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request line and headers of one received request
#[derive(Debug, Clone)]
struct ReceivedRequest {
    target: String,
    authorization: Option<String>,
}

type Responder = fn(&str) -> (u16, String);

/// Serve `respond` on an ephemeral port until the test ends
async fn serve(respond: Responder) -> (String, Arc<Mutex<Vec<ReceivedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&received);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                }
            }

            let request = String::from_utf8_lossy(&buffer).to_string();
            let target = request
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or_default()
                .to_string();
            let authorization = request.lines().find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("authorization")
                    .then(|| value.trim().to_string())
            });
            log.lock().unwrap().push(ReceivedRequest {
                target: target.clone(),
                authorization,
            });

            let (status, body) = respond(&target);
            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{address}"), received)
}

fn query_param(target: &str, name: &str) -> Option<usize> {
    let (_, query) = target.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.parse().ok()).flatten()
    })
}

/// 20 accepted submissions, paginated
fn accepted_pages(target: &str) -> (u16, String) {
    if !target.starts_with("/assignments/7/accepted_assignments") {
        return (404, r#"{"message": "Not Found"}"#.to_string());
    }
    let page = query_param(target, "page").unwrap_or(1);
    let per_page = query_param(target, "per_page").unwrap_or(30);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(20);
    let items: Vec<String> = (start..end)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "submitted": false, "students": [{{"id": {i}, "login": "user{i}"}}],
                   "repository": {{"id": {i}, "name": "lab-1-user{i}", "full_name": "org/lab-1-user{i}"}}}}"#
            )
        })
        .collect();
    (200, format!("[{}]", items.join(",")))
}

fn config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_accepted_assignments_are_fetched_page_by_page() {
    let (base_url, received) = serve(accepted_pages).await;
    let api = RestClassroomApi::new(&config(&base_url), "secret-token").unwrap();

    let submissions = api.list_accepted_assignments(7, 15).await.unwrap();

    assert_eq!(submissions.len(), 20);
    assert_eq!(submissions[0].repository.full_name, "org/lab-1-user0");
    assert_eq!(submissions[19].sole_author(), Some("user19"));

    let requests = received.lock().unwrap().clone();
    let targets: Vec<&str> = requests.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(
        targets,
        vec![
            "/assignments/7/accepted_assignments?page=1&per_page=15",
            "/assignments/7/accepted_assignments?page=2&per_page=15",
        ]
    );
    assert!(
        requests
            .iter()
            .all(|r| r.authorization.as_deref() == Some("Bearer secret-token"))
    );
}

#[tokio::test]
async fn test_exact_page_multiple_fetches_one_empty_page() {
    let (base_url, received) = serve(accepted_pages).await;
    let api = RestClassroomApi::new(&config(&base_url), "token").unwrap();

    let submissions = api.list_accepted_assignments(7, 10).await.unwrap();

    assert_eq!(submissions.len(), 20);
    assert_eq!(received.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_assignment_is_a_not_found_status() {
    let (base_url, _) = serve(accepted_pages).await;
    let api = RestClassroomApi::new(&config(&base_url), "token").unwrap();

    let error = api.get_assignment(99).await.unwrap_err();

    assert!(error.is_not_found());
    match error {
        ApiError::Status { message, .. } => assert_eq!(message, "Not Found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_get_assignment_decodes_starter() {
    fn respond(target: &str) -> (u16, String) {
        if target == "/assignments/7" {
            (
                200,
                r#"{"id": 7, "title": "Lab 1", "slug": "lab-1", "type": "group", "accepted": 3,
                    "starter_code_repository": {"id": 55, "full_name": "org/lab-1-starter"}}"#
                    .to_string(),
            )
        } else {
            (404, r#"{"message": "Not Found"}"#.to_string())
        }
    }
    let (base_url, _) = serve(respond).await;
    let api = RestClassroomApi::new(&config(&base_url), "token").unwrap();

    let assignment = api.get_assignment(7).await.unwrap();

    assert_eq!(assignment.slug, "lab-1");
    assert_eq!(
        assignment.starter().map(|s| s.full_name.as_str()),
        Some("org/lab-1-starter")
    );
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let api = RestClassroomApi::new(&config(&format!("http://{address}")), "token").unwrap();

    let error = api.list_classrooms().await.unwrap_err();

    assert!(error.is_network());
}
