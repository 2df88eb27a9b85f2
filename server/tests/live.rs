//! Full CRUD lifecycle against a live server.
//!
//! # Design
//! Starts the server on a random port, then drives every endpoint over real
//! HTTP using ureq, so routing, JSON bodies and status codes are checked
//! end-to-end rather than through `oneshot`.

use todo_server::{Problem, TodoResponse};

struct Reply {
    status: u16,
    location: Option<String>,
    body: String,
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn send(method: &str, url: &str, body: Option<&str>) -> Reply {
    let agent = agent();
    let mut response = match (method, body) {
        ("GET", _) => agent.get(url).call(),
        ("DELETE", _) => agent.delete(url).call(),
        ("POST", Some(body)) => agent
            .post(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        ("PUT", Some(body)) => agent
            .put(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        _ => panic!("unsupported request {method} {url}"),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let location = response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Reply {
        status,
        location,
        body,
    }
}

fn start_server() -> String {
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
            todo_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    let base = start_server();

    // Step 1: list — should be empty.
    let reply = send("GET", &format!("{base}/todo"), None);
    assert_eq!(reply.status, 200);
    let todos: Vec<TodoResponse> = serde_json::from_str(&reply.body).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo.
    let reply = send(
        "POST",
        &format!("{base}/todo"),
        Some(r#"{"title":"Integration test","isCompleted":false,"dueDate":"2100-01-01T00:00:00Z"}"#),
    );
    assert_eq!(reply.status, 201);
    let created: TodoResponse = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(created.title, "Integration test");
    assert_eq!(reply.location, Some(format!("/todo/{}", created.id)));
    let id = created.id;

    // Step 3: get the created todo.
    let reply = send("GET", &format!("{base}/todo/{id}"), None);
    assert_eq!(reply.status, 200);
    let fetched: TodoResponse = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update title.
    let reply = send(
        "PUT",
        &format!("{base}/todo/{id}"),
        Some(r#"{"title":"Updated title"}"#),
    );
    assert_eq!(reply.status, 200);
    let updated: TodoResponse = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(!updated.is_completed);

    // Step 5: update completed.
    let reply = send(
        "PUT",
        &format!("{base}/todo/{id}"),
        Some(r#"{"isCompleted":true}"#),
    );
    let updated: TodoResponse = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.is_completed);

    // Step 6: invalid update is rejected and changes nothing.
    let reply = send(
        "PUT",
        &format!("{base}/todo/{id}"),
        Some(r#"{"title":"   "}"#),
    );
    assert_eq!(reply.status, 400);
    let problem: Problem = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(problem.title, "Validation Error");

    // Step 7: delete.
    let reply = send("DELETE", &format!("{base}/todo/{id}"), None);
    assert_eq!(reply.status, 204);
    assert!(reply.body.is_empty());

    // Step 8: get after delete — 404.
    let reply = send("GET", &format!("{base}/todo/{id}"), None);
    assert_eq!(reply.status, 404);

    // Step 9: delete again — 404.
    let reply = send("DELETE", &format!("{base}/todo/{id}"), None);
    assert_eq!(reply.status, 404);

    // Step 10: list — should be empty again.
    let reply = send("GET", &format!("{base}/todo"), None);
    let todos: Vec<TodoResponse> = serde_json::from_str(&reply.body).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}
