// HTTP tests against the mounted Rocket routes using the local blocking client

use guardrail_snake::bot::Bot;
use guardrail_snake::config::Config;
use guardrail_snake::handler;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

fn client() -> Client {
    Client::tracked(handler::build(Bot::new(Config::default_hardcoded())))
        .expect("valid rocket instance")
}

fn move_request(you_body: Value) -> Value {
    json!({
        "game": {"id": "g1", "ruleset": {"name": "standard"}, "timeout": 500, "source": "custom"},
        "turn": 12,
        "board": {
            "width": 11,
            "height": 11,
            "food": [],
            "hazards": [],
            "snakes": [
                {"id": "me", "name": "me", "health": 90, "head": {"x": 5, "y": 5}, "body": you_body, "length": 2, "latency": "10", "shout": ""}
            ]
        },
        "you": {"id": "me", "name": "me", "health": 90, "head": {"x": 5, "y": 5}, "body": you_body, "length": 2, "latency": "10", "shout": ""}
    })
}

#[test]
fn test_index_returns_metadata() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some("battlesnake/guardrail-snake")
    );

    let body: Value = response.into_json().unwrap();
    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["author"], "Adrian");
    assert_eq!(body["color"], "#0044ff");
    assert_eq!(body["tail"], "default");
}

#[test]
fn test_start_and_end_are_acknowledged() {
    let client = client();
    let request = move_request(json!([{"x": 5, "y": 5}, {"x": 5, "y": 4}])).to_string();

    let start = client
        .post("/start")
        .header(ContentType::JSON)
        .body(request.clone())
        .dispatch();
    assert_eq!(start.status(), Status::Ok);

    let end = client
        .post("/end")
        .header(ContentType::JSON)
        .body(request)
        .dispatch();
    assert_eq!(end.status(), Status::Ok);
}

#[test]
fn test_move_returns_a_safe_direction() {
    let client = client();
    let request = move_request(json!([{"x": 5, "y": 5}, {"x": 5, "y": 4}]));

    for _ in 0..20 {
        let response = client
            .post("/move")
            .header(ContentType::JSON)
            .body(request.to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().unwrap();
        let mv = body["move"].as_str().unwrap();
        assert!(["up", "left", "right"].contains(&mv), "unexpected move {}", mv);
    }
}

#[test]
fn test_move_with_empty_body_is_bad_request() {
    let client = client();
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(move_request(json!([])).to_string())
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn test_move_missing_head_is_rejected() {
    let client = client();
    let request = json!({
        "turn": 1,
        "board": {"width": 11, "height": 11, "food": [], "snakes": []},
        "you": {"id": "me", "body": [{"x": 1, "y": 1}]}
    });

    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch();

    assert!(response.status().class().is_client_error());
}
