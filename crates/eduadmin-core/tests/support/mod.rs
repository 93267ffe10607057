//! Shared fixtures: an in-process fake of the console's REST API.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eduadmin_core::{ApiClient, MemoryTokenStore, SessionStore, TokenStore};
use serde_json::{json, Value};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Stateful backend holding `tests` and `notes` collections.
///
/// Every route requires `Authorization: Bearer test-token`.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

#[derive(Default)]
struct BackendState {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

impl FakeBackend {
    pub async fn mount(&self, server: &MockServer) {
        Mock::given(path_regex(r"^/api/(tests|notes)(/.*)?$"))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(records);
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

impl Respond for FakeBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let expected = format!("Bearer {TOKEN}");
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return ResponseTemplate::new(401).set_body_json(json!({"message": "No token"}));
        }

        let segments = request
            .url
            .path()
            .trim_start_matches("/api/")
            .split('/')
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let body = serde_json::from_slice::<Value>(&request.body).unwrap_or(Value::Null);
        let mut state = self.state.lock().unwrap();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", [collection]) => {
                let records = state
                    .collections
                    .get(collection)
                    .cloned()
                    .unwrap_or_default();
                ResponseTemplate::new(200).set_body_json(records)
            }
            ("POST", [collection]) => {
                let id = state.next_id("id");
                let mut record = body;
                record["_id"] = json!(id);
                if collection == "tests" && record.get("questions").is_none() {
                    record["questions"] = json!([]);
                }
                state
                    .collections
                    .entry(collection.clone())
                    .or_default()
                    .push(record.clone());
                ResponseTemplate::new(201).set_body_json(record)
            }
            ("PUT", [collection, id]) => {
                let records = state.collections.entry(collection.clone()).or_default();
                match records.iter_mut().find(|record| record["_id"] == json!(id)) {
                    Some(record) => {
                        if let Value::Object(fields) = body {
                            for (key, value) in fields {
                                record[key.as_str()] = value;
                            }
                        }
                        ResponseTemplate::new(200).set_body_json(record.clone())
                    }
                    None => not_found(),
                }
            }
            ("DELETE", [collection, id]) => {
                let records = state.collections.entry(collection.clone()).or_default();
                let before = records.len();
                records.retain(|record| record["_id"] != json!(id));
                if records.len() == before {
                    not_found()
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({"message": "Deleted"}))
                }
            }
            ("POST", [collection, test_id, questions])
                if collection == "tests" && questions == "questions" =>
            {
                let question_id = state.next_id("q");
                let tests = state.collections.entry("tests".to_string()).or_default();
                match tests.iter_mut().find(|test| test["_id"] == json!(test_id)) {
                    Some(test) => {
                        let mut question = body;
                        question["_id"] = json!(question_id);
                        if let Some(list) = test["questions"].as_array_mut() {
                            list.push(question.clone());
                        }
                        ResponseTemplate::new(201).set_body_json(question)
                    }
                    None => not_found(),
                }
            }
            ("DELETE", [collection, test_id, questions, question_id])
                if collection == "tests" && questions == "questions" =>
            {
                let tests = state.collections.entry("tests".to_string()).or_default();
                match tests.iter_mut().find(|test| test["_id"] == json!(test_id)) {
                    Some(test) => {
                        if let Some(list) = test["questions"].as_array_mut() {
                            list.retain(|question| question["_id"] != json!(question_id));
                        }
                        ResponseTemplate::new(204)
                    }
                    None => not_found(),
                }
            }
            _ => not_found(),
        }
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"}))
}

pub fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Client whose store already holds the backend's accepted token.
pub fn signed_in_client(server: &MockServer) -> ApiClient<MemoryTokenStore> {
    ApiClient::new(api_url(server), MemoryTokenStore::with_token(TOKEN)).unwrap()
}

pub fn signed_in_session(server: &MockServer) -> SessionStore<MemoryTokenStore> {
    SessionStore::restore(signed_in_client(server))
}

pub fn anonymous_client(server: &MockServer) -> ApiClient<MemoryTokenStore> {
    let store = MemoryTokenStore::default();
    assert_eq!(store.load_token().unwrap(), None);
    ApiClient::new(api_url(server), store).unwrap()
}
