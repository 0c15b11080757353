use crate::domain::NormalizeOptions;
use crate::relay::{Dispatcher, ForwardError, Forwarder};
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Forwarder that keeps every body it is handed.
#[derive(Default)]
pub struct RecordingForwarder {
    pub bodies: Mutex<Vec<Value>>,
}

impl Forwarder for RecordingForwarder {
    fn forward(&self, body: &[u8]) -> Result<u16, ForwardError> {
        let value = serde_json::from_slice(body).expect("forwarded body is JSON");
        self.bodies.lock().unwrap().push(value);
        Ok(201)
    }
}

/// Forwarder standing in for a dead downstream.
pub struct FailingForwarder;

impl Forwarder for FailingForwarder {
    fn forward(&self, _body: &[u8]) -> Result<u16, ForwardError> {
        Err(ForwardError::Unavailable("connection refused".into()))
    }
}

pub fn test_state(forwarder: Arc<dyn Forwarder>, store_listings: bool) -> AppState {
    let dispatcher = Dispatcher::start(2, 16, NormalizeOptions::default(), forwarder).unwrap();
    AppState::new(dispatcher, store_listings)
}

pub fn post(path: &str, body: &str) -> Request<Body> {
    post_body(path, Body::from(body.to_string()))
}

pub fn post_body(path: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(body)
        .unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut body = String::new();
    resp.body_mut().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: &mut Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}
