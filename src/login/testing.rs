//! In-memory collaborators for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use anyhow::anyhow;
use serde_json::{json, Value};
use url::Url;

use super::browser::Opener;
use super::client::PROVIDERS_PATH;
use super::error::TransportError;
use super::prompt::Prompter;
use super::transport::{resolve_url, Response, Transport};

fn json_response(status: u16, body: &Value) -> Response {
    Response {
        status,
        body: serde_json::to_vec(body).unwrap(),
    }
}

/// Serves a fixed providers catalog and scripted login responses, and
/// records every request.
pub struct FakeTransport {
    base: Url,
    providers: Response,
    login: RefCell<VecDeque<Response>>,
    gets: RefCell<Vec<String>>,
    posts: RefCell<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            base: Url::parse("https://cluster.example.com").unwrap(),
            providers: json_response(200, &json!({})),
            login: RefCell::new(VecDeque::from([json_response(200, &json!({"token": "token"}))])),
            gets: RefCell::default(),
            posts: RefCell::default(),
        }
    }

    pub fn with_providers(mut self, catalog: Value) -> Self {
        self.providers = json_response(200, &catalog);
        self
    }

    pub fn with_providers_status(mut self, status: u16) -> Self {
        self.providers = json_response(status, &json!({}));
        self
    }

    /// Login responses served in order; the last one repeats.
    pub fn with_login_responses(self, responses: Vec<(u16, Value)>) -> Self {
        *self.login.borrow_mut() = responses
            .iter()
            .map(|(status, body)| json_response(*status, body))
            .collect();
        self
    }

    pub fn accepting(self, token: &str) -> Self {
        self.with_login_responses(vec![(200, json!({ "token": token }))])
    }

    pub fn rejecting(self, status: u16, body: Value) -> Self {
        self.with_login_responses(vec![(status, body)])
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.borrow().clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        resolve_url(&self.base, path)
    }

    fn get(&self, path: &str) -> Result<Response, TransportError> {
        self.gets.borrow_mut().push(path.to_string());
        if path == PROVIDERS_PATH {
            Ok(self.providers.clone())
        } else {
            Ok(json_response(404, &json!({})))
        }
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<Response, TransportError> {
        self.posts.borrow_mut().push((path.to_string(), body.clone()));
        let mut login = self.login.borrow_mut();
        let response = if login.len() > 1 {
            login.pop_front()
        } else {
            login.front().cloned()
        };
        Ok(response.unwrap_or_else(|| json_response(500, &json!({}))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Input(String),
    Password(String),
    Select(String, Vec<String>),
}

/// Answers prompts from scripted queues. Running out of answers is an
/// `UnexpectedEof` error.
#[derive(Default)]
pub struct ScriptedPrompt {
    inputs: RefCell<VecDeque<String>>,
    passwords: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    calls: RefCell<Vec<PromptCall>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(self, answer: &str) -> Self {
        self.inputs.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn password(self, answer: &str) -> Self {
        self.passwords.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn select(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(index);
        self
    }

    pub fn calls(&self) -> Vec<PromptCall> {
        self.calls.borrow().clone()
    }
}

fn exhausted() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
}

impl Prompter for ScriptedPrompt {
    fn input(&self, prompt: &str) -> io::Result<String> {
        self.calls.borrow_mut().push(PromptCall::Input(prompt.to_string()));
        self.inputs.borrow_mut().pop_front().ok_or_else(exhausted)
    }

    fn password(&self, prompt: &str) -> io::Result<String> {
        self.calls.borrow_mut().push(PromptCall::Password(prompt.to_string()));
        self.passwords.borrow_mut().pop_front().ok_or_else(exhausted)
    }

    fn select(&self, prompt: &str, items: &[String]) -> io::Result<usize> {
        self.calls
            .borrow_mut()
            .push(PromptCall::Select(prompt.to_string(), items.to_vec()));
        self.selections.borrow_mut().pop_front().ok_or_else(exhausted)
    }
}

/// Records the URLs it is asked to open; optionally fails every time.
#[derive(Default)]
pub struct RecordingOpener {
    fail: bool,
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            Err(anyhow!("no browser available"))
        } else {
            Ok(())
        }
    }
}
