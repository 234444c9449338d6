//! Shared fixtures for unit tests: token builder, recording seams, and a
//! scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::context::{NavigationCommand, Navigator, Notice, Notifier, SessionContext};
use crate::gateway::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::store::{MemoryStore, SessionStore};

/// Build an unsigned three-segment token carrying `claims`.
pub fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("claims serialize"));
    format!("{header}.{payload}.signature")
}

#[derive(Default)]
pub struct RecordingNavigator {
    commands: Mutex<Vec<NavigationCommand>>,
}

impl RecordingNavigator {
    pub fn commands(&self) -> Vec<NavigationCommand> {
        self.commands.lock().expect("navigator lock").clone()
    }

    pub fn targets(&self) -> Vec<&'static str> {
        self.commands().into_iter().map(|c| c.target).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, command: NavigationCommand) {
        self.commands.lock().expect("navigator lock").push(command);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().expect("notifier lock").push(notice.clone());
    }
}

/// Store that counts `clear` calls.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    clears: Mutex<usize>,
}

impl CountingStore {
    pub fn clears(&self) -> usize {
        *self.clears.lock().expect("store lock")
    }
}

impl SessionStore for CountingStore {
    fn save(&self, token: &str) {
        self.inner.save(token);
    }

    fn read(&self) -> Option<String> {
        self.inner.read()
    }

    fn clear(&self) {
        *self.clears.lock().expect("store lock") += 1;
        self.inner.clear();
    }
}

/// A context wired to recording seams.
pub struct TestRig {
    pub context: SessionContext,
    pub store: Arc<CountingStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestRig {
    pub fn new() -> Self {
        let store = Arc::new(CountingStore::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let context = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
        Self { context, store, navigator, notifier }
    }

    pub fn with_token(token: &str) -> Self {
        let rig = Self::new();
        rig.store.save(token);
        rig
    }
}

/// Transport that replays queued responses (repeating the last one) and
/// records every request it receives.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Arc::new(Mutex::new(Vec::new())), delay: None }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(ApiResponse { status, body: body.to_owned() })])
    }

    /// Yield to the runtime before answering so concurrent calls interleave.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<ApiRequest>>> {
        self.requests.clone()
    }

    fn next_response(&self) -> Result<ApiResponse, TransportError> {
        let mut responses = self.responses.lock().expect("transport lock");
        if responses.len() > 1 {
            responses.pop_front().expect("non-empty queue")
        } else {
            responses
                .front()
                .cloned()
                .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())))
        }
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().expect("transport lock").push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response()
    }
}
