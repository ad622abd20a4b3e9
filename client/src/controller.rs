use crate::clipboard::Clipboard;
use crate::clock::{Clock, LocalClock};
use crate::location::PageLocation;
use crate::log_view::{LogChange, LogEntry, LogView, Severity};
use crate::modal::{EditSession, ModalState};
use crate::models::RelayedRequest;
use crate::relay::Relay;
use crate::slots::{Method, SlotConfig, SlotKind, DEFAULT_PAYLOAD, RECEIVE_PLACEHOLDER, SLOT_COUNT};
use crate::utils::response_preview;
use crate::view::{lock, Role, Surface, UiEvent};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// Owns slot configuration, the payload editor and the log view, and renders
/// all of them through a [`Surface`].
///
/// No operation returns an error: failures become log entries.
pub struct RemoteController {
    surface: Arc<dyn Surface>,
    relay: Arc<dyn Relay>,
    clipboard: Arc<dyn Clipboard>,
    clock: Arc<dyn Clock>,
    location: PageLocation,
    default_headers: HashMap<String, String>,
    slots: Mutex<SlotConfig>,
    modal: Mutex<ModalState>,
    log: Mutex<LogView>,
}

impl RemoteController {
    pub fn new(
        surface: Arc<dyn Surface>,
        relay: Arc<dyn Relay>,
        clipboard: Arc<dyn Clipboard>,
        location: PageLocation,
    ) -> Self {
        Self {
            surface,
            relay,
            clipboard,
            clock: Arc::new(LocalClock),
            location,
            default_headers: HashMap::new(),
            slots: Mutex::new(SlotConfig::default()),
            modal: Mutex::new(ModalState::Closed),
            log: Mutex::new(LogView::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Headers forwarded with every relayed request.
    pub fn with_default_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Startup rendering.
    pub fn init(&self) {
        self.update_full_urls();
    }

    pub fn payload(&self, index: usize) -> Option<String> {
        lock(&self.slots).payload(index).map(str::to_string)
    }

    pub fn set_payload(&self, index: usize, text: &str) {
        lock(&self.slots).set_payload(index, text);
    }

    pub fn method(&self, index: usize) -> Option<Method> {
        lock(&self.slots).method(index)
    }

    pub fn set_method(&self, index: usize, method: Method) {
        lock(&self.slots).set_method(index, method);
    }

    pub fn edit_session(&self) -> Option<EditSession> {
        lock(&self.modal).session()
    }

    /// Routes page-level events: receive-endpoint edits, backdrop clicks and Escape.
    pub fn dispatch(&self, event: &UiEvent) {
        match event {
            UiEvent::Input(Role::ReceiveEndpoint(_)) => self.update_full_urls(),
            UiEvent::Click(Role::Modal) => self.close_payload_modal(),
            UiEvent::KeyDown(key) if key == "Escape" => self.close_payload_modal(),
            _ => {}
        }
    }

    /// Recomputes the public webhook URL shown for every receive slot.
    pub fn update_full_urls(&self) {
        let base = self.location.base_url();
        for i in 0..SLOT_COUNT {
            let Some(input) = self.surface.value(Role::ReceiveEndpoint(i)) else {
                continue;
            };
            if self.surface.text(Role::FullUrl(i)).is_none() {
                continue;
            }
            let endpoint = if input.is_empty() {
                format!("/webhook{}", i + 1)
            } else {
                input
            };
            self.surface.set_text(Role::FullUrl(i), &format!("{}{}", base, endpoint));
        }
    }

    pub async fn copy_url(&self, index: usize) {
        let url = self.surface.text(Role::FullUrl(index)).unwrap_or_default();

        match self.clipboard.write_text(&url).await {
            Ok(()) => {
                self.add_log_entry(&format!("URL copied to clipboard: {}", url), Severity::Success);
            }
            Err(e) => {
                debug!("Primary clipboard write failed, trying fallback: {}", e);
                match self.clipboard.fallback_copy(&url) {
                    Ok(()) => self.add_log_entry(
                        &format!("URL copied to clipboard: {}", url),
                        Severity::Success,
                    ),
                    Err(e) => {
                        self.add_log_entry(&format!("Failed to copy URL: {}", e), Severity::Error)
                    }
                }
            }
        }
    }

    /// Fires send slot `index` through the relay. Single attempt, no timeout.
    pub async fn send_request(&self, index: usize) {
        let endpoint = self
            .surface
            .value(Role::SendEndpoint(index))
            .unwrap_or_default()
            .trim()
            .to_string();

        if endpoint.is_empty() {
            self.add_log_entry(
                &format!("ERROR: No endpoint specified for slot {}", index + 1),
                Severity::Error,
            );
            return;
        }

        let (method, payload_text) = {
            let slots = lock(&self.slots);
            (
                slots.method(index).unwrap_or(Method::Get),
                slots.payload(index).unwrap_or(DEFAULT_PAYLOAD).to_string(),
            )
        };
        let payload = self.parse_payload(&payload_text);

        self.add_log_entry(&format!("SENDING {} to {}...", method, endpoint), Severity::Info);

        let request = RelayedRequest {
            endpoint: endpoint.clone(),
            method,
            payload,
            headers: self.default_headers.clone(),
        };

        match self.relay.send(&request).await {
            Ok(reply) if reply.success => {
                let status = reply
                    .status_code
                    .map_or_else(|| "unknown".to_string(), |code| code.to_string());
                self.add_log_entry(
                    &format!("SUCCESS: {} to {} - Status: {}", method, endpoint, status),
                    Severity::Success,
                );
                if let Some(body) = reply.response.as_deref().filter(|b| !b.is_empty()) {
                    self.add_log_entry(
                        &format!("Response preview: {}", response_preview(body)),
                        Severity::Info,
                    );
                }
            }
            Ok(reply) => {
                let message = reply.error.unwrap_or_else(|| "unknown relay error".to_string());
                self.add_log_entry(&format!("ERROR: {}", message), Severity::Error);
            }
            Err(e) => {
                error!("Relay send for slot {} failed: {}", index + 1, e);
                self.add_log_entry(&format!("ERROR: Network error - {}", e), Severity::Error);
            }
        }
    }

    /// Parses stored payload text, substituting `{}` (and warning once) when it is not JSON.
    pub fn parse_payload(&self, text: &str) -> Value {
        match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored payload is not JSON: {}", e);
                self.add_log_entry(
                    "WARNING: Invalid JSON payload, sending as empty object",
                    Severity::Warning,
                );
                Value::Object(Map::new())
            }
        }
    }

    pub fn open_payload_modal(&self, index: usize, kind: SlotKind) {
        let session = EditSession { index, kind };
        *lock(&self.modal) = ModalState::Open(session);

        self.surface.set_text(Role::ModalTitle, &session.title());

        match kind {
            SlotKind::Send => {
                let (method, payload) = {
                    let slots = lock(&self.slots);
                    (
                        slots.method(index).unwrap_or(Method::Post),
                        slots.payload(index).unwrap_or(DEFAULT_PAYLOAD).to_string(),
                    )
                };
                self.surface.set_visible(Role::ModalControls, true);
                self.surface.set_value(Role::MethodSelect, method.as_str());
                self.surface.set_value(Role::PayloadEditor, &payload);
            }
            SlotKind::Receive => {
                self.surface.set_visible(Role::ModalControls, false);
                self.surface.set_value(Role::PayloadEditor, RECEIVE_PLACEHOLDER);
            }
        }

        self.surface.set_visible(Role::Modal, true);
        self.surface.focus(Role::PayloadEditor);
        debug!("Opened payload editor for {} slot {}", kind, index + 1);
    }

    /// Discards the edit session without touching configuration.
    pub fn close_payload_modal(&self) {
        let mut modal = lock(&self.modal);
        if !modal.is_open() {
            return;
        }
        *modal = ModalState::Closed;
        drop(modal);
        self.surface.set_visible(Role::Modal, false);
    }

    /// Commits the editor buffer. Invalid JSON keeps the editor open.
    pub fn save_payload(&self) {
        let Some(session) = self.edit_session() else {
            return;
        };
        let text = self.surface.value(Role::PayloadEditor).unwrap_or_default();

        if let Err(e) = serde_json::from_str::<Value>(&text) {
            debug!("Editor buffer rejected: {}", e);
            self.add_log_entry("ERROR: Invalid JSON in payload editor", Severity::Error);
            return;
        }

        // Both kinds commit into the one payload table; only send slots carry a method.
        let method = match session.kind {
            SlotKind::Send => {
                let selected = self.surface.value(Role::MethodSelect).unwrap_or_default();
                match selected.parse::<Method>() {
                    Ok(method) => Some(method),
                    Err(e) => {
                        self.add_log_entry(&format!("ERROR: {}", e), Severity::Error);
                        return;
                    }
                }
            }
            SlotKind::Receive => None,
        };
        {
            let mut slots = lock(&self.slots);
            slots.set_payload(session.index, text);
            if let Some(method) = method {
                slots.set_method(session.index, method);
            }
        }

        info!("Saved {} slot {}", session.kind, session.index + 1);
        self.add_log_entry(
            &format!(
                "Configuration saved for {} endpoint {}",
                session.kind,
                session.index + 1
            ),
            Severity::Success,
        );
        self.close_payload_modal();
    }

    pub fn add_log_entry(&self, message: &str, severity: Severity) {
        let entry = LogEntry::local(&self.clock.time_of_day(), message, severity);
        let mut log = lock(&self.log);
        let change = log.push(entry);
        self.render(change);
    }

    /// Merges one batch of relay lines, skipping any already displayed.
    pub fn merge_remote_logs(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let mut log = lock(&self.log);
        let change = log.merge_remote(lines);
        self.render(change);
    }

    /// Mirrors a log mutation onto the surface. Called with the log lock held
    /// so the surface never disagrees with the model.
    fn render(&self, change: LogChange) {
        for entry in &change.appended {
            self.surface.append_log(entry);
        }
        self.surface.scroll_log_to_end();
        for _ in 0..change.evicted {
            self.surface.remove_oldest_log();
        }
    }

    pub fn log_len(&self) -> usize {
        lock(&self.log).len()
    }

    /// One poll of the relay's log buffer. Failures go to diagnostics only.
    pub async fn poll_logs_once(&self) {
        match self.relay.logs().await {
            Ok(batch) => self.merge_remote_logs(&batch.logs),
            Err(e) => error!("Error polling logs: {}", e),
        }
    }
}
