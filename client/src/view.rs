//! View binding: logical element roles and the surface that renders them.

use crate::log_view::LogEntry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A logical element of the remote's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SendEndpoint(usize),
    ReceiveEndpoint(usize),
    FullUrl(usize),
    Modal,
    ModalTitle,
    PayloadEditor,
    MethodSelect,
    ModalControls,
}

impl Role {
    pub fn element_id(&self) -> String {
        match self {
            Role::SendEndpoint(i) => format!("send-endpoint-{}", i),
            Role::ReceiveEndpoint(i) => format!("receive-endpoint-{}", i),
            Role::FullUrl(i) => format!("full-url-{}", i),
            Role::Modal => "payload-modal".to_string(),
            Role::ModalTitle => "modal-title".to_string(),
            Role::PayloadEditor => "payload-editor".to_string(),
            Role::MethodSelect => "modal-method-select".to_string(),
            Role::ModalControls => "modal-controls".to_string(),
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        let indexed = |prefix: &str| id.strip_prefix(prefix).and_then(|n| n.parse::<usize>().ok());

        if let Some(i) = indexed("send-endpoint-") {
            return Some(Role::SendEndpoint(i));
        }
        if let Some(i) = indexed("receive-endpoint-") {
            return Some(Role::ReceiveEndpoint(i));
        }
        if let Some(i) = indexed("full-url-") {
            return Some(Role::FullUrl(i));
        }
        match id {
            "payload-modal" => Some(Role::Modal),
            "modal-title" => Some(Role::ModalTitle),
            "payload-editor" => Some(Role::PayloadEditor),
            "modal-method-select" => Some(Role::MethodSelect),
            "modal-controls" => Some(Role::ModalControls),
            _ => None,
        }
    }

    /// Every role a page with `slots` send and receive slots binds.
    pub fn all(slots: usize) -> Vec<Role> {
        let mut roles = Vec::with_capacity(slots * 3 + 5);
        for i in 0..slots {
            roles.push(Role::SendEndpoint(i));
            roles.push(Role::ReceiveEndpoint(i));
            roles.push(Role::FullUrl(i));
        }
        roles.extend([
            Role::Modal,
            Role::ModalTitle,
            Role::PayloadEditor,
            Role::MethodSelect,
            Role::ModalControls,
        ]);
        roles
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element_id())
    }
}

/// Page-level events routed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The value of an input element changed.
    Input(Role),
    /// A pointer click landed exactly on `Role`.
    Click(Role),
    KeyDown(String),
}

/// Rendering handle for every [`Role`] the controller touches.
///
/// Reads return `None` when the page has no element bound to the role.
pub trait Surface: Send + Sync {
    /// Current value of an input, textarea or select.
    fn value(&self, role: Role) -> Option<String>;
    fn set_value(&self, role: Role, value: &str);
    /// Text content of a display element.
    fn text(&self, role: Role) -> Option<String>;
    fn set_text(&self, role: Role, text: &str);
    fn set_visible(&self, role: Role, visible: bool);
    fn focus(&self, role: Role);

    fn append_log(&self, entry: &LogEntry);
    fn remove_oldest_log(&self);
    fn scroll_log_to_end(&self);
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct MemoryState {
    bound: HashSet<Role>,
    values: HashMap<Role, String>,
    texts: HashMap<Role, String>,
    visible: HashMap<Role, bool>,
    focused: Option<Role>,
    log: VecDeque<LogEntry>,
    scrolls: usize,
}

/// Surface kept entirely in memory. Backs the console host and the tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<MemoryState>,
}

impl MemorySurface {
    /// A surface with every role for `slots` slots bound and empty.
    pub fn with_slots(slots: usize) -> Self {
        Self::with_roles(Role::all(slots))
    }

    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let state = MemoryState {
            bound: roles.into_iter().collect(),
            ..MemoryState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn is_visible(&self, role: Role) -> bool {
        lock(&self.state).visible.get(&role).copied().unwrap_or(false)
    }

    pub fn focused(&self) -> Option<Role> {
        lock(&self.state).focused
    }

    pub fn log_lines(&self) -> Vec<String> {
        lock(&self.state).log.iter().map(|e| e.text.clone()).collect()
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        lock(&self.state).log.iter().cloned().collect()
    }

    pub fn scroll_count(&self) -> usize {
        lock(&self.state).scrolls
    }
}

impl Surface for MemorySurface {
    fn value(&self, role: Role) -> Option<String> {
        let state = lock(&self.state);
        if !state.bound.contains(&role) {
            return None;
        }
        Some(state.values.get(&role).cloned().unwrap_or_default())
    }

    fn set_value(&self, role: Role, value: &str) {
        let mut state = lock(&self.state);
        if state.bound.contains(&role) {
            state.values.insert(role, value.to_string());
        }
    }

    fn text(&self, role: Role) -> Option<String> {
        let state = lock(&self.state);
        if !state.bound.contains(&role) {
            return None;
        }
        Some(state.texts.get(&role).cloned().unwrap_or_default())
    }

    fn set_text(&self, role: Role, text: &str) {
        let mut state = lock(&self.state);
        if state.bound.contains(&role) {
            state.texts.insert(role, text.to_string());
        }
    }

    fn set_visible(&self, role: Role, visible: bool) {
        let mut state = lock(&self.state);
        if state.bound.contains(&role) {
            state.visible.insert(role, visible);
        }
    }

    fn focus(&self, role: Role) {
        let mut state = lock(&self.state);
        if state.bound.contains(&role) {
            state.focused = Some(role);
        }
    }

    fn append_log(&self, entry: &LogEntry) {
        lock(&self.state).log.push_back(entry.clone());
    }

    fn remove_oldest_log(&self) {
        lock(&self.state).log.pop_front();
    }

    fn scroll_log_to_end(&self) {
        lock(&self.state).scrolls += 1;
    }
}
