use crate::slots::SlotKind;

/// The slot currently open in the payload editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSession {
    pub index: usize,
    pub kind: SlotKind,
}

impl EditSession {
    pub fn title(&self) -> String {
        format!(
            "EDIT PAYLOAD - {} ENDPOINT {}",
            self.kind.as_str().to_uppercase(),
            self.index + 1
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(EditSession),
}

impl ModalState {
    pub fn session(&self) -> Option<EditSession> {
        match self {
            ModalState::Closed => None,
            ModalState::Open(session) => Some(*session),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}
