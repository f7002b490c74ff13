//! Messages flowing through the session loop.

use std::fmt;

use ackdev_types::FieldFlag;
use crossterm::event::KeyEvent;

use super::widgets::ButtonId;

/// A request to change screens or mutate the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectResource(String),
    ToggleIgnore(String),
    OpenSpecFields,
    OpenStatusFields,
    OpenReference(String),
    ToggleFieldFlag { field: String, flag: FieldFlag },
    ButtonSelected(ButtonId),
    RequestDiscard,
    Return,
    Quit,
    Discard,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::SelectResource(kind) => write!(f, "SelectResource({})", kind),
            Intent::ToggleIgnore(kind) => write!(f, "ToggleIgnore({})", kind),
            Intent::OpenSpecFields => write!(f, "OpenSpecFields"),
            Intent::OpenStatusFields => write!(f, "OpenStatusFields"),
            Intent::OpenReference(field) => write!(f, "OpenReference({})", field),
            Intent::ToggleFieldFlag { field, flag } => {
                write!(f, "ToggleFieldFlag({}, {:?})", field, flag)
            }
            Intent::ButtonSelected(id) => write!(f, "ButtonSelected({:?})", id),
            Intent::RequestDiscard => write!(f, "RequestDiscard"),
            Intent::Return => write!(f, "Return"),
            Intent::Quit => write!(f, "Quit"),
            Intent::Discard => write!(f, "Discard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Intent(Intent),
    Interrupt,
}

/// One-shot unit of work run by the loop on a later tick
pub type Deferred = Box<dyn FnOnce() -> Message>;

pub fn defer(intent: Intent) -> Deferred {
    Box::new(move || Message::Intent(intent))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Quit normally; the document should be written
    Completed,
    /// Discarded from the dialog or input ran out; nothing is written
    Aborted,
    /// Cancelled by the interrupt key or signal; nothing is written and no
    /// further service is started
    Interrupted,
}

/// Result of dispatching one message
pub enum Flow {
    Continue(Vec<Deferred>),
    Exit(SessionOutcome),
}

impl Flow {
    pub fn idle() -> Self {
        Flow::Continue(Vec::new())
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Continue(deferred) => write!(f, "Continue({} deferred)", deferred.len()),
            Flow::Exit(outcome) => write!(f, "Exit({:?})", outcome),
        }
    }
}
