pub mod breadcrumbs;
pub mod error;
pub mod events;
pub mod focus;
pub mod intent;
pub mod keymap;
pub mod layout;
pub mod navigation;
pub mod session;
pub mod views;
pub mod widgets;

pub use error::{KeymapError, NavigationError};
pub use events::{EventSource, KeyScript, ScriptedEventSource, TerminalEventSource, parse_script};
pub use intent::{Flow, Intent, Message, SessionOutcome};
pub use keymap::Keymap;
pub use layout::{Dimensions, LayoutContext};
pub use navigation::Navigator;
pub use session::{Session, SessionReport};
