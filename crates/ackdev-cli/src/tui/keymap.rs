//! Key bindings
//!
//! Settings map every wizard action to a list of key names such as `up`,
//! `k`, `ctrl+c` or `backtab`. Views ask the [`Keymap`] whether a key event
//! triggers one of the actions they recognize; the same key may trigger
//! different actions in different views (e.g. `down` moves a table row in
//! the summary and the focused text field in the reference editor).

use ackdev_runtime::KeyBindings;
use ackdev_types::FieldFlag;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::error::KeymapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    Quit,
    Interrupt,
    Ignore,
    NextField,
    PrevField,
    Flag(FieldFlag),
}

impl Action {
    pub const ALL: [Action; 16] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Confirm,
        Action::Back,
        Action::Quit,
        Action::Interrupt,
        Action::Ignore,
        Action::NextField,
        Action::PrevField,
        Action::Flag(FieldFlag::Required),
        Action::Flag(FieldFlag::PrimaryKey),
        Action::Flag(FieldFlag::Secret),
        Action::Flag(FieldFlag::Immutable),
        Action::Flag(FieldFlag::Arn),
    ];

    /// Key of the action in the `[keys]` settings table
    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Confirm => "confirm",
            Action::Back => "back",
            Action::Quit => "quit",
            Action::Interrupt => "interrupt",
            Action::Ignore => "ignore",
            Action::NextField => "next_field",
            Action::PrevField => "prev_field",
            Action::Flag(FieldFlag::Required) => "required",
            Action::Flag(FieldFlag::PrimaryKey) => "primary_key",
            Action::Flag(FieldFlag::Secret) => "secret",
            Action::Flag(FieldFlag::Immutable) => "immutable",
            Action::Flag(FieldFlag::Arn) => "arn",
        }
    }

    fn configured(self, keys: &KeyBindings) -> &[String] {
        match self {
            Action::Up => &keys.up,
            Action::Down => &keys.down,
            Action::Left => &keys.left,
            Action::Right => &keys.right,
            Action::Confirm => &keys.confirm,
            Action::Back => &keys.back,
            Action::Quit => &keys.quit,
            Action::Interrupt => &keys.interrupt,
            Action::Ignore => &keys.ignore,
            Action::NextField => &keys.next_field,
            Action::PrevField => &keys.prev_field,
            Action::Flag(FieldFlag::Required) => &keys.required,
            Action::Flag(FieldFlag::PrimaryKey) => &keys.primary_key,
            Action::Flag(FieldFlag::Secret) => &keys.secret,
            Action::Flag(FieldFlag::Immutable) => &keys.immutable,
            Action::Flag(FieldFlag::Arn) => &keys.arn,
        }
    }
}

/// A single key plus modifiers, parsed from a key name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Parse `enter`, `ctrl+c`, `backtab`, `f5`, `k`, `Q`, ...
    pub fn parse(name: &str) -> Option<Self> {
        if name.chars().count() == 1 {
            return name.chars().next().map(Self::char);
        }

        let mut parts: Vec<&str> = name.split('+').collect();
        let key = parts.pop()?;
        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = if key.chars().count() == 1 {
            KeyCode::Char(key.chars().next()?)
        } else {
            match key.to_ascii_lowercase().as_str() {
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "backspace" => KeyCode::Backspace,
                "delete" | "del" => KeyCode::Delete,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "pageup" => KeyCode::PageUp,
                "pagedown" => KeyCode::PageDown,
                "space" => KeyCode::Char(' '),
                other => {
                    let number = other.strip_prefix('f')?.parse::<u8>().ok()?;
                    if !(1..=12).contains(&number) {
                        return None;
                    }
                    KeyCode::F(number)
                }
            }
        };

        Some(Self { code, modifiers })
    }

    fn char(c: char) -> Self {
        let modifiers = if c.is_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        Self {
            code: KeyCode::Char(c),
            modifiers,
        }
    }

    /// Shift is carried by the key code itself (`K` vs `k`, `BackTab`),
    /// so it is ignored when comparing modifiers.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code
            && key.modifiers.difference(KeyModifiers::SHIFT)
                == self.modifiers.difference(KeyModifiers::SHIFT)
    }

    pub fn to_event(self) -> KeyEvent {
        let modifiers = if self.code == KeyCode::BackTab {
            self.modifiers | KeyModifiers::SHIFT
        } else {
            self.modifiers
        };
        KeyEvent::new(self.code, modifiers)
    }

    /// Short label for footer hints
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "shift+tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "del".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pgup".to_string(),
            KeyCode::PageDown => "pgdn".to_string(),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("f{}", n),
            other => format!("{:?}", other).to_lowercase(),
        };

        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("alt+");
        }
        label.push_str(&key);
        label
    }
}

/// One entry of the footer help line, rendered as `[keys] label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub keys: String,
    pub label: &'static str,
}

impl Hint {
    pub fn width(&self) -> usize {
        self.keys.chars().count() + 3 + self.label.chars().count()
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(Action, Vec<KeyBinding>)>,
}

impl Keymap {
    pub fn from_settings(keys: &KeyBindings) -> Result<Self, KeymapError> {
        let mut bindings = Vec::with_capacity(Action::ALL.len());
        for action in Action::ALL {
            let mut parsed = Vec::new();
            for name in action.configured(keys) {
                let binding = KeyBinding::parse(name).ok_or_else(|| KeymapError {
                    action: action.name(),
                    key: name.clone(),
                })?;
                parsed.push(binding);
            }
            bindings.push((action, parsed));
        }
        Ok(Self { bindings })
    }

    pub fn bindings(&self, action: Action) -> &[KeyBinding] {
        self.bindings
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    pub fn is(&self, action: Action, key: &KeyEvent) -> bool {
        self.bindings(action)
            .iter()
            .any(|binding| binding.matches(key))
    }

    /// Every key of a single action (`↑/k`), or the first key of each of
    /// several actions (`↑/↓`).
    pub fn hint(&self, actions: &[Action], label: &'static str) -> Hint {
        let keys: Vec<String> = match actions {
            [action] => self
                .bindings(*action)
                .iter()
                .map(KeyBinding::label)
                .collect(),
            _ => actions
                .iter()
                .filter_map(|action| self.bindings(*action).first())
                .map(KeyBinding::label)
                .collect(),
        };

        Hint {
            keys: keys.join("/"),
            label,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let defaults = KeyBindings::default();
        let bindings = Action::ALL
            .into_iter()
            .map(|action| {
                let keys = action
                    .configured(&defaults)
                    .iter()
                    .filter_map(|name| KeyBinding::parse(name))
                    .collect();
                (action, keys)
            })
            .collect();
        Self { bindings }
    }
}
