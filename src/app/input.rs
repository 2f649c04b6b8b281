use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::Message;
use crate::app::model::{Mode, Model};
use crate::config::Keybindings;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// A key plus its required modifiers, parsed from strings like `"ctrl+w"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Parse `"q"`, `"ctrl+w"`, `"alt+x"`, `"esc"` and similar.
    ///
    /// Returns `None` for empty or unknown key names.
    pub fn parse(binding: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = binding.split('+').map(str::trim).collect();
        let key = parts.pop()?;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        let code = match key.to_ascii_lowercase().as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                // Terminals report ctrl+letter as the lowercase letter.
                if modifiers.contains(KeyModifiers::CONTROL) {
                    KeyCode::Char(c.to_ascii_lowercase())
                } else {
                    KeyCode::Char(c)
                }
            }
        };
        Some(Self { code, modifiers })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if key.code != self.code {
            return false;
        }
        // Shift is implied by the character for printable keys.
        let relevant = key.modifiers & !KeyModifiers::SHIFT;
        relevant == self.modifiers & !KeyModifiers::SHIFT
    }
}

/// Configurable keys resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    quit: KeyBinding,
    toggle_wrap: KeyBinding,
    toggle_lines: KeyBinding,
}

impl KeyMap {
    /// Build from config, falling back to the default for unparsable entries.
    pub fn from_config(bindings: &Keybindings) -> Self {
        let defaults = Keybindings::default();
        let resolve = |binding: &str, fallback: &str| {
            KeyBinding::parse(binding).unwrap_or_else(|| {
                tracing::warn!("invalid keybinding {binding:?}, using {fallback:?}");
                KeyBinding::parse(fallback).unwrap_or(KeyBinding {
                    code: KeyCode::Null,
                    modifiers: KeyModifiers::NONE,
                })
            })
        };
        Self {
            quit: resolve(&bindings.quit_key, &defaults.quit_key),
            toggle_wrap: resolve(&bindings.toggle_wrap_key, &defaults.toggle_wrap_key),
            toggle_lines: resolve(&bindings.toggle_lines_key, &defaults.toggle_lines_key),
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&Keybindings::default())
    }
}

/// Translate a terminal event into a message for the current mode.
pub fn handle_event(event: &Event, model: &Model, keys: &KeyMap) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match model.mode {
            Mode::Normal => handle_normal_key(key, keys),
            Mode::Search => handle_search_key(key),
        },
        Event::Mouse(mouse) => handle_mouse(mouse, model),
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

fn handle_normal_key(key: &KeyEvent, keys: &KeyMap) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }
    if keys.quit.matches(key) {
        return Some(Message::Quit);
    }
    if keys.toggle_wrap.matches(key) {
        return Some(Message::ToggleWordWrap);
    }
    if keys.toggle_lines.matches(key) {
        return Some(Message::ToggleLineNumbers);
    }
    if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),
        KeyCode::Char('/') => Some(Message::StartSearch),
        KeyCode::Char('n') => Some(Message::NextHit),
        KeyCode::Char('N') => Some(Message::PrevHit),
        KeyCode::Char('r') => Some(Message::ForceReload),
        _ => None,
    }
}

fn handle_search_key(key: &KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Enter => Some(Message::CommitSearch),
        KeyCode::Esc => Some(Message::CancelSearch),
        KeyCode::Backspace => Some(Message::SearchBackspace),
        KeyCode::Char(c)
            if !c.is_control()
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Message::SearchInput(c))
        }
        _ => None,
    }
}

fn handle_mouse(mouse: &MouseEvent, model: &Model) -> Option<Message> {
    if model.mode != Mode::Normal {
        return None;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
            Some(Message::ScrollUp(WHEEL_LINES))
        }
        MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
            Some(Message::ScrollDown(WHEEL_LINES))
        }
        _ => None,
    }
}
