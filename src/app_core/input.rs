//! Runtime-agnostic input event types.
//!
//! Both the native (crossterm) and web (ratzilla) runtimes convert their
//! platform-specific key events into these types before calling the shared reducer.

/// Runtime-agnostic key codes used by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKeyCode {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Enter,
    Esc,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
}

/// A runtime-agnostic keyboard event.
#[derive(Debug, Clone, Copy)]
pub struct AppKeyEvent {
    pub code: AppKeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// `true` when the key was released (ignored by the reducer).
    pub is_release: bool,
}
