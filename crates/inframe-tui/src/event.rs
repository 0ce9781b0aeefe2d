//! Event handling for terminal and application events

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use inframe_api::ResourceKind;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::InputMode;

/// Terminal event types
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for animations
    Tick,
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    /// Event sender
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Tick rate
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Start the event loop in a background task
    pub fn start(&self) {
        let sender = self.sender.clone();
        let tick_rate = self.tick_rate;

        tokio::spawn(async move {
            let mut last_tick = std::time::Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    let sent = match event::read() {
                        Ok(CrosstermEvent::Key(key)) => sender.send(Event::Key(key)),
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Convert a key event to an action
pub fn key_to_action(key: KeyEvent, mode: InputMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        InputMode::Error => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Action::DismissError,
            _ => Action::None,
        },
        InputMode::Confirm => match key.code {
            KeyCode::Char('y' | 'Y') => Action::ConfirmDelete,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::Back,
            _ => Action::None,
        },
        InputMode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::Back,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::ClearSearch
            }
            KeyCode::Char(c) => Action::SearchInput(c),
            _ => Action::None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Action::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Char('g') | KeyCode::Home => Action::First,
            KeyCode::Char('G') | KeyCode::End => Action::Last,
            KeyCode::Enter => Action::Select,
            KeyCode::Esc => Action::Back,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::NextScreen,
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::PrevScreen,
            KeyCode::Char('f') => Action::ToggleFocus,
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                Action::Screen(ResourceKind::ALL[index])
            }

            // Actions
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('d') | KeyCode::Delete => Action::Delete,

            // Help and search
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char('/') => Action::StartSearch,

            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        assert_eq!(key_to_action(key(KeyCode::Enter), InputMode::Normal), Action::Select);
        assert_eq!(key_to_action(key(KeyCode::Char('/')), InputMode::Normal), Action::StartSearch);
        assert_eq!(
            key_to_action(key(KeyCode::Char('3')), InputMode::Normal),
            Action::Screen(ResourceKind::LifeAtInframe)
        );
        assert_eq!(key_to_action(key(KeyCode::Char('7')), InputMode::Normal), Action::None);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), InputMode::Search),
            Action::SearchInput('q')
        );
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Search), Action::Back);
    }

    #[test]
    fn test_error_mode_only_dismisses() {
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Error), Action::DismissError);
        assert_eq!(key_to_action(key(KeyCode::Char('d')), InputMode::Error), Action::None);
    }

    #[test]
    fn test_confirm_mode() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('y')), InputMode::Confirm),
            Action::ConfirmDelete
        );
        assert_eq!(key_to_action(key(KeyCode::Char('n')), InputMode::Confirm), Action::Back);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [InputMode::Normal, InputMode::Search, InputMode::Confirm, InputMode::Error] {
            assert_eq!(key_to_action(ctrl_c, mode), Action::Quit);
        }
    }
}
