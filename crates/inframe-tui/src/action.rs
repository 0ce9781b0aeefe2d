//! User actions for the TUI application

use inframe_api::ResourceKind;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Tick event for animations/timers
    Tick,
    /// Render the UI
    Render,
    /// Navigate selection up
    Up,
    /// Navigate selection down
    Down,
    /// Jump to first row
    First,
    /// Jump to last row
    Last,
    /// Activate the selected row
    Select,
    /// Go back / close popup
    Back,
    /// Show help popup
    Help,
    /// Switch to the next screen
    NextScreen,
    /// Switch to the previous screen
    PrevScreen,
    /// Switch to a specific screen
    Screen(ResourceKind),
    /// Reload the current screen
    Refresh,
    /// Ask to delete the selected record
    Delete,
    /// Confirm the pending delete
    ConfirmDelete,
    /// Toggle focus between panels
    ToggleFocus,
    /// Start search mode
    StartSearch,
    /// Update search query
    SearchInput(char),
    /// Backspace in search
    SearchBackspace,
    /// Clear search
    ClearSearch,
    /// Dismiss the error popup
    DismissError,
    /// No operation
    None,
}
