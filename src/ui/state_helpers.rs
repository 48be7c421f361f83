//! Helper functions to set ViewState properties in a grouped manner.

use log::error;
use slint::ComponentHandle;
use std::path::Path;

/// Shows the directory in the window title and clears any message.
pub fn set_directory_info(ui: &crate::AppWindow, directory: Option<&Path>, image_count: usize) {
    let view_state = ui.global::<crate::ViewState>();
    let directory = directory
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    view_state.set_current_directory(directory.into());
    view_state.set_image_count(image_count as i32);
    view_state.set_status_message("".into());
}

/// Sets a status message in the UI.
pub fn set_status(ui: &crate::AppWindow, message: &str) {
    ui.global::<crate::ViewState>()
        .set_status_message(message.into());
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the ViewState status-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    set_status(ui, &error_message);
}
