use crate::file_utils::{PathExt, resolve_start_directory};
use crate::state::AppState;
use log::info;
use std::path::PathBuf;

fn startup_directory_from_args() -> Option<PathBuf> {
    std::env::args_os().skip(1).find_map(|arg| {
        let arg_str = arg.to_string_lossy();
        if arg_str.starts_with('-') {
            None
        } else {
            Some(PathBuf::from(arg))
        }
    })
}

/// Opens the directory given on the command line, or the working directory.
pub fn configure_startup_opening(app: &crate::AppWindow, app_state: &AppState) {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let directory = resolve_start_directory(startup_directory_from_args(), &working_dir);
    info!("Startup directory: {}", directory.format_for_log());

    crate::ui::show_directory(app, app_state, &directory);
}
