//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (choose_directory, apply, pointer buttons,
//! delete) using the appropriate threading model for each operation type.

use crate::file_utils::PathExt;
use crate::services::{
    PointerAction, PointerButton, PointerInput, commit_service, desktop_service,
    directory_service,
};
use crate::state::AppState;
use crate::thumbnail::ThumbnailSink;
use crate::ui::grid::GridGeometry;
use crate::ui::tiles::{create_slint_image, set_tile_thumbnail};
use crate::ui::{set_directory_info, set_error_with_prefix, set_status};
use log::{debug, error};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;
use std::path::Path;
use std::sync::Arc;

/// Builds the sink that puts finished thumbnails on their tile.
///
/// Runs on a worker thread and hops to the event loop; only the picture of
/// the target tile is touched.
fn thumbnail_sink(ui_handle: slint::Weak<crate::AppWindow>) -> ThumbnailSink {
    Arc::new(move |tile, thumbnail| {
        let ui_handle = ui_handle.clone();
        let _ = slint::invoke_from_event_loop(move || {
            if let Some(ui) = ui_handle.upgrade() {
                let tiles = ui.global::<crate::ViewState>().get_tiles();
                set_tile_thumbnail(&tiles, tile, create_slint_image(thumbnail));
            }
        });
    })
}

/// Loads `dir` into the grid.
pub fn show_directory(ui: &crate::AppWindow, state: &AppState, dir: &Path) {
    let sink = thumbnail_sink(ui.as_weak());
    let mut board = state.board.borrow_mut();
    let result = {
        let mut pool = state.thumbnails.borrow_mut();
        directory_service::open_directory(&mut *board, &mut pool, dir, &sink)
    };

    match result {
        Ok(count) => {
            state.controller.borrow_mut().reset(&mut *board);
            set_directory_info(ui, board.directory(), count);
        }
        Err(e) => set_error_with_prefix(ui, "Failed to open directory", e.to_string()),
    }
}

fn apply_changes(ui: &crate::AppWindow, state: &AppState) {
    let sink = thumbnail_sink(ui.as_weak());
    let mut board = state.board.borrow_mut();
    let result = {
        let mut pool = state.thumbnails.borrow_mut();
        commit_service::apply_and_reconcile(&mut *board, &mut pool, &sink)
    };

    match result {
        Ok(report) if report.rename_failed => {
            state.controller.borrow_mut().reset(&mut *board);
            set_directory_info(ui, board.directory(), board.len());
            set_status(ui, "Some files could not be renamed, directory reloaded");
        }
        Ok(_) => set_directory_info(ui, board.directory(), board.len()),
        Err(e) => set_error_with_prefix(ui, "Failed to reload directory", e.to_string()),
    }
}

fn dispatch_pointer(
    state: &AppState,
    button: PointerButton,
    action: PointerAction,
    x: f32,
    y: f32,
    columns: i32,
) {
    let hit = GridGeometry::with_columns(columns).hit_test(x, y);
    debug!("{:?} {:?} at ({}, {}) -> {:?}", button, action, x, y, hit);

    let to_open = {
        let mut board = state.board.borrow_mut();
        state.controller.borrow_mut().handle_pointer(
            &mut *board,
            PointerInput {
                button,
                action,
                hit,
            },
        )
    };

    if let Some(path) = to_open {
        if let Err(e) = desktop_service::open_file(&path) {
            error!("{}", e);
        }
    }
}

fn pointer_handler(
    state: &AppState,
    button: PointerButton,
    action: PointerAction,
) -> impl FnMut(f32, f32, i32) + 'static {
    let state = state.clone();
    move |x, y, columns| dispatch_pointer(&state, button, action, x, y, columns)
}

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: AppState) {
    let logic = ui.global::<crate::Logic>();

    // Directory chooser
    // AsyncFileDialog must run on the main thread, hence slint::spawn_local.
    logic.on_choose_directory({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let state = state.clone();
            let start_dir = state.board.borrow().directory().map(Path::to_path_buf);
            let _ = slint::spawn_local(async move {
                let mut dialog = AsyncFileDialog::new().set_title("Choose directory");
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                let Some(folder) = dialog.pick_folder().await else {
                    debug!("No directory selected");
                    return;
                };

                if let Some(ui) = ui_handle.upgrade() {
                    debug!("Directory chosen: {}", folder.path().format_for_log());
                    show_directory(&ui, &state, folder.path());
                }
            });
        }
    });

    logic.on_apply({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                apply_changes(&ui, &state);
            }
        }
    });

    // Pointer buttons over the grid
    logic.on_primary_pressed(pointer_handler(&state, PointerButton::Primary, PointerAction::Press));
    logic.on_primary_released(pointer_handler(
        &state,
        PointerButton::Primary,
        PointerAction::Release,
    ));
    logic.on_secondary_pressed(pointer_handler(
        &state,
        PointerButton::Secondary,
        PointerAction::Press,
    ));
    logic.on_secondary_released(pointer_handler(
        &state,
        PointerButton::Secondary,
        PointerAction::Release,
    ));
    logic.on_middle_pressed(pointer_handler(&state, PointerButton::Middle, PointerAction::Press));
    logic.on_middle_released(pointer_handler(
        &state,
        PointerButton::Middle,
        PointerAction::Release,
    ));

    // Delete key, handled at window level
    logic.on_delete_selection({
        let state = state.clone();
        move || {
            let mut board = state.board.borrow_mut();
            state.controller.borrow_mut().delete_selection(&mut *board);
        }
    });
}
