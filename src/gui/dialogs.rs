use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use crate::controller::{DialogRequest, DialogResponse};
use crate::preset_file::{self, PRESET_EXTENSION};

/// Runs native dialogs off the UI thread.
///
/// rfd's blocking dialogs would freeze the frame loop, so each one runs on a
/// short-lived thread and posts its DialogResponse back over a channel that
/// the GUI drains every frame.
pub struct NativeDialogs {
    tx: Sender<DialogResponse>,
    rx: Receiver<DialogResponse>,
}

impl NativeDialogs {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Fire and forget; the answer shows up in `poll` later
    pub fn launch(&self, request: DialogRequest, ctx: &egui::Context) {
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        let spawned = thread::Builder::new()
            .name("xypad-dialog".into())
            .spawn(move || {
                let response = run_dialog(request);
                if tx.send(response).is_ok() {
                    // Wake the UI so the response is handled promptly
                    ctx.request_repaint();
                }
            });

        if let Err(e) = spawned {
            tracing::error!("[Dialogs] Could not spawn dialog thread: {}", e);
        }
    }

    /// Responses that arrived since the last frame
    pub fn poll(&self) -> Vec<DialogResponse> {
        self.rx.try_iter().collect()
    }
}

impl Default for NativeDialogs {
    fn default() -> Self {
        Self::new()
    }
}

fn run_dialog(request: DialogRequest) -> DialogResponse {
    match request {
        DialogRequest::SaveFile { folder } => {
            tracing::debug!("[Dialogs] Save chooser in {}", folder.display());
            let chosen = rfd::FileDialog::new()
                .set_title("Save Preset")
                .set_directory(&folder)
                .add_filter("Preset", &[PRESET_EXTENSION])
                .save_file()
                .map(preset_file::ensure_json_extension);
            DialogResponse::SaveFileChosen(chosen)
        }
        DialogRequest::OpenFile { folder } => {
            tracing::debug!("[Dialogs] Open chooser in {}", folder.display());
            let chosen = rfd::FileDialog::new()
                .set_title("Load Preset")
                .set_directory(&folder)
                .add_filter("Preset", &[PRESET_EXTENSION])
                .pick_file();
            DialogResponse::OpenFileChosen(chosen)
        }
        DialogRequest::Message { title, body } => {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title(title)
                .set_description(body)
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            DialogResponse::MessageDismissed
        }
    }
}
