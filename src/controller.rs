use std::mem;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::gesture::{HoldEvent, HoldGesture, HoldRing};
use crate::host::HostParams;
use crate::overlay::{
    Confirmation, DialogResult, MenuResult, MenuSections, Overlay, OverlayKind, OverlayLayout,
    OverlayManager, PresetMenu, SavePrompt,
};
use crate::preset_file::{self, PresetFile, PresetFileError};
use crate::presets::{self, PresetId, PresetList};
use crate::shared_state::{AppConfig, Bounds, Placement, Point, Size, Variant, VisualPreset};
use crate::timer::{TickTimer, TimerMode};

/// Work the controller needs done by a native dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogRequest {
    /// Save-as chooser filtered to *.json
    SaveFile { folder: PathBuf },
    /// Open chooser filtered to *.json
    OpenFile { folder: PathBuf },
    /// Informational message box
    Message { title: String, body: String },
}

/// Completion of a DialogRequest. `None` paths mean the user cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogResponse {
    SaveFileChosen(Option<PathBuf>),
    OpenFileChosen(Option<PathBuf>),
    MessageDismissed,
}

/// Gesture/overlay controller behind the pad window.
///
/// Owns the pad placement, the saved preset list, the hold gesture and its
/// timers, and the single modal overlay. Everything runs on the UI thread:
/// pointer events and `tick` drive it, and native dialogs are requested
/// through an outbox and answered with `on_dialog_response`.
pub struct PadController {
    config: AppConfig,
    placement: Placement,
    presets: PresetList,

    gesture: HoldGesture,
    hold_timer: TickTimer,
    /// Only in the plugin editor: mirrors placement into host slots
    param_timer: Option<TickTimer>,

    overlays: OverlayManager,
    host: Option<HostParams>,

    surface: Size,
    pad_bounds: Bounds,

    presets_folder: Option<PathBuf>,
    outbox: Vec<DialogRequest>,
}

impl PadController {
    /// Controller without host parameters
    pub fn new(config: AppConfig) -> Self {
        Self::with_host(config, None)
    }

    pub fn with_host(config: AppConfig, host: Option<HostParams>) -> Self {
        let (presets, hold_mode, param_timer) = match config.variant {
            // No ring to animate, so a single deadline is enough
            Variant::Standalone => (
                presets::built_in_presets(),
                TimerMode::Deadline(config.hold_threshold()),
                None,
            ),
            Variant::PluginEditor => {
                let mut params = TickTimer::new(TimerMode::Periodic(config.param_sync_interval()));
                params.start(Instant::now());
                (
                    PresetList::new(),
                    TimerMode::Periodic(config.editor_tick()),
                    Some(params),
                )
            }
        };

        // The editor starts from whatever the host currently holds
        let placement = host
            .as_ref()
            .map(HostParams::read_placement)
            .unwrap_or_else(|| Placement::new(0.5, 0.5, VisualPreset::Blue));

        let size = config.window_size();
        let surface = Size::new(size[0], size[1]);
        let pad_bounds = config.pad_bounds(surface);

        tracing::info!(
            "[Controller] {:?} variant, {} saved presets, hold threshold {:?}",
            config.variant,
            presets.len(),
            config.hold_threshold()
        );

        Self {
            gesture: HoldGesture::new(config.hold_threshold()),
            hold_timer: TickTimer::new(hold_mode),
            param_timer,
            config,
            placement,
            presets,
            overlays: OverlayManager::new(),
            host,
            surface,
            pad_bounds,
            presets_folder: None,
            outbox: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn presets(&self) -> &PresetList {
        &self.presets
    }

    pub fn overlay(&self) -> &Overlay {
        self.overlays.current()
    }

    pub fn overlay_layout(&self) -> Option<OverlayLayout> {
        self.overlays.layout(self.surface)
    }

    pub fn menu_sections(&self) -> MenuSections {
        MenuSections::for_variant(self.config.variant)
    }

    pub fn save_prompt_mut(&mut self) -> Option<&mut SavePrompt> {
        self.overlays.save_prompt_mut()
    }

    pub fn pad_bounds(&self) -> Bounds {
        self.pad_bounds
    }

    pub fn hold_progress(&self) -> f32 {
        self.gesture.progress()
    }

    /// Only the plugin editor animates the hold
    pub fn hold_ring(&self) -> Option<HoldRing> {
        match self.config.variant {
            Variant::PluginEditor => HoldRing::from_progress(self.hold_progress()),
            Variant::Standalone => None,
        }
    }

    /// Drain pending dialog requests
    pub fn take_requests(&mut self) -> Vec<DialogRequest> {
        mem::take(&mut self.outbox)
    }

    /// How long until a timer needs `tick` again
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let hold = self.hold_timer.time_until_due(now);
        let params = self.param_timer.as_ref().and_then(|t| t.time_until_due(now));
        match (hold, params) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // === Layout ===

    pub fn set_layout(&mut self, surface: Size) {
        if surface != self.surface {
            self.surface = surface;
            self.pad_bounds = self.config.pad_bounds(surface);
        }
    }

    // === Pad passthrough ===

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.placement.set_position(x, y);
    }

    pub fn set_preset(&mut self, preset: VisualPreset) {
        self.placement.preset = preset;
    }

    // === Pointer events ===

    /// Start a hold when the press lands outside the pad and nothing modal is up
    pub fn pointer_down(&mut self, pos: Point, now: Instant) {
        if self.overlays.is_open() || self.pad_bounds.contains(pos) {
            return;
        }
        self.gesture.begin(now);
        self.hold_timer.start(now);
    }

    /// Any release cancels the hold, whatever state it was in
    pub fn pointer_up(&mut self) {
        self.hold_timer.stop();
        self.gesture.release();
    }

    /// Cycle the visual preset. Returns the new preset if the click counted.
    pub fn double_click(&mut self, pos: Point) -> Option<VisualPreset> {
        if self.overlays.is_open() || self.pad_bounds.contains(pos) {
            return None;
        }
        let next = self.placement.preset.next();
        self.placement.preset = next;
        if let Some(host) = &self.host {
            host.set_preset(next);
        }
        tracing::info!("[Controller] Visual preset -> {}", next.name());
        Some(next)
    }

    /// Poll timers. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        let params_due = self.param_timer.as_mut().is_some_and(|t| t.poll(now));
        if params_due {
            self.sync_host_params();
        }

        if self.hold_timer.poll(now) {
            if let HoldEvent::OpenMenu = self.gesture.tick(now) {
                self.hold_timer.stop();
                self.show_preset_menu();
            }
        }
    }

    /// Mirror placement into the host slots (no-op without a host)
    pub fn sync_host_params(&self) {
        if let Some(host) = &self.host {
            host.write_placement(&self.placement);
        }
    }

    // === Overlays ===

    pub fn show_preset_menu(&mut self) {
        let menu = PresetMenu::build(&self.presets);
        if let Err(e) = self.overlays.open(Overlay::Menu(menu)) {
            tracing::warn!("[Controller] Preset menu not shown: {}", e);
        }
    }

    /// Route a menu pick. Favorite toggles keep the menu open; everything
    /// else closes it before acting.
    pub fn handle_menu_result(&mut self, result: MenuResult) {
        if let MenuResult::ToggleFavorite(id) = result {
            self.toggle_favorite(id);
            return;
        }

        if self.overlays.kind() == Some(OverlayKind::Menu) {
            self.overlays.close();
        }

        match result {
            MenuResult::Cancelled => tracing::debug!("[Controller] Menu dismissed"),
            MenuResult::Save => self.begin_save(),
            MenuResult::LoadFromFile => match self.config.variant {
                Variant::PluginEditor => {
                    let folder = self.presets_folder();
                    self.outbox.push(DialogRequest::OpenFile { folder });
                }
                // The standalone menu has no file entry
                Variant::Standalone => tracing::debug!("[Controller] Menu dismissed"),
            },
            MenuResult::Load(id) => self.load_preset(id),
            MenuResult::ToggleFavorite(_) => {}
        }

        self.gesture.release();
    }

    /// Integer-code entry point; decodes through the open menu's snapshot
    pub fn handle_menu_code(&mut self, code: i32) {
        let result = match self.overlays.current() {
            Overlay::Menu(menu) => {
                if menu.is_stale(&self.presets) {
                    tracing::debug!("[Controller] Decoding code {} against an older menu", code);
                }
                menu.decode(code)
            }
            _ => {
                tracing::warn!("[Controller] Menu code {} with no menu open", code);
                return;
            }
        };
        self.handle_menu_result(result);
    }

    /// Result of the in-app name prompt
    pub fn submit_save_name(&mut self, result: DialogResult) {
        if self.overlays.kind() == Some(OverlayKind::SaveDialog) {
            self.overlays.close();
        }
        match result {
            DialogResult::Cancelled => tracing::debug!("[Controller] Save cancelled"),
            DialogResult::Name(name) => self.save_preset(&name),
        }
    }

    pub fn dismiss_confirmation(&mut self) {
        if self.overlays.kind() == Some(OverlayKind::Confirmation) {
            self.overlays.close();
        }
    }

    /// Escape or a click on the dim layer: cancel whatever is showing
    pub fn cancel_overlay(&mut self) {
        match self.overlays.kind() {
            Some(OverlayKind::Menu) => self.handle_menu_result(MenuResult::Cancelled),
            Some(OverlayKind::SaveDialog) => self.submit_save_name(DialogResult::Cancelled),
            Some(OverlayKind::Confirmation) => self.dismiss_confirmation(),
            None => {}
        }
    }

    fn begin_save(&mut self) {
        match self.config.variant {
            Variant::Standalone => {
                if let Err(e) = self.overlays.open(Overlay::SaveDialog(SavePrompt::default())) {
                    tracing::warn!("[Controller] Save dialog not shown: {}", e);
                }
            }
            Variant::PluginEditor => {
                let folder = self.presets_folder();
                self.outbox.push(DialogRequest::SaveFile { folder });
            }
        }
    }

    fn confirm(&mut self, title: &str, body: String) {
        match self.config.variant {
            Variant::Standalone => {
                if let Err(e) = self
                    .overlays
                    .open(Overlay::Confirmation(Confirmation::new(title, body)))
                {
                    tracing::warn!("[Controller] Confirmation not shown: {}", e);
                }
            }
            Variant::PluginEditor => self.outbox.push(DialogRequest::Message {
                title: title.to_string(),
                body,
            }),
        }
    }

    // === Preset list ===

    /// Flip a favorite and refresh the menu in place if it is showing
    pub fn toggle_favorite(&mut self, id: PresetId) {
        if self.presets.toggle_favorite(id) {
            if let Some(menu) = self.overlays.menu_mut() {
                menu.rebuild(&self.presets);
            }
        } else {
            tracing::warn!("[Controller] Favorite toggle for unknown preset {:?}", id);
        }
    }

    /// Append the current placement under `name` and confirm
    pub fn save_preset(&mut self, name: &str) {
        let payload = match PresetFile::from_placement(&self.placement).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("[Presets] Could not serialize placement: {}", e);
                String::new()
            }
        };
        self.presets.push(name, payload);
        tracing::info!("[Presets] Saved '{}' ({} total)", name, self.presets.len());
        self.confirm("Preset Saved", format!("\"{}\" saved successfully!", name));
    }

    /// Apply a saved record. Records with no payload only confirm.
    pub fn load_preset(&mut self, id: PresetId) {
        let Some(record) = self.presets.get(id) else {
            tracing::warn!("[Presets] Load of unknown preset {:?}", id);
            return;
        };
        let name = record.name.clone();

        if record.payload.is_empty() {
            tracing::debug!("[Presets] '{}' has no stored placement", name);
        } else {
            match PresetFile::parse(&record.payload) {
                Ok(file) => self.apply_placement(file.to_placement()),
                Err(e) => tracing::warn!("[Presets] '{}' payload ignored: {}", name, e),
            }
        }

        tracing::info!("[Presets] Loaded '{}'", name);
        self.confirm("Preset Loaded", format!("Loaded \"{}\"", name));
    }

    /// Load by name; duplicates resolve to the first in list order
    pub fn load_preset_named(&mut self, name: &str) -> bool {
        match self.presets.find_by_name(name).map(|r| r.id) {
            Some(id) => {
                self.load_preset(id);
                true
            }
            None => false,
        }
    }

    // === Preset files ===

    /// Write the current placement; the path gets a `.json` extension if it lacks one
    pub fn save_preset_to_file(&mut self, path: PathBuf) -> Result<PathBuf, PresetFileError> {
        let path = preset_file::ensure_json_extension(path);
        PresetFile::from_placement(&self.placement).write(&path)?;
        tracing::info!("[Presets] Saved preset file {}", path.display());
        self.confirm("Preset Saved", format!("Preset saved to {}", display_name(&path)));
        Ok(path)
    }

    /// Read a preset file and apply it to the pad and host slots
    pub fn load_preset_from_file(&mut self, path: &Path) -> Result<(), PresetFileError> {
        let file = PresetFile::read(path)?;
        self.apply_placement(file.to_placement());
        tracing::info!("[Presets] Loaded preset file {}", path.display());
        self.confirm(
            "Preset Loaded",
            format!("Loaded preset from {}", display_name(path)),
        );
        Ok(())
    }

    /// Completion of a native dialog. Cancels are silent.
    pub fn on_dialog_response(&mut self, response: DialogResponse) {
        match response {
            DialogResponse::SaveFileChosen(Some(path)) => {
                if let Err(e) = self.save_preset_to_file(path) {
                    tracing::error!("[Presets] Could not write preset file: {}", e);
                }
            }
            DialogResponse::OpenFileChosen(Some(path)) => {
                // Bad files are ignored: nothing applied, no dialog
                if let Err(e) = self.load_preset_from_file(&path) {
                    tracing::warn!("[Presets] Ignoring {}: {}", path.display(), e);
                }
            }
            DialogResponse::SaveFileChosen(None) | DialogResponse::OpenFileChosen(None) => {
                tracing::debug!("[Controller] File dialog cancelled");
            }
            DialogResponse::MessageDismissed => {}
        }
    }

    fn apply_placement(&mut self, placement: Placement) {
        self.placement = placement;
        self.sync_host_params();
    }

    fn presets_folder(&mut self) -> PathBuf {
        if let Some(folder) = &self.presets_folder {
            return folder.clone();
        }
        let folder = preset_file::presets_folder(self.config.presets_folder.as_deref());
        self.presets_folder = Some(folder.clone());
        folder
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTSIDE: Point = Point::new(20.0, 20.0);
    const INSIDE: Point = Point::new(350.0, 350.0);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn standalone() -> PadController {
        PadController::new(AppConfig::default())
    }

    fn editor(host: HostParams) -> (PadController, PathBuf) {
        let folder = std::env::temp_dir().join(format!(
            "xypad_ctrl_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let config = AppConfig {
            variant: Variant::PluginEditor,
            presets_folder: Some(folder.clone()),
            ..AppConfig::default()
        };
        (PadController::with_host(config, Some(host)), folder)
    }

    /// Hold outside the pad until the menu opens
    fn open_menu(ctrl: &mut PadController) {
        let t0 = Instant::now();
        ctrl.pointer_down(OUTSIDE, t0);
        ctrl.tick(t0 + ms(3000));
        assert_eq!(ctrl.overlay().kind(), Some(OverlayKind::Menu));
    }

    // === Hold gesture ===

    #[test]
    fn test_hold_opens_menu_exactly_once() {
        let (mut ctrl, _) = editor(HostParams::default());
        let t0 = Instant::now();
        ctrl.pointer_down(OUTSIDE, t0);

        let mut opened = 0;
        let mut first_open = None;
        for step in 1..=300u64 {
            let now = t0 + ms(step * 16);
            let was_open = ctrl.overlay().kind() == Some(OverlayKind::Menu);
            ctrl.tick(now);
            if !was_open && ctrl.overlay().kind() == Some(OverlayKind::Menu) {
                opened += 1;
                first_open.get_or_insert(step * 16);
            }
        }

        assert_eq!(opened, 1);
        assert_eq!(first_open, Some(3008));
        // Timer was cancelled when the menu opened
        assert_eq!(ctrl.hold_progress(), 0.0);
    }

    #[test]
    fn test_standalone_deadline_opens_menu() {
        let mut ctrl = standalone();
        let t0 = Instant::now();
        ctrl.pointer_down(OUTSIDE, t0);

        ctrl.tick(t0 + ms(2999));
        assert!(ctrl.overlay().kind().is_none());
        ctrl.tick(t0 + ms(3000));
        assert_eq!(ctrl.overlay().kind(), Some(OverlayKind::Menu));
        assert!(ctrl.next_wakeup(t0 + ms(3000)).is_none());
    }

    #[test]
    fn test_pointer_up_prevents_menu() {
        let (mut ctrl, _) = editor(HostParams::default());
        let t0 = Instant::now();
        ctrl.pointer_down(OUTSIDE, t0);
        ctrl.tick(t0 + ms(1600));
        assert!(ctrl.hold_progress() > 0.5);
        assert!(ctrl.hold_ring().is_some());

        ctrl.pointer_up();
        assert_eq!(ctrl.hold_progress(), 0.0);
        assert!(ctrl.hold_ring().is_none());

        ctrl.tick(t0 + ms(3500));
        assert!(ctrl.overlay().kind().is_none());
    }

    #[test]
    fn test_press_inside_pad_does_not_hold() {
        let mut ctrl = standalone();
        let t0 = Instant::now();
        ctrl.pointer_down(INSIDE, t0);
        ctrl.tick(t0 + ms(5000));
        assert!(ctrl.overlay().kind().is_none());
    }

    #[test]
    fn test_standalone_has_no_ring() {
        let mut ctrl = standalone();
        let t0 = Instant::now();
        ctrl.pointer_down(OUTSIDE, t0);
        ctrl.tick(t0 + ms(2000));
        assert!(ctrl.hold_ring().is_none());
    }

    #[test]
    fn test_no_hold_while_overlay_open() {
        let mut ctrl = standalone();
        open_menu(&mut ctrl);
        ctrl.pointer_up();

        let t1 = Instant::now() + ms(10_000);
        ctrl.pointer_down(OUTSIDE, t1);
        assert!(ctrl.next_wakeup(t1).is_none());
    }

    // === Double click ===

    #[test]
    fn test_double_click_cycles_preset() {
        let mut ctrl = standalone();
        ctrl.set_preset(VisualPreset::Black);
        assert_eq!(ctrl.double_click(OUTSIDE), Some(VisualPreset::Blue));

        let start = ctrl.placement().preset;
        for _ in 0..3 {
            ctrl.double_click(OUTSIDE);
        }
        assert_eq!(ctrl.placement().preset, start);
    }

    #[test]
    fn test_double_click_inside_pad_ignored() {
        let mut ctrl = standalone();
        assert_eq!(ctrl.double_click(INSIDE), None);
        assert_eq!(ctrl.placement().preset, VisualPreset::Blue);
    }

    #[test]
    fn test_double_click_mirrors_host_immediately() {
        let host = HostParams::default();
        let (mut ctrl, _) = editor(host.clone());
        ctrl.double_click(OUTSIDE);
        assert_eq!(host.preset_index(), 1);
    }

    // === Host params ===

    #[test]
    fn test_editor_reads_initial_state_from_host() {
        let host = HostParams::new(Placement::new(0.1, 0.8, VisualPreset::Red));
        let (ctrl, _) = editor(host);
        assert_eq!(ctrl.placement().position(), Point::new(0.1, 0.8));
        assert_eq!(ctrl.placement().preset, VisualPreset::Red);
    }

    #[test]
    fn test_param_timer_mirrors_placement() {
        let host = HostParams::default();
        let (mut ctrl, _) = editor(host.clone());
        ctrl.set_position(0.3, 0.4);
        assert_eq!(host.x(), 0.5);

        ctrl.tick(Instant::now() + ms(100));
        assert_eq!(host.x(), 0.3);
        assert_eq!(host.y(), 0.4);
    }

    // === Menu routing ===

    #[test]
    fn test_favorite_toggle_keeps_menu_open_and_rebuilds() {
        let mut ctrl = standalone();
        open_menu(&mut ctrl);

        // preset_1 is not a favorite
        ctrl.handle_menu_code(200);

        let Overlay::Menu(menu) = ctrl.overlay() else {
            panic!("menu should still be open");
        };
        assert!(menu.entries()[0].is_favorite);
        assert!(ctrl.presets().get_at(0).unwrap().is_favorite);
    }

    #[test]
    fn test_cancel_closes_menu() {
        let mut ctrl = standalone();
        open_menu(&mut ctrl);
        ctrl.cancel_overlay();
        assert!(ctrl.overlay().kind().is_none());
    }

    #[test]
    fn test_load_by_menu_code_confirms() {
        let mut ctrl = standalone();
        open_menu(&mut ctrl);
        ctrl.handle_menu_code(102);

        match ctrl.overlay() {
            Overlay::Confirmation(c) => {
                assert_eq!(c.title, "Preset Loaded");
                assert_eq!(c.message, "Loaded \"preset_3\"");
            }
            other => panic!("expected confirmation, got {:?}", other),
        }
        ctrl.dismiss_confirmation();
        assert!(ctrl.overlay().kind().is_none());
    }

    // === Save flow ===

    #[test]
    fn test_save_with_empty_name_changes_nothing() {
        let mut ctrl = standalone();
        let before = ctrl.presets().len();
        open_menu(&mut ctrl);
        ctrl.handle_menu_result(MenuResult::Save);
        assert_eq!(ctrl.overlay().kind(), Some(OverlayKind::SaveDialog));

        ctrl.submit_save_name(DialogResult::from_input(""));
        assert_eq!(ctrl.presets().len(), before);
        assert!(ctrl.overlay().kind().is_none());
    }

    #[test]
    fn test_save_with_name_appends_one_record() {
        let mut ctrl = standalone();
        let before = ctrl.presets().len();
        open_menu(&mut ctrl);
        ctrl.handle_menu_result(MenuResult::Save);

        if let Some(prompt) = ctrl.save_prompt_mut() {
            prompt.name = "my-preset".to_string();
        }
        let input = match ctrl.overlay() {
            Overlay::SaveDialog(prompt) => DialogResult::from_input(&prompt.name),
            _ => DialogResult::Cancelled,
        };
        ctrl.submit_save_name(input);

        assert_eq!(ctrl.presets().len(), before + 1);
        let last = ctrl.presets().get_at(before).unwrap();
        assert_eq!(last.name, "my-preset");
        assert!(!last.is_favorite);

        match ctrl.overlay() {
            Overlay::Confirmation(c) => assert_eq!(c.message, "\"my-preset\" saved successfully!"),
            other => panic!("expected confirmation, got {:?}", other),
        }
    }

    #[test]
    fn test_saved_record_restores_placement() {
        let mut ctrl = standalone();
        ctrl.set_position(0.2, 0.7);
        ctrl.set_preset(VisualPreset::Red);
        ctrl.save_preset("spot");
        ctrl.dismiss_confirmation();

        ctrl.set_position(0.9, 0.9);
        ctrl.set_preset(VisualPreset::Blue);
        assert!(ctrl.load_preset_named("spot"));

        assert_eq!(ctrl.placement().position(), Point::new(0.2, 0.7));
        assert_eq!(ctrl.placement().preset, VisualPreset::Red);
    }

    #[test]
    fn test_duplicate_names_both_persist() {
        let mut ctrl = standalone();
        let before = ctrl.presets().len();
        ctrl.save_preset("dup");
        ctrl.dismiss_confirmation();
        ctrl.save_preset("dup");
        ctrl.dismiss_confirmation();
        assert_eq!(ctrl.presets().len(), before + 2);
        assert!(!ctrl.load_preset_named("missing"));
    }

    // === Editor file flow ===

    #[test]
    fn test_editor_save_requests_file_dialog() {
        let (mut ctrl, folder) = editor(HostParams::default());
        ctrl.show_preset_menu();
        ctrl.handle_menu_result(MenuResult::Save);

        assert!(ctrl.overlay().kind().is_none());
        assert_eq!(ctrl.take_requests(), vec![DialogRequest::SaveFile { folder: folder.clone() }]);
        assert!(ctrl.take_requests().is_empty());
        let _ = std::fs::remove_dir_all(&folder);
    }

    #[test]
    fn test_editor_load_requests_open_dialog() {
        let (mut ctrl, folder) = editor(HostParams::default());
        open_menu(&mut ctrl);
        ctrl.handle_menu_code(2);

        assert!(ctrl.overlay().kind().is_none());
        assert_eq!(ctrl.take_requests(), vec![DialogRequest::OpenFile { folder: folder.clone() }]);
        let _ = std::fs::remove_dir_all(&folder);
    }

    #[test]
    fn test_standalone_code_2_is_a_dismissal() {
        let mut ctrl = standalone();
        open_menu(&mut ctrl);
        ctrl.handle_menu_code(2);

        assert!(ctrl.overlay().kind().is_none());
        assert!(ctrl.take_requests().is_empty());
        assert_eq!(ctrl.hold_progress(), 0.0);
    }

    #[test]
    fn test_editor_menu_hides_saved_list() {
        let (mut ctrl, _) = editor(HostParams::default());
        open_menu(&mut ctrl);
        let sections = ctrl.menu_sections();
        assert!(!sections.saved_list);
        assert!(sections.file_load);

        let sections = standalone().menu_sections();
        assert!(sections.saved_list);
        assert!(!sections.file_load);
    }

    #[test]
    fn test_editor_file_roundtrip_applies_to_host() {
        let host = HostParams::default();
        let (mut ctrl, folder) = editor(host.clone());
        std::fs::create_dir_all(&folder).unwrap();

        ctrl.set_position(0.25, 0.75);
        ctrl.set_preset(VisualPreset::Red);
        ctrl.on_dialog_response(DialogResponse::SaveFileChosen(Some(folder.join("spot"))));

        let saved = folder.join("spot.json");
        assert!(saved.exists());
        assert!(matches!(
            ctrl.take_requests().as_slice(),
            [DialogRequest::Message { title, .. }] if title == "Preset Saved"
        ));

        ctrl.set_position(0.0, 0.0);
        ctrl.set_preset(VisualPreset::Black);
        ctrl.on_dialog_response(DialogResponse::OpenFileChosen(Some(saved)));

        assert_eq!(ctrl.placement().position(), Point::new(0.25, 0.75));
        assert_eq!(ctrl.placement().preset, VisualPreset::Red);
        assert_eq!(host.x(), 0.25);
        assert_eq!(host.y(), 0.75);
        assert_eq!(host.preset_index(), 1);

        std::fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn test_malformed_file_is_silently_ignored() {
        let host = HostParams::default();
        let (mut ctrl, folder) = editor(host.clone());
        std::fs::create_dir_all(&folder).unwrap();
        let bad = folder.join("bad.json");
        std::fs::write(&bad, "[1, 2, 3]").unwrap();

        ctrl.set_position(0.4, 0.4);
        let before = *ctrl.placement();
        ctrl.on_dialog_response(DialogResponse::OpenFileChosen(Some(bad)));

        assert_eq!(*ctrl.placement(), before);
        assert!(ctrl.take_requests().is_empty());
        assert!(ctrl.overlay().kind().is_none());

        std::fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn test_cancelled_file_dialog_is_noop() {
        let (mut ctrl, _) = editor(HostParams::default());
        ctrl.on_dialog_response(DialogResponse::SaveFileChosen(None));
        ctrl.on_dialog_response(DialogResponse::OpenFileChosen(None));
        assert!(ctrl.take_requests().is_empty());
        assert!(ctrl.overlay().kind().is_none());
    }

    // === Layout ===

    #[test]
    fn test_set_layout_moves_pad() {
        let (mut ctrl, _) = editor(HostParams::default());
        ctrl.set_layout(Size::new(500.0, 500.0));
        assert_eq!(ctrl.pad_bounds(), Bounds::new(26.0, 26.0, 448.0, 448.0));
    }
}
