use std::fmt;
use std::mem;

use crate::presets::{PresetId, PresetList};
use crate::shared_state::{Bounds, Size, Variant};

// === Menu result codes ===
pub const CODE_SAVE: i32 = 1;
pub const CODE_LOAD_FROM_FILE: i32 = 2;
pub const CODE_LOAD_BASE: i32 = 100;
pub const CODE_FAVORITE_BASE: i32 = 200;

/// Width of each index band; entries past this are only reachable by typed results
pub const CODE_BAND: usize = 100;

// === Content metrics (pixels) ===
const CONTENT_WIDTH: f32 = 320.0;
const MENU_ROW_HEIGHT: f32 = 32.0;
const MENU_CHROME_HEIGHT: f32 = 112.0;
const MENU_VISIBLE_ROWS: usize = 8;
const SAVE_DIALOG_HEIGHT: f32 = 160.0;
const CONFIRMATION_HEIGHT: f32 = 140.0;

/// What the user picked in the preset menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuResult {
    Cancelled,
    Save,
    LoadFromFile,
    Load(PresetId),
    ToggleFavorite(PresetId),
}

/// What the save-name prompt returned
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogResult {
    Cancelled,
    Name(String),
}

impl DialogResult {
    /// Blank input counts as a cancel
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            DialogResult::Cancelled
        } else {
            DialogResult::Name(trimmed.to_string())
        }
    }
}

/// One row of the preset menu
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    pub id: PresetId,
    pub name: String,
    pub is_favorite: bool,
}

/// Snapshot of the preset list that the menu displays
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMenu {
    entries: Vec<MenuEntry>,
    built_from_version: u64,
}

impl PresetMenu {
    pub fn build(presets: &PresetList) -> Self {
        Self {
            entries: presets
                .iter()
                .map(|r| MenuEntry {
                    id: r.id,
                    name: r.name.clone(),
                    is_favorite: r.is_favorite,
                })
                .collect(),
            built_from_version: presets.version(),
        }
    }

    /// Refresh in place (after a favorite toggle) without closing the menu
    pub fn rebuild(&mut self, presets: &PresetList) {
        *self = Self::build(presets);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_stale(&self, presets: &PresetList) -> bool {
        self.built_from_version != presets.version()
    }

    /// Translate an integer menu code into a typed result.
    ///
    /// Index bands resolve through this snapshot to stable ids, so the list
    /// changing after the menu was built cannot redirect the action to a
    /// different record.
    pub fn decode(&self, code: i32) -> MenuResult {
        let in_band = |base: i32| -> Option<PresetId> {
            let offset = usize::try_from(code.checked_sub(base)?).ok()?;
            if offset >= CODE_BAND {
                return None;
            }
            self.entries.get(offset).map(|e| e.id)
        };

        match code {
            CODE_SAVE => MenuResult::Save,
            CODE_LOAD_FROM_FILE => MenuResult::LoadFromFile,
            _ => {
                if let Some(id) = in_band(CODE_FAVORITE_BASE) {
                    MenuResult::ToggleFavorite(id)
                } else if let Some(id) = in_band(CODE_LOAD_BASE) {
                    MenuResult::Load(id)
                } else {
                    MenuResult::Cancelled
                }
            }
        }
    }

    fn content_size(&self) -> Size {
        let rows = self.entries.len().min(MENU_VISIBLE_ROWS) as f32;
        Size::new(CONTENT_WIDTH, MENU_CHROME_HEIGHT + rows * MENU_ROW_HEIGHT)
    }
}

/// Text buffer for the save-name prompt
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavePrompt {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The single modal experience on screen (dim layer + one centered view)
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Menu(PresetMenu),
    SaveDialog(SavePrompt),
    Confirmation(Confirmation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    Menu,
    SaveDialog,
    Confirmation,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverlayKind::Menu => "preset menu",
            OverlayKind::SaveDialog => "save dialog",
            OverlayKind::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

impl Overlay {
    pub fn kind(&self) -> Option<OverlayKind> {
        match self {
            Overlay::None => None,
            Overlay::Menu(_) => Some(OverlayKind::Menu),
            Overlay::SaveDialog(_) => Some(OverlayKind::SaveDialog),
            Overlay::Confirmation(_) => Some(OverlayKind::Confirmation),
        }
    }

    pub fn content_size(&self) -> Option<Size> {
        match self {
            Overlay::None => None,
            Overlay::Menu(menu) => Some(menu.content_size()),
            Overlay::SaveDialog(_) => Some(Size::new(CONTENT_WIDTH, SAVE_DIALOG_HEIGHT)),
            Overlay::Confirmation(_) => Some(Size::new(CONTENT_WIDTH, CONFIRMATION_HEIGHT)),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OverlayError {
    #[error("cannot open an overlay while the {0} is showing")]
    AlreadyOpen(OverlayKind),
}

/// Which parts of the preset menu a variant offers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuSections {
    /// Saved in-memory records with load and favorite buttons
    pub saved_list: bool,
    /// "Load Preset File…" through the native chooser
    pub file_load: bool,
}

impl MenuSections {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Standalone => Self {
                saved_list: true,
                file_load: false,
            },
            // Editor saves go to files only, so its list never fills
            Variant::PluginEditor => Self {
                saved_list: false,
                file_load: true,
            },
        }
    }
}

/// Where the dim layer and the content view go
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    pub dim: Bounds,
    pub content: Bounds,
}

/// Owns the one active overlay. `open` and `close` are the only mutators of
/// which overlay is showing.
#[derive(Debug, Default)]
pub struct OverlayManager {
    current: Overlay,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Overlay {
        &self.current
    }

    pub fn kind(&self) -> Option<OverlayKind> {
        self.current.kind()
    }

    pub fn is_open(&self) -> bool {
        self.kind().is_some()
    }

    /// Show `overlay`. Refused while another overlay is up.
    pub fn open(&mut self, overlay: Overlay) -> Result<(), OverlayError> {
        if let Some(kind) = self.current.kind() {
            return Err(OverlayError::AlreadyOpen(kind));
        }
        if let Some(kind) = overlay.kind() {
            tracing::debug!("[Overlay] Opening {}", kind);
        }
        self.current = overlay;
        Ok(())
    }

    /// Tear down whatever is showing and hand it back. No-op when closed.
    pub fn close(&mut self) -> Overlay {
        let previous = mem::take(&mut self.current);
        if let Some(kind) = previous.kind() {
            tracing::debug!("[Overlay] Closed {}", kind);
        }
        previous
    }

    pub fn menu_mut(&mut self) -> Option<&mut PresetMenu> {
        match &mut self.current {
            Overlay::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub fn save_prompt_mut(&mut self) -> Option<&mut SavePrompt> {
        match &mut self.current {
            Overlay::SaveDialog(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Dim layer over the whole surface, content centered by its own size
    pub fn layout(&self, surface: Size) -> Option<OverlayLayout> {
        let content = self.current.content_size()?;
        let dim = Bounds::from_size(surface);
        Some(OverlayLayout {
            dim,
            content: Bounds::new(
                (surface.width - content.width) / 2.0,
                (surface.height - content.height) / 2.0,
                content.width,
                content.height,
            ),
        })
    }
}
