use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Settings file name inside the platform config directory
const CONFIG_FILE: &str = "settings.json";

/// Errors from reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Platform directories for settings, logs and the fallback presets folder
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "XYPad-Dev", "xypad")
}

// ========================================================================
// GEOMETRY
// ========================================================================
//    Our own small geometry types so the controller never depends on egui
//    (the GUI converts at the edge, same as Color32 below)

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds at the origin covering `size`
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// A rectangle of `size` sharing this rectangle's centre
    pub fn with_size_keeping_centre(&self, size: Size) -> Self {
        Self::new(
            self.x + (self.width - size.width) / 2.0,
            self.y + (self.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }
}

// ========================================================================
// PAD STATE
// ========================================================================

/// Visual theme of the pad. The discriminant is the host parameter value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualPreset {
    #[default]
    Blue = 0,
    Red = 1,
    Black = 2,
}

impl VisualPreset {
    pub const COUNT: usize = 3;

    pub const ALL: [VisualPreset; Self::COUNT] =
        [VisualPreset::Blue, VisualPreset::Red, VisualPreset::Black];

    pub fn index(self) -> usize {
        self as usize
    }

    /// `None` outside 0..=2
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Cycle forward with wraparound (Blue -> Red -> Black -> Blue)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            VisualPreset::Blue => "Blue",
            VisualPreset::Red => "Red",
            VisualPreset::Black => "Black",
        }
    }

    /// Colors used to paint the window and pad for this theme
    pub fn palette(self) -> PresetPalette {
        match self {
            VisualPreset::Blue => PresetPalette {
                background: Color32::WHITE,
                border: Color32::BLACK,
                pad_fill: Color32::from_rgb(0, 122, 255),
                marker: Color32::WHITE,
                shadow: Color32::from_rgba(0, 0, 0, 0x14), // Subtle dark on white
            },
            VisualPreset::Red => PresetPalette {
                background: Color32::from_rgb(255, 0, 0),
                border: Color32::BLACK,
                pad_fill: Color32::from_rgb(255, 59, 48),
                marker: Color32::WHITE,
                shadow: Color32::from_rgba(0, 0, 0, 0x30),
            },
            VisualPreset::Black => PresetPalette {
                // Very dark gray instead of pure black
                background: Color32::from_rgb(10, 10, 10),
                border: Color32::WHITE,
                pad_fill: Color32::from_rgb(28, 28, 30),
                marker: Color32::WHITE,
                shadow: Color32::from_rgba(0, 0, 0, 0x40),
            },
        }
    }
}

/// Theme colors for one VisualPreset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetPalette {
    pub background: Color32,
    pub border: Color32,
    pub pad_fill: Color32,
    pub marker: Color32,
    pub shadow: Color32,
}

/// Current pad position and theme. Position is normalized to [0, 1] on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    position: Point,
    pub preset: VisualPreset,
}

impl Placement {
    pub fn new(x: f32, y: f32, preset: VisualPreset) -> Self {
        let mut placement = Self { position: Point::default(), preset };
        placement.set_position(x, y);
        placement
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Clamps both axes into [0, 1]. NaN lands on 0.
    pub fn set_position(&mut self, x: f32, y: f32) {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        self.position = Point::new(clamp(x), clamp(y));
    }
}

// ========================================================================
// APPLICATION CONFIGURATION
// ========================================================================

/// Which front-end the app behaves as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// In-memory preset list, in-app name prompt and confirmations
    #[default]
    Standalone,
    /// Animated hold ring, preset files, host parameter mirroring
    PluginEditor,
}

/// Application configuration (user settings)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // === Behaviour ===
    pub variant: Variant,

    /// How long the pointer must be held outside the pad (milliseconds)
    pub hold_threshold_ms: u64,

    /// Hold animation tick in the plugin editor (milliseconds)
    pub editor_tick_ms: u64,

    /// How often pad state is mirrored into host parameters (Hz)
    pub param_sync_hz: u32,

    // === Window Settings ===
    /// Inner window size; `None` uses the variant's default
    pub window_size: Option<[f32; 2]>,
    pub window_position: Option<[f32; 2]>,

    /// Pad edge length in the standalone window (pixels)
    pub standalone_pad_size: f32,

    /// Clickable margin around the pad in the plugin editor (pixels)
    pub editor_pad_padding: f32,

    // === Files ===
    /// Overrides `<Documents>/XYControl Presets`
    pub presets_folder: Option<PathBuf>,

    /// Enable debug-level logging (RUST_LOG is honoured when on)
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standalone,
            hold_threshold_ms: 3000,
            editor_tick_ms: 16,
            param_sync_hz: 30,
            window_size: None,
            window_position: None,
            standalone_pad_size: 500.0,
            editor_pad_padding: 26.0,
            presets_folder: None,
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn editor_tick(&self) -> Duration {
        Duration::from_millis(self.editor_tick_ms.max(1))
    }

    pub fn param_sync_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.param_sync_hz.max(1)))
    }

    /// Window size, falling back to 700x700 (standalone) or 368x368 (editor)
    pub fn window_size(&self) -> [f32; 2] {
        self.window_size.unwrap_or(match self.variant {
            Variant::Standalone => [700.0, 700.0],
            Variant::PluginEditor => [368.0, 368.0],
        })
    }

    /// Where the pad sits inside a surface of the given size
    pub fn pad_bounds(&self, surface: Size) -> Bounds {
        let outer = Bounds::from_size(surface);
        let edge = match self.variant {
            Variant::Standalone => self.standalone_pad_size,
            Variant::PluginEditor => (surface.width - 2.0 * self.editor_pad_padding).max(0.0),
        };
        outer.with_size_keeping_centre(Size::new(edge, edge))
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Settings from the config dir. `Ok(None)` when there is no file yet.
    ///
    /// Nothing is logged here: this runs before the subscriber exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::config_path().and_then(|path| Self::load_from(&path))
    }

    /// `Ok(None)` when the file does not exist
    pub fn load_from(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Persist settings; failures are logged, never fatal
    pub fn save(&self) {
        match Self::config_path().and_then(|path| self.save_to(&path)) {
            Ok(()) => tracing::debug!("[Config] Settings saved"),
            Err(e) => tracing::error!("[Config] Failed to save settings: {}", e),
        }
    }
}

/// Simple RGBA Color (compatible with egui)
///
/// We define our own to avoid depending on egui in the controller
/// (can convert to egui::Color32 in GUI Code)
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);

    /// Hold ring blue
    pub const ACCENT: Self = Self::from_rgb(0, 122, 255);

    /// Multiply color by opacity (for transparency)
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: (self.a as f32 * opacity.clamp(0.0, 1.0)) as u8,
        }
    }
}
