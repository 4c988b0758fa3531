use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::shared_state::{self, Placement, VisualPreset};

/// Folder name created under the user's Documents directory
pub const PRESETS_FOLDER_NAME: &str = "XYControl Presets";

pub const PRESET_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum PresetFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preset data is not a JSON object")]
    NotAnObject,

    #[error("preset index {0} is out of range")]
    InvalidPreset(i64),
}

/// On-disk preset: `{ "x": f32, "y": f32, "preset": 0..=2 }`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PresetFile {
    pub x: f32,
    pub y: f32,
    pub preset: u8,
}

impl PresetFile {
    pub fn from_placement(placement: &Placement) -> Self {
        let pos = placement.position();
        Self {
            x: pos.x,
            y: pos.y,
            preset: placement.preset.index() as u8,
        }
    }

    pub fn to_placement(&self) -> Placement {
        let preset = VisualPreset::from_index(i64::from(self.preset)).unwrap_or_default();
        Placement::new(self.x, self.y, preset)
    }

    /// Parse preset JSON.
    ///
    /// Only the top-level shape is checked: anything that is not an object is
    /// rejected. Missing or non-numeric `x`/`y` read as 0, as does a missing
    /// `preset`; a `preset` outside 0..=2 is rejected.
    pub fn parse(text: &str) -> Result<Self, PresetFileError> {
        let value: Value = serde_json::from_str(text)?;
        let obj = value.as_object().ok_or(PresetFileError::NotAnObject)?;

        let number = |key: &str| obj.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        let preset_raw = obj
            .get("preset")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0);
        let preset = VisualPreset::from_index(preset_raw)
            .ok_or(PresetFileError::InvalidPreset(preset_raw))?;

        Ok(Self {
            x: number("x") as f32,
            y: number("y") as f32,
            preset: preset.index() as u8,
        })
    }

    pub fn to_json(&self) -> Result<String, PresetFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, PresetFileError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Replaces the whole file
    pub fn write(&self, path: &Path) -> Result<(), PresetFileError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Force a `.json` extension onto a user-chosen file name
pub fn ensure_json_extension(path: PathBuf) -> PathBuf {
    let has_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(PRESET_EXTENSION))
        .unwrap_or(false);
    if has_json {
        path
    } else {
        path.with_extension(PRESET_EXTENSION)
    }
}

/// `<Documents>/XYControl Presets`, created on demand.
///
/// Falls back to the app's data dir, then the current directory, when the
/// platform has no Documents folder.
pub fn presets_folder(override_dir: Option<&Path>) -> PathBuf {
    let folder = override_dir
        .map(Path::to_path_buf)
        .or_else(|| {
            directories::UserDirs::new()
                .and_then(|dirs| dirs.document_dir().map(|d| d.join(PRESETS_FOLDER_NAME)))
        })
        .or_else(|| shared_state::project_dirs().map(|dirs| dirs.data_dir().join("presets")))
        .unwrap_or_else(|| PathBuf::from(PRESETS_FOLDER_NAME));

    if !folder.exists() {
        match fs::create_dir_all(&folder) {
            Ok(()) => tracing::info!("[Presets] Created presets folder {}", folder.display()),
            Err(e) => tracing::warn!(
                "[Presets] Could not create presets folder {}: {}",
                folder.display(),
                e
            ),
        }
    }
    folder
}
