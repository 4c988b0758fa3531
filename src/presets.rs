/// Stable identity of a saved preset. Never reused within one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresetId(u64);

/// A named, saved pad position. `payload` holds the serialized placement
/// (see `preset_file`), or is empty for records that carry no data.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetRecord {
    pub id: PresetId,
    pub name: String,
    pub payload: String,
    pub is_favorite: bool,
}

/// Ordered list of saved presets, oldest first.
///
/// Every mutation bumps `version`, so a menu built from a snapshot can tell
/// whether it is stale.
#[derive(Clone, Debug, Default)]
pub struct PresetList {
    records: Vec<PresetRecord>,
    next_id: u64,
    version: u64,
}

impl PresetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresetRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: PresetId) -> Option<&PresetRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&PresetRecord> {
        self.records.get(index)
    }

    /// First record with this name in list order. Names are not unique.
    pub fn find_by_name(&self, name: &str) -> Option<&PresetRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Append a new, non-favorite record. Duplicate names are allowed.
    pub fn push(&mut self, name: impl Into<String>, payload: impl Into<String>) -> PresetId {
        let id = PresetId(self.next_id);
        self.next_id += 1;
        self.records.push(PresetRecord {
            id,
            name: name.into(),
            payload: payload.into(),
            is_favorite: false,
        });
        self.version += 1;
        id
    }

    /// Flip the favorite flag. Returns false (and changes nothing) for unknown ids.
    pub fn toggle_favorite(&mut self, id: PresetId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.is_favorite = !record.is_favorite;
                self.version += 1;
                tracing::debug!(
                    "[Presets] '{}' favorite -> {}",
                    record.name,
                    record.is_favorite
                );
                true
            }
            None => false,
        }
    }

    /// Bounds-checked index variant of `toggle_favorite`
    pub fn toggle_favorite_at(&mut self, index: usize) -> bool {
        match self.records.get(index).map(|r| r.id) {
            Some(id) => self.toggle_favorite(id),
            None => false,
        }
    }
}

/// Returns the demonstration list the standalone app starts with
pub fn built_in_presets() -> PresetList {
    // Favorites sprinkled through the list so the menu has something to show
    const FAVORITES: [usize; 5] = [3, 5, 10, 15, 20];

    let mut list = PresetList::new();
    for n in 1..=20 {
        let id = list.push(format!("preset_{}", n), "");
        if FAVORITES.contains(&n) {
            list.toggle_favorite(id);
        }
    }
    list
}
