use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::shared_state::{Placement, VisualPreset};

/// Lock-free f32 slot (bits stored in an AtomicU32)
#[derive(Debug)]
struct FloatSlot(AtomicU32);

impl FloatSlot {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

#[derive(Debug)]
struct Slots {
    x: FloatSlot,
    y: FloatSlot,
    preset: AtomicU32,
}

/// Host-facing parameter slots (`x`, `y`, `preset`).
///
/// Cloning shares the same slots, so the editor and the audio side can each
/// hold a handle. Only the plugin-editor variant creates one.
#[derive(Clone, Debug)]
pub struct HostParams {
    slots: Arc<Slots>,
}

impl HostParams {
    pub fn new(initial: Placement) -> Self {
        let pos = initial.position();
        Self {
            slots: Arc::new(Slots {
                x: FloatSlot::new(pos.x),
                y: FloatSlot::new(pos.y),
                preset: AtomicU32::new(initial.preset.index() as u32),
            }),
        }
    }

    pub fn x(&self) -> f32 {
        self.slots.x.get()
    }

    pub fn y(&self) -> f32 {
        self.slots.y.get()
    }

    pub fn preset_index(&self) -> u32 {
        self.slots.preset.load(Ordering::Relaxed)
    }

    pub fn set_preset(&self, preset: VisualPreset) {
        self.slots.preset.store(preset.index() as u32, Ordering::Relaxed);
    }

    /// Mirror pad state into all three slots
    pub fn write_placement(&self, placement: &Placement) {
        let pos = placement.position();
        self.slots.x.set(pos.x);
        self.slots.y.set(pos.y);
        self.set_preset(placement.preset);
    }

    /// Current slot values as a Placement (out-of-range preset reads as Blue)
    pub fn read_placement(&self) -> Placement {
        let preset = VisualPreset::from_index(i64::from(self.preset_index())).unwrap_or_default();
        Placement::new(self.x(), self.y(), preset)
    }
}

impl Default for HostParams {
    fn default() -> Self {
        Self::new(Placement::new(0.5, 0.5, VisualPreset::Blue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let params = HostParams::default();
        let audio_side = params.clone();

        params.write_placement(&Placement::new(0.2, 0.9, VisualPreset::Black));

        assert_eq!(audio_side.x(), 0.2);
        assert_eq!(audio_side.y(), 0.9);
        assert_eq!(audio_side.preset_index(), 2);
    }

    #[test]
    fn test_read_placement_roundtrip() {
        let placement = Placement::new(0.4, 0.6, VisualPreset::Red);
        let params = HostParams::new(placement);
        assert_eq!(params.read_placement(), placement);
    }

    #[test]
    fn test_bad_preset_slot_reads_as_blue() {
        let params = HostParams::default();
        params.slots.preset.store(9, Ordering::Relaxed);
        assert_eq!(params.read_placement().preset, VisualPreset::Blue);
    }
}
