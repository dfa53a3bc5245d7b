//! Voice catalog: immutable built-in presets followed by an append-only list
//! of custom voices, plus the active selection.
//!
//! Ids are unique across both lists at all times. The catalog is shared by
//! reference (`Arc<VoiceCatalog>`) between the synthesis and clone
//! controllers; all methods take `&self`.

mod presets;

pub use presets::{BUILTIN_PRESETS, DEFAULT_VOICE_ID, SEEDED_CUSTOM_VOICES};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unset,
}

/// One selectable voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Free-text category shown next to the voice.
    pub tag: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub is_custom: bool,
}

impl VoiceProfile {
    pub fn preset(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        tag: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            tag: tag.into(),
            gender,
            is_custom: false,
        }
    }

    pub fn custom(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            tag: "Custom".to_string(),
            gender,
            is_custom: true,
        }
    }

    /// Profile for a voice produced by the cloning endpoint.
    ///
    /// The label uses the server-assigned name when present, else the id.
    /// Gender is not inferred from the sample.
    pub fn cloned(voice_id: impl Into<String>, name: Option<&str>) -> Self {
        let voice_id = voice_id.into();
        let display = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(voice_id.as_str())
            .to_string();
        Self::custom(
            voice_id,
            format!("Custom: {}", display),
            "Cloned custom voice from your upload.",
            Gender::Other,
        )
    }

    /// Badge shown in voice pickers.
    pub fn kind_label(&self) -> &'static str {
        if self.is_custom {
            "Custom"
        } else {
            "Preset"
        }
    }
}

#[derive(Debug)]
struct CatalogState {
    custom: Vec<VoiceProfile>,
    selected: String,
}

#[derive(Debug)]
pub struct VoiceCatalog {
    builtin: Vec<VoiceProfile>,
    state: RwLock<CatalogState>,
}

impl VoiceCatalog {
    /// Build a catalog from a built-in list and pre-seeded custom voices.
    ///
    /// Fails with [`Error::DuplicateVoiceId`] if any id repeats, and with
    /// [`Error::UnknownVoice`] if `selected` is not one of the entries.
    pub fn new(
        builtin: Vec<VoiceProfile>,
        seeded: Vec<VoiceProfile>,
        selected: impl Into<String>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for profile in builtin.iter().chain(seeded.iter()) {
            if !seen.insert(profile.id.as_str()) {
                return Err(Error::duplicate_voice(&profile.id));
            }
        }
        let selected = selected.into();
        if !seen.contains(selected.as_str()) {
            return Err(Error::unknown_voice(selected));
        }
        Ok(Self {
            builtin,
            state: RwLock::new(CatalogState {
                custom: seeded,
                selected,
            }),
        })
    }

    /// The studio's stock catalog: built-in presets, seeded custom voices,
    /// `gentleman_deep` selected.
    pub fn standard() -> Self {
        Self {
            builtin: BUILTIN_PRESETS.clone(),
            state: RwLock::new(CatalogState {
                custom: SEEDED_CUSTOM_VOICES.clone(),
                selected: DEFAULT_VOICE_ID.to_string(),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Built-ins first, then custom voices in append order.
    pub fn list_all(&self) -> Vec<VoiceProfile> {
        let state = self.read();
        self.builtin
            .iter()
            .chain(state.custom.iter())
            .cloned()
            .collect()
    }

    pub fn builtin(&self) -> &[VoiceProfile] {
        &self.builtin
    }

    pub fn custom(&self) -> Vec<VoiceProfile> {
        self.read().custom.clone()
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.read().custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_id(&self, id: &str) -> Option<VoiceProfile> {
        if let Some(profile) = self.builtin.iter().find(|v| v.id == id) {
            return Some(profile.clone());
        }
        self.read().custom.iter().find(|v| v.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Append a custom voice. The catalog is left untouched on error.
    pub fn register_custom(&self, profile: VoiceProfile) -> Result<()> {
        let mut state = self.write();
        if Self::id_taken(&self.builtin, &state.custom, &profile.id) {
            return Err(Error::duplicate_voice(profile.id));
        }
        info!(voice_id = %profile.id, label = %profile.label, "custom voice registered");
        state.custom.push(profile);
        Ok(())
    }

    /// Append every profile whose id is not already present; returns how many were added.
    ///
    /// Used to pick up custom voices that exist server-side but not in this session.
    pub fn merge_custom(&self, profiles: impl IntoIterator<Item = VoiceProfile>) -> usize {
        let mut state = self.write();
        let mut added = 0;
        for profile in profiles {
            if Self::id_taken(&self.builtin, &state.custom, &profile.id) {
                continue;
            }
            state.custom.push(profile);
            added += 1;
        }
        if added > 0 {
            info!(added, "merged remote custom voices");
        }
        added
    }

    fn id_taken(builtin: &[VoiceProfile], custom: &[VoiceProfile], id: &str) -> bool {
        builtin.iter().chain(custom.iter()).any(|v| v.id == id)
    }

    /// Make `id` the active selection.
    pub fn select(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if !Self::id_taken(&self.builtin, &state.custom, id) {
            return Err(Error::unknown_voice(id));
        }
        state.selected = id.to_string();
        Ok(())
    }

    pub fn selected(&self) -> String {
        self.read().selected.clone()
    }

    pub fn selected_profile(&self) -> Option<VoiceProfile> {
        let selected = self.selected();
        self.find_by_id(&selected)
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
