//! Voices shipped with the studio.

use super::{Gender, VoiceProfile};
use once_cell::sync::Lazy;

pub const DEFAULT_VOICE_ID: &str = "gentleman_deep";

/// Built-in presets, in display order. Backed by the server's multi-speaker English model.
pub static BUILTIN_PRESETS: Lazy<Vec<VoiceProfile>> = Lazy::new(|| {
    use Gender::*;
    [
        ("gentleman_deep", "Gentleman Deep", "Deep male narration voice, perfect for documentaries.", "Male", Male),
        ("gentleman_soft", "Gentleman Soft", "Soft, warm male tone for explainers.", "Male", Male),
        ("boy_casual", "Boy Casual", "Young casual male voice, YouTube vibe.", "Casual", Male),
        ("boy_energy", "Boy Energy", "High-energy male for hooks and intros.", "Hype", Male),
        ("girl_warm", "Girl Warm", "Warm female voice, soft storytelling.", "Female", Female),
        ("girl_story", "Girl Storyteller", "Perfect for long story narration.", "Story", Female),
        ("girl_crisp", "Girl Crisp", "Crisp, clear female announcer style.", "Promo", Female),
        ("girl_friendly", "Girl Friendly", "Friendly female voice for tutorials.", "Friendly", Female),
        ("radio_host", "Radio Host", "FM radio host tone.", "Radio", Male),
        ("movie_trailer", "Movie Trailer", "Dramatic trailer-style narration.", "Trailer", Male),
        ("soft_whisper", "Soft Whisper", "Soft, whisper-like ASMR style.", "ASMR", Female),
        ("news_anchor", "News Anchor", "Serious news anchor tone.", "News", Male),
    ]
    .into_iter()
    .map(|(id, label, description, tag, gender)| {
        VoiceProfile::preset(id, label, description, tag, gender)
    })
    .collect()
});

/// Custom voices the server is provisioned with. Ids must match its voice store.
pub static SEEDED_CUSTOM_VOICES: Lazy<Vec<VoiceProfile>> = Lazy::new(|| {
    use Gender::*;
    [
        ("custom_deep_story_female", "Custom: Deep Story Female", "Storytelling female voice from your sample.", Female),
        ("custom_deep_story_male", "Custom: Deep Story Male", "Storytelling male voice from your sample.", Male),
        ("custom_jesus_voice", "Custom: Jesus Style Voice", "Voice based on jesus.mp3 sample.", Male),
    ]
    .into_iter()
    .map(|(id, label, description, gender)| {
        VoiceProfile::custom(id, label, description, gender)
    })
    .collect()
});
