//! Speak Example
//!
//! Synthesizes a line of text against a running backend and saves the audio.
//!
//! ```bash
//! VOICE_STUDIO_API_URL=http://localhost:8000 cargo run --example speak -- girl_story "Once upon a time"
//! ```
//!
//! Optional third argument: a sample file to clone first. The cloned voice is
//! then used instead of the one named on the command line.

use anyhow::Context;
use std::time::Duration;
use voice_studio::{Language, VoiceStudio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_studio=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let voice_id = args.next().unwrap_or_else(|| "gentleman_deep".to_string());
    let text = args
        .next()
        .unwrap_or_else(|| "Hello from the voice studio.".to_string());
    let sample = args.next();

    let studio = VoiceStudio::from_env().context("building studio session")?;
    let health = studio.health().await.context("backend not reachable")?;
    println!("backend: {}", health.status);

    match studio.refresh_voices().await {
        Ok(added) if added > 0 => println!("merged {} custom voices from the server", added),
        Ok(_) => {}
        Err(e) => eprintln!("could not list server voices: {}", e),
    }

    if let Some(path) = sample {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path))?;
        let file_name = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("sample.wav")
            .to_string();
        let profile = studio.clone_voice(bytes, &file_name, None).await?;
        println!("cloned voice: {} ({})", profile.label, profile.id);
    } else {
        studio.catalog().select(&voice_id)?;
    }

    println!("voices:");
    for voice in studio.catalog().list_all() {
        let marker = if voice.id == studio.catalog().selected() { "*" } else { " " };
        println!("{} {:<28} {:<8} {}", marker, voice.id, voice.kind_label(), voice.label);
    }

    let speak = studio.speak(&text, Language::English);
    tokio::pin!(speak);
    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    let handle = loop {
        tokio::select! {
            result = &mut speak => break result?,
            _ = ticker.tick() => {
                let progress = studio.progress();
                if progress.is_known() {
                    println!("progress: {}/{} ({}%)", progress.current, progress.total, progress.percent());
                }
            }
        }
    };

    let out = format!("{}.{}", studio.catalog().selected(), handle.format().extension());
    studio.audio().save(&handle, &out).await?;
    println!("saved {} bytes to {}", handle.len(), out);
    Ok(())
}
