//! Storytime CLI - 终端版首页与音色管理页

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use storytime::client::{
    HomeScreen, HttpStoryApi, PersonOutcome, StoryApi, VoicesScreen, PUNJABI_TRANSCRIPT,
};
use storytime::domain::voice::{find_preset, LanguageTag};

#[derive(Parser, Debug)]
#[command(name = "storytime-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Storytime CLI - bedtime stories in family voices")]
struct Args {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 300)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up
    Ping,

    /// List family and custom voices
    Voices,

    /// List saved stories, newest first
    Stories,

    /// Clone a voice from a recorded sample (audio/webm)
    Clone {
        /// Recorded sample
        #[arg(long)]
        file: PathBuf,

        /// Preset family member (mummy, papa, dadu, dadi, nanu, naani)
        #[arg(long, conflicts_with = "name")]
        preset: Option<String>,

        /// Name for a custom voice
        #[arg(long)]
        name: Option<String>,
    },

    /// Generate a story narrated by a family member
    Story {
        #[arg(long)]
        preset: String,

        /// Story language (en or pa)
        #[arg(long, default_value = "pa")]
        language: String,
    },

    /// Delete a voice by id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,storytime=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let api: Arc<dyn StoryApi> = Arc::new(HttpStoryApi::new(&args.server, args.timeout)?);

    match args.command {
        Command::Ping => {
            let status = api.ping().await?;
            println!("{} (server {})", status.status, status.version);
        }
        Command::Voices => list_voices(api).await,
        Command::Stories => list_stories(api).await,
        Command::Clone { file, preset, name } => clone_voice(api, file, preset, name).await?,
        Command::Story { preset, language } => generate_story(api, &preset, &language).await?,
        Command::Delete { id } => {
            let mut screen = VoicesScreen::new(api);
            if let Some(notice) = screen.delete_voice(id).await {
                return Err(anyhow!(notice.message()));
            }
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

async fn list_voices(api: Arc<dyn StoryApi>) {
    let mut screen = VoicesScreen::new(api);
    screen.load_voices().await;

    println!("Family Voices");
    for (preset, voice) in screen.family_voices() {
        match voice {
            Some(voice) => println!("  {:<8} ✓ {} ({})", preset.label, voice.name, voice.id),
            None => println!("  {:<8} not recorded", preset.label),
        }
    }

    let custom = screen.custom_voices();
    if !custom.is_empty() {
        println!("Custom Voices");
        for voice in custom {
            println!("  {} ({})", voice.name, voice.id);
        }
    }
}

async fn list_stories(api: Arc<dyn StoryApi>) {
    let mut home = HomeScreen::new(api);
    home.load_stories().await;

    for story in home.stories() {
        println!("{}  {}", story.created_at, story.title);
        println!("    narrated by {}", story.narrator);
        if let Some(url) = &story.audio_url {
            println!("    {}", url);
        }
    }
}

async fn clone_voice(
    api: Arc<dyn StoryApi>,
    file: PathBuf,
    preset: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let audio = tokio::fs::read(&file).await?;
    let mut screen = VoicesScreen::new(api);

    match (preset, name) {
        (Some(id), _) => {
            let preset = find_preset(&id).ok_or_else(|| anyhow!("Unknown family member: {}", id))?;
            println!("Reading text: {}", PUNJABI_TRANSCRIPT);
            screen.start_preset_recording(preset)?;
        }
        (None, Some(name)) => {
            screen.set_custom_name(name);
            screen
                .start_custom_recording()
                .map_err(|notice| anyhow!(notice.message()))?;
        }
        (None, None) => return Err(anyhow!("Either --preset or --name is required")),
    }

    let recorder = screen.recorder_mut();
    recorder.push_chunk(audio)?;
    recorder.stop()?;

    match screen.save_voice().await {
        Some(notice) if notice.is_error() => Err(anyhow!(notice.message())),
        Some(notice) => {
            println!("{}", notice);
            Ok(())
        }
        None => Err(anyhow!("Nothing to save")),
    }
}

async fn generate_story(api: Arc<dyn StoryApi>, preset: &str, language: &str) -> Result<()> {
    let mut home = HomeScreen::new(api);
    home.set_language(LanguageTag::new(language)?);
    home.load_voices().await;

    match home.click_person_by_id(preset).await {
        Ok(PersonOutcome::StoryReady { audio_url }) => {
            if let Some(text) = home.generation().story_text() {
                println!("{}\n", text);
            }
            println!("{}", audio_url);
            Ok(())
        }
        Ok(PersonOutcome::RecorderOpened(preset)) => Err(anyhow!(
            "No voice recorded for {} yet; record one with `storytime-cli clone --preset {}`",
            preset.label,
            preset.id
        )),
        Ok(PersonOutcome::Ignored) => Err(anyhow!("Unknown family member: {}", preset)),
        Err(notice) => Err(anyhow!(notice.message())),
    }
}
