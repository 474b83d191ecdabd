//! Colloquy command line host.
//!
//! Reads a speaker-tagged transcript file, renders it to multi-voice speech
//! through colloquy-core, and writes a `.wav` file:
//!
//! ```text
//! colloquy conversation.txt --user-voice Zephyr --assistant-voice Charon
//! ```

mod settings;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use colloquy_core::{
    parse_transcript, EngineConfig, GeminiSynthesizer, RenderEngine, SpeechSynthesizer,
    StubSynthesizer, VoiceAssignments,
};
use settings::{default_settings_path, load_settings};
use tracing::info;

#[derive(Debug)]
struct Args {
    transcript: PathBuf,
    output: Option<PathBuf>,
    user_voice: Option<String>,
    assistant_voice: Option<String>,
    model: Option<String>,
    settings_path: Option<PathBuf>,
    stub: bool,
}

fn usage() -> &'static str {
    "usage: colloquy <transcript.txt> [options]\n\
     \n\
     options:\n\
       --output <path>            output WAV path (default: conversation_<ms>.wav)\n\
       --user-voice <name>        prebuilt voice for User lines\n\
       --assistant-voice <name>   prebuilt voice for Assistant lines\n\
       --model <name>             speech-capable model id\n\
       --settings <path>          settings.json location\n\
       --stub                     offline tone synthesis (no API key needed)\n"
}

fn parse_args() -> Result<Args, String> {
    let mut transcript: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut user_voice: Option<String> = None;
    let mut assistant_voice: Option<String> = None;
    let mut model: Option<String> = None;
    let mut settings_path: Option<PathBuf> = None;
    let mut stub = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--output" => {
                output = Some(PathBuf::from(
                    it.next().ok_or("--output requires a path")?,
                ));
            }
            "--user-voice" => {
                user_voice = Some(it.next().ok_or("--user-voice requires a name")?);
            }
            "--assistant-voice" => {
                assistant_voice = Some(it.next().ok_or("--assistant-voice requires a name")?);
            }
            "--model" => {
                model = Some(it.next().ok_or("--model requires a name")?);
            }
            "--settings" => {
                settings_path = Some(PathBuf::from(
                    it.next().ok_or("--settings requires a path")?,
                ));
            }
            "--stub" => stub = true,
            "--help" | "-h" => return Err(String::new()),
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                if transcript.is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
                transcript = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Args {
        transcript: transcript.ok_or("missing transcript path")?,
        output,
        user_voice,
        assistant_voice,
        model,
        settings_path,
        stub,
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colloquy=info,colloquy_core=info".into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("colloquy: {msg}\n");
            }
            eprint!("{}", usage());
            std::process::exit(if msg.is_empty() { 0 } else { 2 });
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("colloquy: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings_path = args
        .settings_path
        .clone()
        .unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);
    if !settings_path.exists() {
        // First run: persist the defaults so users have a file to edit.
        if let Err(e) = settings::save_settings(&settings_path, &settings) {
            tracing::debug!("could not write default settings: {e}");
        }
    }

    if let Some(model) = args.model {
        settings.model = model;
    }
    if let Some(voice) = args.user_voice {
        settings.user_voice = voice;
    }
    if let Some(voice) = args.assistant_voice {
        settings.assistant_voice = voice;
    }
    settings.normalize();

    let mut voices = VoiceAssignments {
        user_voice: settings.user_voice.clone(),
        assistant_voice: settings.assistant_voice.clone(),
    };
    voices.normalize();

    let raw = fs::read_to_string(&args.transcript)
        .with_context(|| format!("reading transcript {}", args.transcript.display()))?;
    let turns = parse_transcript(&raw)?;
    info!(
        turns = turns.len(),
        user_voice = voices.user_voice.as_str(),
        assistant_voice = voices.assistant_voice.as_str(),
        "transcript parsed"
    );

    let synthesizer: Arc<dyn SpeechSynthesizer> = if args.stub {
        info!("using offline stub synthesizer");
        Arc::new(StubSynthesizer::default())
    } else {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| settings.api_key.clone());
        let Some(api_key) = api_key else {
            bail!(
                "no API key: set GEMINI_API_KEY, add apiKey to {}, or pass --stub",
                settings_path.display()
            );
        };
        Arc::new(GeminiSynthesizer::new(api_key, settings.model.clone()))
    };

    let engine = RenderEngine::new(EngineConfig::default(), synthesizer);
    let render = engine.render(&turns, &voices).await?;

    let out_path = match args.output {
        Some(path) => path,
        None => settings
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(render.file_name()),
    };
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&out_path, render.wav_bytes())
        .with_context(|| format!("writing {}", out_path.display()))?;

    info!(
        path = %out_path.display(),
        bytes = render.wav_bytes().len(),
        duration_secs = render.audio().duration_secs(),
        "conversation audio written"
    );
    println!("{}", out_path.display());
    Ok(())
}
