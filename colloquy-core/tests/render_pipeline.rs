use std::sync::Arc;

use colloquy_core::audio::decode::{decode_audio_data, decode_base64};
use colloquy_core::audio::wav::audio_buffer_to_wav;
use colloquy_core::{
    parse_transcript, ColloquyError, EngineConfig, RenderEngine, Session, StubSynthesizer,
    VoiceAssignments, GENERATION_CHANNELS, GENERATION_SAMPLE_RATE,
};

const TRANSCRIPT: &str = "\
User: Hey, can you explain how tides work?
Assistant: Sure. The moon's gravity pulls on the ocean,
creating a bulge of water on the side facing it.
User: And the second bulge on the far side?
Assistant: That one comes from inertia as the Earth itself is pulled moonward.
";

#[tokio::test]
async fn transcript_to_wav_end_to_end() {
    let turns = parse_transcript(TRANSCRIPT).unwrap();
    assert_eq!(turns.len(), 4);
    assert!(turns[1].text.ends_with("facing it."));

    let engine = RenderEngine::new(
        EngineConfig::default(),
        Arc::new(StubSynthesizer::new(2400)),
    );
    let render = engine
        .render(&turns, &VoiceAssignments::default())
        .await
        .unwrap();

    let wav = render.wav_bytes();
    assert_eq!(&wav[..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    // Four turns of 2400 frames, 2 bytes each, after the 44-byte header.
    assert_eq!(wav.len(), 44 + 4 * 2400 * 2);

    // Stripping the header and re-decoding the data chunk must reproduce
    // every sample within one quantization step.
    let decoded = decode_audio_data(&wav[44..], GENERATION_SAMPLE_RATE, GENERATION_CHANNELS)
        .unwrap();
    assert_eq!(decoded.len(), render.audio().len());
    for (a, b) in render
        .audio()
        .channel(0)
        .iter()
        .zip(decoded.channel(0))
    {
        assert!((a - b).abs() <= 1.0 / 32_768.0);
    }

    assert_eq!(render.mime_type(), "audio/wav");
    assert!(render.file_name().starts_with("conversation_"));
}

#[tokio::test]
async fn new_render_replaces_the_session_slot() {
    let turns = parse_transcript("User: once\nAssistant: twice").unwrap();
    let engine = RenderEngine::new(
        EngineConfig::default(),
        Arc::new(StubSynthesizer::new(1200)),
    );
    let voices = VoiceAssignments::default();

    let mut session = Session::new();
    session.replace(engine.render(&turns, &voices).await.unwrap());
    let first_created = session.current().unwrap().created_at_ms();

    let old = session
        .replace(engine.render(&turns, &voices).await.unwrap())
        .unwrap();
    assert_eq!(old.created_at_ms(), first_created);
    assert!(session.current().unwrap().created_at_ms() >= first_created);
}

#[tokio::test]
async fn failed_generation_leaves_prior_session_untouched() {
    let turns = parse_transcript("User: hello").unwrap();
    let voices = VoiceAssignments::default();

    let good = RenderEngine::new(
        EngineConfig::default(),
        Arc::new(StubSynthesizer::new(1200)),
    );
    let mut session = Session::new();
    session.replace(good.render(&turns, &voices).await.unwrap());

    let bad = RenderEngine::new(EngineConfig::default(), Arc::new(StubSynthesizer::empty()));
    let err = bad.render(&turns, &voices).await.unwrap_err();
    assert!(matches!(err, ColloquyError::EmptyAudio));

    // No partial-success state: the earlier render is still there, intact.
    assert_eq!(session.current().unwrap().audio().len(), 1200);
}

#[test]
fn degenerate_base64_payload_is_rejected_not_written() {
    let bytes = decode_base64("").unwrap();
    assert!(bytes.is_empty());
    let err = decode_audio_data(&bytes, GENERATION_SAMPLE_RATE, GENERATION_CHANNELS).unwrap_err();
    assert!(matches!(err, ColloquyError::EmptyAudio));
}

#[test]
fn pcm_extremes_survive_a_full_cycle() {
    let buf = decode_audio_data(
        &[0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0x01, 0x00],
        GENERATION_SAMPLE_RATE,
        1,
    )
    .unwrap();
    let wav = audio_buffer_to_wav(&buf);
    assert_eq!(&wav[44..], &[0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0x01, 0x00]);
}
