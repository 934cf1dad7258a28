mod mocks;

use mocks::{
    audio_handler::MockAudioHandler,
    caption_source::{CaptionOutcome, MockCaptionSource},
    transcriber::MockTranscriber,
};
use std::path::Path;
use tube_lens::{
    types::{TranscriptSegment, TranscriptSource},
    yt::{CaptionError, CaptionSource, VideoId},
    AudioInput, TranscriptAcquirer, TranscriptAcquirerBuilder,
};

fn build_acquirer(
    scratch_dir: &Path,
    captions: MockCaptionSource,
    audio_handler: MockAudioHandler,
    transcriber: MockTranscriber,
) -> TranscriptAcquirer<MockCaptionSource, MockAudioHandler, MockTranscriber> {
    TranscriptAcquirerBuilder::new(scratch_dir)
        .captions(captions)
        .audio_handler(audio_handler)
        .transcriber(transcriber)
        .build()
}

fn video_id() -> VideoId {
    VideoId::parse("dQw4w9WgXcQ").unwrap()
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

// ─── Official path ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_official_transcript_skips_download() {
    let scratch = tempfile::tempdir().unwrap();
    let segments = vec![
        TranscriptSegment::new("Never gonna give you up", 0.0, 2.5),
        TranscriptSegment::new("Never gonna let you down", 2.5, 2.0),
    ];

    let captions = MockCaptionSource::found(segments.clone());
    let audio_handler = MockAudioHandler::default();
    let transcriber = MockTranscriber::new(&[(0.0, 1.0, "unused")]);

    let caption_calls = captions.calls.clone();
    let audio_calls = audio_handler.calls.clone();
    let transcriber_calls = transcriber.calls.clone();

    let acquirer = build_acquirer(scratch.path(), captions, audio_handler, transcriber);
    let result = acquirer.acquire(&video_id()).await;

    assert!(result.success);
    assert_eq!(result.source, TranscriptSource::Official);
    assert_eq!(result.segments, segments);
    assert!(result.error.is_none());

    assert_eq!(caption_calls.lock().unwrap().as_slice(), ["dQw4w9WgXcQ"]);
    assert!(
        audio_calls.lock().unwrap().is_empty(),
        "Official transcript should not trigger a download"
    );
    assert!(transcriber_calls.lock().unwrap().is_empty());
}

// ─── Fallback ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_every_caption_failure_falls_back_exactly_once() {
    let outcomes = [
        CaptionOutcome::NotFound,
        CaptionOutcome::Disabled,
        CaptionOutcome::Unplayable("Sign in to confirm your age".into()),
        CaptionOutcome::Invalid("empty transcript list".into()),
        CaptionOutcome::Transport,
    ];

    for outcome in outcomes {
        let scratch = tempfile::tempdir().unwrap();
        let audio_handler = MockAudioHandler::default();
        let transcriber = MockTranscriber::new(&[(0.0, 1.5, "hello")]);

        let audio_calls = audio_handler.calls.clone();
        let transcriber_calls = transcriber.calls.clone();

        let acquirer = build_acquirer(
            scratch.path(),
            MockCaptionSource::new(outcome.clone()),
            audio_handler,
            transcriber,
        );
        let result = acquirer.acquire(&video_id()).await;

        assert!(result.success, "{outcome:?} should fall back and succeed");
        assert_eq!(result.source, TranscriptSource::Offline);
        assert_eq!(
            audio_calls.lock().unwrap().len(),
            1,
            "{outcome:?} should download exactly once"
        );
        assert_eq!(transcriber_calls.lock().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_connection_error_is_a_transport_failure() {
    let source = MockCaptionSource::new(CaptionOutcome::Transport);
    let result = source.fetch_captions(&video_id()).await;
    assert!(matches!(result, Err(CaptionError::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_end_to_end_offline_scenario() {
    let scratch = tempfile::tempdir().unwrap();
    let video_id = VideoId::parse("https://youtube.com/watch?v=abc12345678").unwrap();
    assert_eq!(video_id.as_str(), "abc12345678");

    let audio_handler = MockAudioHandler::default();
    let transcriber = MockTranscriber::new(&[
        (0.0, 4.2, " Welcome back to the channel. "),
        (4.2, 9.0, "Today we look at lifetimes."),
    ]);
    let audio_calls = audio_handler.calls.clone();

    let acquirer = build_acquirer(
        scratch.path(),
        MockCaptionSource::not_found(),
        audio_handler,
        transcriber,
    );
    let result = acquirer.acquire(&video_id).await;

    assert!(result.success);
    assert_eq!(result.source, TranscriptSource::Offline);
    assert_eq!(audio_calls.lock().unwrap().as_slice(), ["abc12345678"]);
    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[0].text, "Welcome back to the channel.");
    assert_eq!(result.segments[0].start, 0.0);
    assert!((result.segments[0].duration - 4.2).abs() < 1e-9);
    assert!((result.segments[1].duration - 4.8).abs() < 1e-9);
}

// ─── Scratch cleanup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scratch_audio_removed_after_failed_transcription() {
    let scratch = tempfile::tempdir().unwrap();
    let audio_handler = MockAudioHandler::default();
    let transcriber = MockTranscriber::failing("decoder crashed");

    let downloads = audio_handler.downloads.clone();
    let saw_file = transcriber.saw_file.clone();

    let acquirer = build_acquirer(
        scratch.path(),
        MockCaptionSource::not_found(),
        audio_handler,
        transcriber,
    );
    let result = acquirer.acquire(&video_id()).await;

    assert!(!result.success);
    assert_eq!(result.source, TranscriptSource::Error);
    assert!(result.segments.is_empty());
    let error = result.error.expect("failure should carry a message");
    assert!(error.contains("decoder crashed"), "unexpected error: {error}");

    assert_eq!(
        saw_file.lock().unwrap().as_slice(),
        [true],
        "Audio should exist while transcribing"
    );
    let downloads = downloads.lock().unwrap();
    assert_eq!(downloads.len(), 1);
    assert!(!downloads[0].exists(), "Scratch audio should be deleted");
    assert!(is_empty_dir(scratch.path()));
}

#[tokio::test]
async fn test_scratch_audio_removed_after_success() {
    let scratch = tempfile::tempdir().unwrap();
    let audio_handler = MockAudioHandler::default();
    let downloads = audio_handler.downloads.clone();

    let acquirer = build_acquirer(
        scratch.path(),
        MockCaptionSource::not_found(),
        audio_handler,
        MockTranscriber::new(&[(0.0, 1.0, "ok")]),
    );
    let result = acquirer.acquire(&video_id()).await;

    assert!(result.success);
    assert!(!downloads.lock().unwrap()[0].exists());
    assert!(is_empty_dir(scratch.path()));
}

#[tokio::test]
async fn test_download_failure_reports_error_without_transcribing() {
    let scratch = tempfile::tempdir().unwrap();
    let transcriber = MockTranscriber::new(&[(0.0, 1.0, "unused")]);
    let transcriber_calls = transcriber.calls.clone();

    let acquirer = build_acquirer(
        scratch.path(),
        MockCaptionSource::not_found(),
        MockAudioHandler::failing("HTTP Error 403: Forbidden"),
        transcriber,
    );
    let result = acquirer.acquire(&video_id()).await;

    assert!(!result.success);
    assert_eq!(result.source, TranscriptSource::Error);
    let error = result.error.unwrap();
    assert!(error.contains("403"), "unexpected error: {error}");
    assert!(transcriber_calls.lock().unwrap().is_empty());
    assert!(is_empty_dir(scratch.path()));
}

// ─── Chunking ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_chunked_audio_input_when_chunking_enabled() {
    let scratch = tempfile::tempdir().unwrap();
    let transcriber = MockTranscriber::new(&[(0.0, 1.0, "chunked")]);
    let transcriber_calls = transcriber.calls.clone();

    let acquirer = TranscriptAcquirerBuilder::new(scratch.path())
        .captions(MockCaptionSource::not_found())
        .audio_handler(MockAudioHandler::default())
        .transcriber(transcriber)
        .with_chunking(900)
        .build();
    let result = acquirer.acquire(&video_id()).await;
    assert!(result.success);

    let calls = transcriber_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);

    match &calls[0] {
        AudioInput::Chunked {
            chunk_duration_seconds,
            chunks_dir_path,
            file_path,
        } => {
            assert_eq!(*chunk_duration_seconds, 900);
            assert_eq!(chunks_dir_path.parent(), file_path.parent());
            assert!(chunks_dir_path.starts_with(scratch.path()));
        }
        AudioInput::File(_) => {
            panic!("Expected Chunked audio input when chunking is enabled");
        }
    }
}

#[tokio::test]
async fn test_concurrent_attempts_use_separate_scratch_dirs() {
    let scratch = tempfile::tempdir().unwrap();
    let audio_handler = MockAudioHandler::default();
    let downloads = audio_handler.downloads.clone();

    let acquirer = build_acquirer(
        scratch.path(),
        MockCaptionSource::not_found(),
        audio_handler,
        MockTranscriber::new(&[(0.0, 1.0, "same video")]),
    );

    let id = video_id();
    let (first, second) = tokio::join!(acquirer.acquire(&id), acquirer.acquire(&id));
    assert!(first.success && second.success);

    let downloads = downloads.lock().unwrap();
    assert_eq!(downloads.len(), 2);
    assert_ne!(downloads[0].parent(), downloads[1].parent());
}
