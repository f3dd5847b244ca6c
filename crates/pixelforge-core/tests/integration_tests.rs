//! Integration tests for pixelforge-core
//!
//! Drives the transformation client end-to-end against an in-process
//! backend that records what it was sent.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pixelforge_core::error::{GENERIC_FAILURE_MESSAGE, NO_IMAGE_MESSAGE, TransportError};
use pixelforge_core::pixel::{
    GenerateContentRequest, GenerateContentResponse, GenerationBackend, Part, PixelArtStyle,
    PixelBitDepth, TransformationClient, TransformationRequest, compose_prompt,
};
use pixelforge_core::prelude::*;
use tokio::sync::Mutex;

/// Backend that returns a canned outcome and keeps the last request
struct RecordingBackend {
    outcome: std::result::Result<GenerateContentResponse, TransportError>,
    last_request: Mutex<Option<GenerateContentRequest>>,
    calls: AtomicUsize,
}

impl RecordingBackend {
    fn new(outcome: std::result::Result<GenerateContentResponse, TransportError>) -> Self {
        Self {
            outcome,
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_parts(parts: Vec<Part>) -> Self {
        Self::new(Ok(GenerateContentResponse::from_parts(parts)))
    }
}

#[async_trait]
impl GenerationBackend for RecordingBackend {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().await = Some(request.clone());
        self.outcome.clone()
    }
}

#[tokio::test]
async fn test_end_to_end_jpeg_chibi_16_bit() {
    let backend = Arc::new(RecordingBackend::with_parts(vec![Part::inline(
        "image/png",
        "UElYRUw=",
    )]));
    let client = TransformationClient::new(backend.clone());

    let request = TransformationRequest::new("data:image/jpeg;base64,AAAA")
        .with_style(PixelArtStyle::Chibi)
        .with_depth(PixelBitDepth::Bit16);

    let result = client.transform(&request).await.unwrap();
    assert_eq!(result.image_url, "data:image/png;base64,UElYRUw=");

    let sent = backend.last_request.lock().await.clone().unwrap();
    let parts = sent.parts();
    assert_eq!(parts[0].inline_data.as_ref().unwrap().data, "AAAA");

    let text = parts[1].text.as_deref().unwrap();
    assert!(text.contains(PixelArtStyle::Chibi.instruction()));
    assert!(text.contains(PixelBitDepth::Bit16.technical_spec()));
    assert_eq!(text, compose_prompt(PixelArtStyle::Chibi, PixelBitDepth::Bit16));
}

#[tokio::test]
async fn test_png_prefix_is_stripped_from_outgoing_payload() {
    let backend = Arc::new(RecordingBackend::with_parts(vec![Part::inline(
        "image/png",
        "X",
    )]));
    let client = TransformationClient::new(backend.clone());

    client
        .transform(&TransformationRequest::new("data:image/png;base64,iVBORw0KGgo="))
        .await
        .unwrap();

    let sent = backend.last_request.lock().await.clone().unwrap();
    let inline = sent.parts()[0].inline_data.clone().unwrap();
    assert_eq!(inline.data, "iVBORw0KGgo=");
    assert_eq!(inline.mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_first_image_wins_over_later_ones() {
    let client = TransformationClient::new(RecordingBackend::with_parts(vec![
        Part::text("Sure! Here's your sprite."),
        Part::inline("image/png", "X"),
        Part::inline("image/png", "Y"),
    ]));

    let result = client
        .transform(&TransformationRequest::new("AAAA"))
        .await
        .unwrap();
    assert_eq!(result.image_url, "data:image/png;base64,X");
}

#[tokio::test]
async fn test_text_only_response_is_rejected() {
    let client = TransformationClient::new(RecordingBackend::with_parts(vec![Part::text(
        "I can only describe the image.",
    )]));

    let err = client
        .transform(&TransformationRequest::new("AAAA"))
        .await
        .unwrap_err();
    assert_eq!(err, GenerationFailure::NoImage);
    assert_eq!(err.to_string(), NO_IMAGE_MESSAGE);
}

#[tokio::test]
async fn test_transport_failures_are_normalized() {
    let client = TransformationClient::new(RecordingBackend::new(Err(TransportError::new(
        "quota exceeded",
    ))));
    let err = client
        .transform(&TransformationRequest::new("AAAA"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded");

    let client = TransformationClient::new(RecordingBackend::new(Err(TransportError::silent())));
    let err = client
        .transform(&TransformationRequest::new("AAAA"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_single_attempt_per_call() {
    let backend = Arc::new(RecordingBackend::new(Err(TransportError::new(
        "service unavailable",
    ))));
    let client = TransformationClient::new(backend.clone());

    let _ = client.transform(&TransformationRequest::new("AAAA")).await;
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_overlapping_calls_are_independent() {
    let backend = Arc::new(RecordingBackend::with_parts(vec![Part::inline(
        "image/png",
        "Z",
    )]));
    let client = TransformationClient::new(backend.clone());

    let coarse = TransformationRequest::new("AAAA").with_depth(PixelBitDepth::Bit8);
    let fine = TransformationRequest::new("BBBB")
        .with_depth(PixelBitDepth::Bit64)
        .with_style(PixelArtStyle::Neutral);

    let (coarse_result, fine_result) =
        tokio::join!(client.transform(&coarse), client.transform(&fine));

    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    assert_eq!(coarse_result.unwrap().depth, PixelBitDepth::Bit8);

    let fine_result = fine_result.unwrap();
    assert_eq!(fine_result.depth, PixelBitDepth::Bit64);
    assert_eq!(fine_result.style, PixelArtStyle::Neutral);
}

#[test]
fn test_error_wraps_generation_failure() {
    let error: Error = GenerationFailure::Transport("quota exceeded".to_string()).into();
    assert_eq!(error.to_string(), "quota exceeded");
}
