mod base;
#[cfg(feature = "system-tts")]
pub mod system;

pub use base::{
    BaseSpeech, PlaybackHandle, SpeechError, SpeechResult, UnitEvent, VoiceDescriptor,
    VoicesChangedCallback,
};
#[cfg(feature = "system-tts")]
pub use system::SystemSpeech;

/// Factory function to create a speech provider.
///
/// # Supported Providers
///
/// - `"system"` - Operating system speech facilities via the `tts` crate
///   (requires the `system-tts` feature)
pub fn create_speech_provider(kind: &str) -> SpeechResult<Box<dyn BaseSpeech>> {
    match kind.to_lowercase().as_str() {
        #[cfg(feature = "system-tts")]
        "system" => Ok(Box::new(SystemSpeech::new()?)),
        #[cfg(not(feature = "system-tts"))]
        "system" => Err(SpeechError::InvalidConfiguration(
            "System speech requires the 'system-tts' feature. Rebuild with --features system-tts"
                .to_string(),
        )),
        _ => Err(SpeechError::InvalidConfiguration(format!(
            "Unsupported speech provider: {kind}. Supported providers: system"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let result = create_speech_provider("holodeck");
        match result {
            Err(SpeechError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("holodeck"));
            }
            Err(other) => panic!("Expected InvalidConfiguration error, got: {:?}", other),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }

    #[cfg(not(feature = "system-tts"))]
    #[test]
    fn test_system_provider_without_feature() {
        let result = create_speech_provider("system");
        assert!(result.is_err());
        if let Err(SpeechError::InvalidConfiguration(msg)) = result {
            assert!(msg.contains("system-tts"));
        }
    }

    #[test]
    fn test_playback_handle_delivers_events_in_order() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let (tx, mut handle) = PlaybackHandle::channel();
            tx.send(UnitEvent::Started).await.unwrap();
            tx.send(UnitEvent::Ended).await.unwrap();
            drop(tx);

            assert_eq!(handle.next_event().await, Some(UnitEvent::Started));
            assert_eq!(handle.next_event().await, Some(UnitEvent::Ended));
            assert_eq!(handle.next_event().await, None);
        });
    }
}
