//! # Integration Tests
//!
//! Cross-crate tests for the event contracts.
//!
//! Covers:
//! - Wire snapshots for each event kind
//! - Stage-to-stage propagation through a whole workflow
//! - Multiplexed (tagged) streams and concurrent codec use

#[cfg(test)]
mod contract_tests {
    use chrono::{TimeZone, Utc};
    use contracts::{
        decode, encode, AugmentationPreferences, CommentarySettings, ContractError,
        DecodeFailure, EventHeader, PdfCreatedEvent, PngCreatedEvent, SummaryPlacement,
        SummarySettings, TextProcessedEvent,
    };
    use serde_json::json;

    fn fixed_header() -> EventHeader {
        EventHeader {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            workflow_id: "workflow-123".into(),
            user_id: "user-456".into(),
            tenant_id: "tenant-789".into(),
            event_id: "event-000".into(),
        }
    }

    fn chart_preferences() -> AugmentationPreferences {
        AugmentationPreferences {
            commentary: CommentarySettings {
                enabled: true,
                custom_instructions: Some("Describe every chart.".into()),
            },
            summary: SummarySettings {
                enabled: true,
                placement: Some(SummaryPlacement::Bottom),
                custom_instructions: Some("Provide two sentence overview.".into()),
            },
        }
    }

    #[test]
    fn test_png_created_with_augmentation_round_trip() {
        let original = PngCreatedEvent {
            header: fixed_header(),
            png_key: "tenant/workflow/page.png".into(),
            page_number: 1,
            total_pages: 10,
            augmentation: Some(chart_preferences()),
        };

        let decoded: PngCreatedEvent = decode(&encode(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);

        assert_eq!(decoded.header.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(decoded.header.workflow_id, "workflow-123");
        assert_eq!(decoded.header.user_id, "user-456");
        assert_eq!(decoded.header.tenant_id, "tenant-789");
        assert_eq!(decoded.header.event_id, "event-000");
        assert_eq!(decoded.png_key, "tenant/workflow/page.png");
        assert_eq!(decoded.page_number, 1);
        assert_eq!(decoded.total_pages, 10);

        let prefs = decoded.augmentation.expect("augmentation should be present");
        assert!(prefs.commentary.enabled);
        assert_eq!(
            prefs.commentary.custom_instructions.as_deref(),
            Some("Describe every chart.")
        );
        assert!(prefs.summary.enabled);
        assert_eq!(prefs.summary.placement, Some(SummaryPlacement::Bottom));
        assert_eq!(
            prefs.summary.custom_instructions.as_deref(),
            Some("Provide two sentence overview.")
        );
    }

    #[test]
    fn test_png_created_wire_snapshot() {
        let event = PngCreatedEvent {
            header: fixed_header(),
            png_key: "tenant/workflow/page.png".into(),
            page_number: 1,
            total_pages: 10,
            augmentation: Some(chart_preferences()),
        };

        let value: serde_json::Value = serde_json::from_slice(&encode(&event).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "header": {
                    "timestamp": "2024-01-01T00:00:00Z",
                    "workflowId": "workflow-123",
                    "userId": "user-456",
                    "tenantId": "tenant-789",
                    "eventId": "event-000"
                },
                "pngKey": "tenant/workflow/page.png",
                "pageNumber": 1,
                "totalPages": 10,
                "augmentation": {
                    "commentary": {
                        "enabled": true,
                        "customInstructions": "Describe every chart."
                    },
                    "summary": {
                        "enabled": true,
                        "placement": "bottom",
                        "customInstructions": "Provide two sentence overview."
                    }
                }
            })
        );
    }

    #[test]
    fn test_absent_augmentation_stays_absent() {
        let event = PdfCreatedEvent::new(fixed_header(), "tenant/workflow/doc.pdf");
        let bytes = encode(&event).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.get("augmentation").is_none());

        let decoded: PdfCreatedEvent = decode(&bytes).unwrap();
        assert_eq!(decoded.augmentation, None);
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_empty_placement_from_existing_producers() {
        let json = r#"{"header":{"timestamp":"2024-01-01T00:00:00Z","workflowId":"w","userId":"u","tenantId":"t","eventId":"e"},"pdfKey":"d.pdf","augmentation":{"commentary":{"enabled":true},"summary":{"enabled":false,"placement":""}}}"#;
        let event = decode::<PdfCreatedEvent>(json.as_bytes()).unwrap();

        let prefs = event.augmentation.clone().expect("augmentation should be present");
        assert!(prefs.commentary.enabled);
        assert!(!prefs.summary.enabled);
        assert_eq!(prefs.summary.placement, None);

        let decoded: PdfCreatedEvent = decode(&encode(&event).unwrap()).unwrap();
        assert_eq!(decoded, event);

        let middle = json.replace(r#""placement":"""#, r#""placement":"middle""#);
        let err = decode::<PdfCreatedEvent>(middle.as_bytes()).unwrap_err();
        assert_eq!(err.structure(), Some("PDFCreated"));
        assert_eq!(err.decode_failure(), Some(DecodeFailure::Data));
    }

    #[test]
    fn test_page_numbers_exact_at_extremes() {
        let event = PngCreatedEvent {
            header: fixed_header(),
            png_key: "k".into(),
            page_number: u32::MAX,
            total_pages: u32::MAX,
            augmentation: None,
        };
        let decoded: PngCreatedEvent = decode(&encode(&event).unwrap()).unwrap();
        assert_eq!(decoded.page_number, u32::MAX);
        assert_eq!(decoded.total_pages, u32::MAX);

        let overflow = r#"{"header":{"timestamp":"2024-01-01T00:00:00Z","workflowId":"w","userId":"u","tenantId":"t","eventId":"e"},"pngKey":"k","pageNumber":4294967296,"totalPages":1}"#;
        assert!(decode::<PngCreatedEvent>(overflow.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_pdf_key_is_decode_error() {
        let json = r#"{"header":{"timestamp":"2024-01-01T00:00:00Z","workflowId":"w","userId":"u","tenantId":"t","eventId":"e"}}"#;
        let err = decode::<PdfCreatedEvent>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ContractError::Decode { .. }));
        assert_eq!(err.decode_failure(), Some(DecodeFailure::Data));
    }

    #[test]
    fn test_empty_header_decodes_but_fails_validation() {
        use contracts::Event;

        let json = r#"{"header":{"timestamp":"2024-01-01T00:00:00Z","workflowId":"","userId":"u","tenantId":"t","eventId":"e"},"pdfKey":"doc.pdf"}"#;
        let event = decode::<PdfCreatedEvent>(json.as_bytes()).unwrap();
        let err = event.validate().unwrap_err();
        assert!(err.to_string().contains("header.workflowId"));
    }

    #[test]
    fn test_zero_and_absent_synthesis_params_distinct() {
        let png = PngCreatedEvent {
            header: fixed_header(),
            png_key: "p.png".into(),
            page_number: 1,
            total_pages: 1,
            augmentation: None,
        };
        let zeroed = TextProcessedEvent::from_png(&png, "p.txt")
            .with_seed(0)
            .with_ngl(0)
            .with_top_p(0.0)
            .with_repetition_penalty(0.0)
            .with_temperature(0.0);
        let absent = TextProcessedEvent::from_png(&png, "p.txt");

        let zeroed_back: TextProcessedEvent = decode(&encode(&zeroed).unwrap()).unwrap();
        let absent_back: TextProcessedEvent = decode(&encode(&absent).unwrap()).unwrap();

        assert_eq!(zeroed_back, zeroed);
        assert_eq!(absent_back, absent);
        assert_ne!(zeroed_back.temperature, absent_back.temperature);
        assert_eq!(zeroed_back.seed, Some(0));
        assert_eq!(absent_back.seed, None);
    }
}

#[cfg(test)]
mod workflow_tests {
    use contracts::{
        decode, encode, AudioChunkCreatedEvent, AugmentationPreferences, CommentarySettings,
        Event, EventHeader, FinalAudioCreatedEvent, PdfCreatedEvent, PngCreatedEvent,
        SummaryPlacement, SummarySettings, TextProcessedEvent, WavFileCreatedEvent,
    };

    /// Drive one document through every stage, decoding at each hop the way a
    /// consumer would.
    #[test]
    fn test_full_workflow_propagation() {
        let prefs = AugmentationPreferences {
            commentary: CommentarySettings::enabled(None),
            summary: SummarySettings::enabled(SummaryPlacement::Top, Some("One line.".into())),
        };
        let pdf = PdfCreatedEvent::new(
            EventHeader::new("wf-42", "user-7", "tenant-a"),
            "tenant-a/wf-42/report.pdf",
        )
        .with_augmentation(prefs.clone());

        let pdf: PdfCreatedEvent = decode(&encode(&pdf).unwrap()).unwrap();
        let total_pages = 3;

        let mut wavs = Vec::new();
        for page in 1..=total_pages {
            let png = PngCreatedEvent::from_pdf(
                &pdf,
                format!("tenant-a/wf-42/page-{page}.png"),
                page,
                total_pages,
            )
            .unwrap();
            let png: PngCreatedEvent = decode(&encode(&png).unwrap()).unwrap();
            assert_eq!(png.augmentation.as_ref(), Some(&prefs));

            let text = TextProcessedEvent::from_png(&png, format!("tenant-a/wf-42/page-{page}.txt"))
                .with_voice("af_heart")
                .with_temperature(0.0);
            let text: TextProcessedEvent = decode(&encode(&text).unwrap()).unwrap();

            let chunk = AudioChunkCreatedEvent::from_text(&text, format!("page-{page}.pcm"));
            let chunk: AudioChunkCreatedEvent = decode(&encode(&chunk).unwrap()).unwrap();

            let wav = WavFileCreatedEvent::from_audio_chunk(&chunk, format!("page-{page}.wav"));
            let wav: WavFileCreatedEvent = decode(&encode(&wav).unwrap()).unwrap();

            for header in [&png.header, &text.header, &chunk.header, &wav.header] {
                assert!(header.same_workflow(&pdf.header));
                assert_eq!(header.user_id, "user-7");
            }
            assert_eq!(text.temperature, Some(0.0));
            assert_eq!(wav.page_number, page);
            assert_eq!(wav.total_pages, total_pages);
            assert!(wav.validate().is_ok());
            wavs.push(wav);
        }

        let last = wavs.last().unwrap();
        assert!(last.page().unwrap().is_last());

        let done = FinalAudioCreatedEvent::for_workflow(&last.header, "tenant-a/wf-42/final.wav");
        let done: FinalAudioCreatedEvent = decode(&encode(&done).unwrap()).unwrap();
        assert!(done.header.same_workflow(&pdf.header));

        let mut event_ids: Vec<_> = wavs.iter().map(|w| w.header.event_id.clone()).collect();
        event_ids.push(done.header.event_id.clone());
        event_ids.sort();
        event_ids.dedup();
        assert_eq!(event_ids.len(), total_pages as usize + 1);
    }
}

#[cfg(test)]
mod multiplex_tests {
    use std::sync::Arc;
    use std::thread;

    use contracts::{
        decode, decode_tagged, encode, encode_tagged, AnyEvent, EventHeader, EventKind,
        FinalAudioCreatedEvent, PdfCreatedEvent, PngCreatedEvent, TextProcessedEvent,
    };
    use observability::CodecStatsAggregator;

    fn mixed_stream() -> Vec<AnyEvent> {
        let pdf = PdfCreatedEvent::new(EventHeader::new("wf", "u", "t"), "doc.pdf");
        let png = PngCreatedEvent::from_pdf(&pdf, "p1.png", 1, 1).unwrap();
        let text = TextProcessedEvent::from_png(&png, "p1.txt").with_ngl(-1);
        let done = FinalAudioCreatedEvent::for_workflow(&text.header, "final.wav");
        vec![pdf.into(), png.into(), text.into(), done.into()]
    }

    #[test]
    fn test_one_channel_many_kinds() {
        let mut aggregator = CodecStatsAggregator::new();
        let stream = mixed_stream();

        for event in &stream {
            let bytes = encode_tagged(event).unwrap();
            let decoded = decode_tagged(&bytes).unwrap();
            assert_eq!(&decoded, event);
            aggregator.record_ok(decoded.kind(), bytes.len());
        }
        aggregator.record_failure(None);

        let summary = aggregator.summary();
        assert_eq!(summary.total_decoded, 4);
        assert_eq!(summary.total_failed, 1);
        assert_eq!(summary.per_kind.len(), 4);
        assert!(summary.per_kind.contains_key(&EventKind::TextProcessed));
    }

    #[test]
    fn test_untagged_consumer_reads_tagged_message() {
        let stream = mixed_stream();
        let png = match &stream[1] {
            AnyEvent::PngCreated(png) => png.clone(),
            other => panic!("unexpected event: {other:?}"),
        };

        let bytes = encode_tagged(&stream[1]).unwrap();
        let decoded: PngCreatedEvent = decode(&bytes).unwrap();
        assert_eq!(decoded, png);

        let untagged = encode(&png).unwrap();
        assert!(decode_tagged(&untagged).is_err());
        assert_eq!(
            AnyEvent::decode_as(EventKind::PngCreated, &untagged).unwrap(),
            stream[1]
        );
    }

    #[test]
    fn test_concurrent_codec_use() {
        let stream = Arc::new(mixed_stream());
        let expected: Vec<Vec<u8>> = stream
            .iter()
            .map(|event| encode_tagged(event).unwrap().to_vec())
            .collect();
        let expected = Arc::new(expected);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stream = Arc::clone(&stream);
                let expected = Arc::clone(&expected);
                thread::spawn(move || {
                    for _ in 0..100 {
                        for (event, bytes) in stream.iter().zip(expected.iter()) {
                            let encoded = encode_tagged(event).unwrap();
                            assert_eq!(&encoded[..], &bytes[..]);
                            assert_eq!(&decode_tagged(&encoded).unwrap(), event);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
