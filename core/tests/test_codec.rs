// RecordCodec: stateless wire functions plus counters, stage timings and snapshots.

mod common;

#[cfg(test)]
mod tests {
    use record_codec::codec::RecordCodec;
    use record_codec::record::Record;
    use record_codec::telemetry::{CodecCounters, CodecSnapshot, Stage, StageTimes};
    use record_codec::types::CodecError;
    use record_codec::wire::{encode_record, DecodeOptions, WireError};
    use std::time::Duration;

    use crate::common::{doc, sample_feature, tree_chain, FEATURE_EVENT, TAGGED_DOC, TREE_NODE};

    fn doc_record() -> Record {
        let mut r = Record::new(&TAGGED_DOC);
        r.set(doc::ID, "abc123").unwrap();
        r.add(doc::TAGS, "a").unwrap();
        r.add(doc::TAGS, "b").unwrap();
        r
    }

// ## 1. Encode / decode through the facade

    #[test]
    fn codec_roundtrip_matches_free_functions() {
        let mut codec = RecordCodec::default();
        let r = sample_feature();

        let wire = codec.encode(&r);
        assert_eq!(wire, encode_record(&r));
        let back = codec.decode(&FEATURE_EVENT, &wire).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn counters_track_entries_and_bytes() {
        let mut codec = RecordCodec::default();
        let wire = codec.encode(&doc_record());
        codec.decode(&TAGGED_DOC, &wire).unwrap();

        let c = codec.counters();
        assert_eq!(c.records_encoded, 1);
        assert_eq!(c.records_decoded, 1);
        assert_eq!(c.fields_written, 3);
        assert_eq!(c.fields_read, 3);
        assert_eq!(c.bytes_encoded, 14);
        assert_eq!(c.bytes_decoded, 14);
        assert_eq!(c.decode_failures, 0);
    }

    #[test]
    fn nested_entries_are_counted_both_ways() {
        let mut codec = RecordCodec::default();
        let wire = codec.encode(&sample_feature());
        codec.decode(&FEATURE_EVENT, &wire).unwrap();
        let c = codec.counters();
        assert!(c.fields_written > 15);
        assert_eq!(c.fields_written, c.fields_read);
    }

    #[test]
    fn unknown_fields_are_counted() {
        let mut codec = RecordCodec::default();
        // field 9 is undeclared in the doc schema
        let wire = [0x0A, 1, b'x', 0x48, 0x05, 0x4A, 0x00];
        let r = codec.decode(&TAGGED_DOC, &wire).unwrap();
        assert_eq!(r.get_str(doc::ID).unwrap(), "x");
        assert_eq!(codec.counters().unknown_fields_skipped, 2);
        assert_eq!(codec.counters().fields_read, 1);
    }

// ## 2. Failures

    #[test]
    fn failures_are_counted_and_typed() {
        let mut codec = RecordCodec::default();
        let err = codec.decode(&TAGGED_DOC, &[0x0A, 6, b'a']).unwrap_err();
        assert!(err.is_truncated());
        assert!(matches!(err, CodecError::Wire(WireError::Truncated { offset: 3 })));
        assert!(err.to_string().starts_with("wire error: truncated input"));

        let err = codec.decode(&TAGGED_DOC, &[0x0B]).unwrap_err();
        assert!(!err.is_truncated());

        let c = codec.counters();
        assert_eq!(c.decode_failures, 2);
        assert_eq!(c.records_decoded, 0);
        assert_eq!(c.bytes_decoded, 0);
    }

    #[test]
    fn codec_applies_its_limits() {
        let mut codec = RecordCodec::new(DecodeOptions::default().with_max_depth(2));
        assert_eq!(codec.options().max_depth, 2);
        let wire = encode_record(&tree_chain(3));
        assert!(matches!(
            codec.decode(&TREE_NODE, &wire),
            Err(CodecError::Wire(WireError::RecursionLimitExceeded { limit: 2 }))
        ));
        assert!(codec.decode(&TREE_NODE, &encode_record(&tree_chain(2))).is_ok());
    }

    #[test]
    fn lower_layer_errors_convert() {
        let mut r = Record::new(&TAGGED_DOC);
        let err: CodecError = r.set(42, "x").unwrap_err().into();
        assert!(matches!(err, CodecError::Record(_)));
        assert_eq!(err.to_string(), "record error: invalid field tag 42 for test.TaggedDoc");
    }

// ## 3. Snapshots

    #[test]
    fn snapshot_ratios() {
        let mut codec = RecordCodec::default();
        let wire = codec.encode(&doc_record());
        codec.decode(&TAGGED_DOC, &wire).unwrap();
        codec.decode(&TAGGED_DOC, &[0x48, 0x01]).unwrap();

        let snap = codec.snapshot();
        assert!(snap.sanity_check());
        assert_eq!(snap.avg_encoded_len, 14.0);
        assert_eq!(snap.unknown_field_ratio, 0.25);
        assert!(snap.encode_us >= 0.0);
        assert!(snap.decode_us >= 0.0);
    }

    #[test]
    fn empty_snapshot_is_zeroed() {
        let snap = RecordCodec::default().snapshot();
        assert_eq!(snap.counters, CodecCounters::default());
        assert_eq!(snap.avg_encoded_len, 0.0);
        assert_eq!(snap.unknown_field_ratio, 0.0);
        assert!(snap.sanity_check());
    }

    #[test]
    fn snapshot_serializes() {
        let mut codec = RecordCodec::default();
        codec.encode(&doc_record());
        let snap = codec.snapshot();

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"records_encoded\":1"));
        let back: CodecSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, snap.counters);
        assert!((back.encode_us - snap.encode_us).abs() < 1e-9);
        assert!((back.decode_us - snap.decode_us).abs() < 1e-9);
        assert_eq!(back.avg_encoded_len, snap.avg_encoded_len);
    }

    #[test]
    fn snapshot_json_keeps_exact_timings() {
        let counters = CodecCounters::default();
        for n in 1..2000u64 {
            let mut times = StageTimes::default();
            times.add(Stage::Encode, Duration::from_nanos(n * 7919));
            times.add(Stage::Decode, Duration::from_nanos(n * 104_729));
            let snap = CodecSnapshot::from(&counters, &times);

            let back: CodecSnapshot = serde_json::from_str(&serde_json::to_string(&snap).unwrap()).unwrap();
            assert_eq!(back, snap, "n = {}", n);
        }
    }

    #[test]
    fn reset_clears_everything() {
        let mut codec = RecordCodec::default();
        let wire = codec.encode(&doc_record());
        codec.decode(&TAGGED_DOC, &wire).unwrap();
        codec.reset();
        assert_eq!(codec.counters(), &CodecCounters::default());
        assert_eq!(codec.snapshot().encode_us, 0.0);
    }

// ## 4. Counter and timer arithmetic

    #[test]
    fn counters_merge() {
        let mut a = CodecCounters::default();
        a.add_encode(10, 2);
        let mut b = CodecCounters::default();
        b.add_decode(20, 3, 1);
        b.add_decode_failure();

        a += b.clone();
        assert_eq!(a.records_encoded, 1);
        assert_eq!(a.records_decoded, 1);
        assert_eq!(a.bytes_encoded + a.bytes_decoded, 30);
        assert_eq!(a.unknown_fields_skipped, 1);
        assert_eq!(a.decode_failures, 1);

        let mut c = CodecCounters::default();
        c.merge(&b);
        assert_eq!(c, b);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut t = StageTimes::default();
        t.add(Stage::Encode, Duration::from_millis(2));
        t.add(Stage::Encode, Duration::from_millis(3));
        t.add(Stage::Decode, Duration::from_millis(1));
        assert_eq!(t.get(Stage::Encode), Duration::from_millis(5));
        assert_eq!(t.total(), Duration::from_millis(6));
        assert_eq!(t.get_us(Stage::Decode), 1000.0);

        let mut u = StageTimes::default();
        u.merge(&t);
        assert_eq!(u, t);
        u.clear();
        assert_eq!(u.total(), Duration::ZERO);
        assert_eq!(Stage::Decode.to_string(), "decode");
    }
}
