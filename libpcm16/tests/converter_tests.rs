//! Sample and block conversion tests
use libpcm16_audio::{
    convert_block, convert_into, convert_sample, pcm16_to_f32, port, process_single_channel,
    AudioProcessor, SampleConverter,
};

// ============================================================================
// Per-sample rule
// ============================================================================

#[test]
fn test_full_scale_and_zero() {
    assert_eq!(convert_sample(-1.0), -32768);
    assert_eq!(convert_sample(1.0), 32767);
    assert_eq!(convert_sample(0.0), 0);
}

#[test]
fn test_out_of_range_clamps() {
    assert_eq!(convert_sample(2.0), 32767);
    assert_eq!(convert_sample(-2.0), -32768);
    assert_eq!(convert_sample(f32::INFINITY), 32767);
    assert_eq!(convert_sample(f32::NEG_INFINITY), -32768);
    assert_eq!(convert_sample(f32::MAX), 32767);
    assert_eq!(convert_sample(f32::MIN), -32768);
}

#[test]
fn test_scaling_is_asymmetric() {
    assert_eq!(convert_sample(-0.5), -16384);
    assert_eq!(convert_sample(0.5), 16383);
    assert_eq!(convert_sample(-0.25), -8192);
    assert_eq!(convert_sample(0.25), 8191);
}

#[test]
fn test_truncates_toward_zero() {
    // 0.5 * 32767 = 16383.5, rounding would give 16384
    assert_eq!(convert_sample(0.5), 16383);
    // just below full scale must not round up to 32767
    assert_eq!(convert_sample(0.999_999_9), 32766);
    // tiny values truncate to zero from both sides
    assert_eq!(convert_sample(1.0e-6), 0);
    assert_eq!(convert_sample(-1.0e-6), 0);
    // -1/32768 is exact, one step further is not
    assert_eq!(convert_sample(-1.0 / 32768.0), -1);
    assert_eq!(convert_sample(-1.5 / 32768.0), -1);
}

#[test]
fn test_negative_zero_and_nan() {
    assert_eq!(convert_sample(-0.0), 0);
    assert_eq!(convert_sample(f32::NAN), 0);
}

#[test]
fn test_range_sweep_stays_in_bounds() {
    // i16 is always in range, so check monotonicity and sign instead
    let mut prev = i16::MIN;
    for i in 0..=20000 {
        let x = -1.0 + i as f32 * (2.0 / 20000.0);
        let y = convert_sample(x);
        assert!(y >= prev, "not monotonic at {}: {} < {}", x, y, prev);
        if x < 0.0 {
            assert!(y <= 0, "negative input {} gave {}", x, y);
        } else {
            assert!(y >= 0, "non-negative input {} gave {}", x, y);
        }
        prev = y;
    }
}

#[test]
fn test_inverse_is_close() {
    for &x in &[-1.0f32, -0.75, -0.1, 0.0, 0.1, 0.75, 1.0] {
        let back = pcm16_to_f32(convert_sample(x));
        assert!((back - x).abs() < 1.0 / 16384.0, "{} came back as {}", x, back);
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[test]
fn test_reference_block() {
    let block = convert_block(&[-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert_eq!(block.samples(), &[-32768, -16384, 0, 16383, 32767]);
}

#[test]
fn test_block_length_matches_input() {
    for len in [0usize, 1, 127, 128, 129, 4096] {
        let input = vec![0.3f32; len];
        assert_eq!(convert_block(&input).len(), len);
    }
}

#[test]
fn test_block_conversion_is_deterministic() {
    let input: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.37).sin() * 1.3).collect();
    let a = convert_block(&input);
    let b = convert_block(&input);
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_byte_view_is_native_endian() {
    let block = convert_block(&[1.0, -1.0]);
    assert_eq!(block.byte_len(), 4);
    let mut expected = Vec::new();
    expected.extend_from_slice(&32767i16.to_ne_bytes());
    expected.extend_from_slice(&(-32768i16).to_ne_bytes());
    assert_eq!(block.as_bytes(), expected.as_slice());
}

#[test]
fn test_convert_into_uses_shorter_length() {
    let mut out = [7i16; 3];
    assert_eq!(convert_into(&[1.0, -1.0, 0.5, 0.5], &mut out), 3);
    assert_eq!(out, [32767, -32768, 16383]);

    let mut long = [7i16; 4];
    assert_eq!(convert_into(&[0.0], &mut long), 1);
    assert_eq!(long, [0, 7, 7, 7]);
}

#[test]
fn test_convert_into_matches_convert_block() {
    let input: Vec<f32> = (0..128).map(|i| i as f32 / 64.0 - 1.0).collect();
    let mut out = vec![0i16; input.len()];
    convert_into(&input, &mut out);
    assert_eq!(out, convert_block(&input).into_samples());
}

// ============================================================================
// SampleConverter as a processor
// ============================================================================

#[test]
fn test_process_emits_first_channel_only() {
    let (tx, rx) = port::channel(4);
    let mut converter = SampleConverter::new(tx);

    let left = [0.5f32, -0.5];
    let right = [1.0f32, 1.0];
    let other = [-1.0f32, -1.0];
    let first: [&[f32]; 2] = [&left, &right];
    let second: [&[f32]; 1] = [&other];

    assert!(converter.process(&[&first, &second]));

    let block = rx.try_recv().expect("a block");
    assert_eq!(block.samples(), &[16383, -16384]);
    assert!(rx.try_recv().is_none());
}

#[test]
fn test_process_without_channels_emits_nothing() {
    let (tx, rx) = port::channel(4);
    let mut converter = SampleConverter::new(tx);

    let empty: [&[f32]; 0] = [];
    assert!(converter.process(&[&empty]));
    assert!(converter.process(&[]));

    assert!(rx.try_recv().is_none());
    assert_eq!(rx.stats().posted, 0);
    assert_eq!(rx.stats().dropped, 0);
}

#[test]
fn test_process_ignores_second_input_when_first_is_empty() {
    let (tx, rx) = port::channel(4);
    let mut converter = SampleConverter::new(tx);

    let empty: [&[f32]; 0] = [];
    let samples = [1.0f32; 8];
    let connected: [&[f32]; 1] = [&samples];

    assert!(converter.process(&[&empty, &connected]));
    assert!(rx.try_recv().is_none());
}

#[test]
fn test_process_keeps_going_when_port_is_full() {
    let (tx, rx) = port::channel(1);
    let mut converter = SampleConverter::new(tx);
    let samples = [0.1f32; 16];
    let input: [&[f32]; 1] = [&samples];

    for _ in 0..5 {
        assert!(converter.process(&[&input]));
    }

    let stats = rx.stats();
    assert_eq!(stats.posted, 1);
    assert_eq!(stats.dropped, 4);
    assert_eq!(rx.drain().len(), 1);
}

#[test]
fn test_process_keeps_going_after_listener_leaves() {
    let (tx, rx) = port::channel(8);
    let mut converter = SampleConverter::new(tx);
    drop(rx);

    let samples = [0.1f32; 16];
    let input: [&[f32]; 1] = [&samples];
    assert!(converter.process(&[&input]));
    assert_eq!(converter.port().stats().dropped, 1);
}

#[test]
fn test_empty_channel_still_emits_empty_block() {
    let (tx, rx) = port::channel(2);
    let mut converter = SampleConverter::new(tx);
    let samples: [f32; 0] = [];
    let input: [&[f32]; 1] = [&samples];

    assert!(converter.process(&[&input]));
    assert!(rx.try_recv().expect("a block").is_empty());
}

#[test]
fn test_single_channel_call_converts_that_channel() {
    let (tx, rx) = port::channel(4);
    let mut converter = SampleConverter::new(tx);
    let samples = [0.5f32, -0.5, 1.0, -1.0];

    // the same scratch buffer reused across callbacks
    let mut scratch = Vec::new();
    for _ in 0..2 {
        scratch.clear();
        scratch.extend_from_slice(&samples);
        assert!(process_single_channel(&mut converter, Some(scratch.as_slice())));
    }

    let blocks = rx.drain();
    assert_eq!(blocks.len(), 2);
    for block in blocks {
        assert_eq!(block, convert_block(&samples));
    }
}

#[test]
fn test_single_channel_call_without_channel_emits_nothing() {
    let (tx, rx) = port::channel(4);
    let mut converter = SampleConverter::new(tx);

    assert!(process_single_channel(&mut converter, None));
    assert!(rx.try_recv().is_none());
    assert_eq!(rx.stats().posted, 0);
}
