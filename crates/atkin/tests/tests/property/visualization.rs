//! Property tests: text grid shape, raster contents and base64/binary agreement.

use atkin_core::{render, Visualization, VisualizationFormat};
use atkin_tests::{expected_side, is_prime_by_trial_division};
use base64::Engine;
use proptest::prelude::*;

fn binary(limit: u64) -> Vec<u8> {
    match render(limit as i64, VisualizationFormat::BinaryImage).unwrap() {
        Visualization::Binary(image) => image.into_bytes(),
        other => panic!("expected binary output, got {:?}", other.format()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// `ceil((limit + 1) / side)` lines, all but the last exactly `side` glyphs wide.
    #[test]
    fn text_grid_shape(limit in 0u64..3_000) {
        let text = render(limit as i64, VisualizationFormat::Text).unwrap();
        let text = text.as_text().unwrap();
        let side = expected_side(limit) as usize;
        let len = limit as usize + 1;

        let lines: Vec<&str> = text.split('\n').collect();
        prop_assert_eq!(lines.len(), len.div_ceil(side));
        for line in &lines[..lines.len() - 1] {
            prop_assert_eq!(line.chars().count(), side);
        }
        let total: usize = lines.iter().map(|l| l.chars().count()).sum();
        prop_assert_eq!(total, len);
    }

    /// Filled glyphs sit exactly on the prime indices.
    #[test]
    fn text_glyphs_mark_primes(limit in 0u64..2_000) {
        let text = render(limit as i64, VisualizationFormat::Text).unwrap();
        let glyphs = text.as_text().unwrap().chars().filter(|&c| c != '\n');
        for (index, glyph) in glyphs.enumerate() {
            prop_assert_eq!(glyph == '█', is_prime_by_trial_division(index as u64));
        }
    }

    /// Decoding the base64 output yields the binary output byte for byte.
    #[test]
    fn base64_decodes_to_binary(limit in 0u64..4_000) {
        let encoded = render(limit as i64, VisualizationFormat::Base64Image).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_text().unwrap())
            .unwrap();
        prop_assert_eq!(decoded, binary(limit));
    }

    /// The PNG decodes to a `side × side` grayscale raster with dark prime pixels.
    #[test]
    fn png_pixels_mark_primes(limit in 0u64..2_500) {
        let bytes = binary(limit);
        let mut reader = png::Decoder::new(bytes.as_slice()).read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();

        let side = expected_side(limit) as u32;
        prop_assert_eq!(info.width, side);
        prop_assert_eq!(info.height, side);
        for (index, &pixel) in pixels[..info.buffer_size()].iter().enumerate() {
            prop_assert_eq!(pixel == 0, is_prime_by_trial_division(index as u64));
        }
    }

    /// Same limit, same bytes.
    #[test]
    fn rendering_is_deterministic(limit in 0u64..2_000) {
        prop_assert_eq!(binary(limit), binary(limit));
    }
}
