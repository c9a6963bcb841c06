//! Property tests: decoding is deterministic and total (no panics), and the
//! varint primitives round-trip.

use proptest::prelude::*;
use wvm_decoder::{DecodeParams, Registry};
use wvm_format::binary;

/// Order-insensitive summary of a successful parse, for equality checks
fn summary(module: &wvm_decoder::Module<'_>) -> (u32, usize, usize, usize, usize, usize) {
    (
        module.version,
        module.types.len(),
        module.imports.len(),
        module.func_count(),
        module.data.len(),
        module.custom_sections.len(),
    )
}

proptest! {
    #[test]
    fn decoding_arbitrary_bytes_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let registry = Registry::mvp().unwrap();
        let params = DecodeParams::default();
        let first = registry.decode(&bytes, &params);
        let second = registry.decode(&bytes, &params);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(summary(&a), summary(&b)),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "one parse succeeded and the other failed"),
        }
    }

    #[test]
    fn decoding_headered_garbage_never_panics(tail in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        bytes.extend_from_slice(&tail);
        let registry = Registry::mvp().unwrap();
        let _ = registry.decode(&bytes, &DecodeParams::default());
    }

    #[test]
    fn error_offsets_stay_inside_the_input(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        if let Err(err) = wvm_decoder::decode_module(&bytes) {
            prop_assert!(err.offset <= bytes.len());
        }
    }

    #[test]
    fn leb_u64_round_trips(value in any::<u64>()) {
        let encoded = binary::write_leb_u64(value);
        let (decoded, consumed) = binary::read_leb_u64(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn leb_i64_round_trips(value in any::<i64>()) {
        let encoded = binary::write_leb_i64(value);
        let (decoded, consumed) = binary::read_leb_i64(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, encoded.len());
    }
}
