//! Property tests across the public API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proptest::prelude::*;

use blueprint::{
    decode_blueprint, encode_blueprint, encode_blueprint_with_options, from_base64,
    guess_encoding, to_base64, try_from_base64, Blueprint, Buffer, EncodeOptions, Encoding, Object,
    Text,
};

fn arb_blueprint() -> impl Strategy<Value = Blueprint> {
    let leaf = prop_oneof![
        Just(Blueprint::Null),
        any::<bool>().prop_map(Blueprint::Boolean),
        any::<i64>().prop_map(Blueprint::Integer),
        any::<f64>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(Blueprint::FloatingPoint),
        ".{0,12}".prop_map(Blueprint::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Blueprint::Array),
            prop::collection::vec(("[a-z]{0,6}", inner), 0..8)
                .prop_map(|entries| Blueprint::Object(entries.into_iter().collect())),
        ]
    })
}

/// Changes every node of `value` in place.
fn mutate_everywhere(value: &mut Blueprint) {
    match value {
        Blueprint::Array(children) => {
            children.iter_mut().for_each(mutate_everywhere);
            children.push(Blueprint::Invalid);
        }
        Blueprint::Object(children) => {
            children.values_mut().for_each(mutate_everywhere);
            children.insert("__added".into(), Blueprint::Invalid);
        }
        other => {
            other.set_to_string("mutated beyond generated range");
        }
    }
}

proptest! {
    #[test]
    fn prop_set_size_preserves_prefix(bytes in prop::collection::vec(any::<u8>(), 0..64), n in 0usize..200) {
        let mut buffer = Buffer::from(bytes.as_slice());
        buffer.set_size(n);
        prop_assert_eq!(buffer.size(), n);

        let kept = n.min(bytes.len());
        prop_assert_eq!(&buffer.as_slice()[..kept], &bytes[..kept]);
        prop_assert!(buffer.as_slice()[kept..].iter().all(|b| *b == 0));
    }

    #[test]
    fn prop_base64_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
        let encoded = to_base64(&bytes);
        prop_assert_eq!(&encoded, &STANDARD.encode(&bytes));
        let decoded = from_base64(&encoded);
        prop_assert_eq!(decoded.as_slice(), bytes.as_slice());
        prop_assert_eq!(try_from_base64(&encoded).unwrap().into_vec(), bytes);
    }

    #[test]
    fn prop_utf16_roundtrip(s in any::<String>()) {
        let text = Text::from(s.as_str());
        let units = text.to_utf16();
        prop_assert_eq!(&units, &s.encode_utf16().collect::<Vec<u16>>());

        let back = Text::try_from_utf16(&units).unwrap();
        prop_assert_eq!(back.as_str(), s.as_str());
        let from32 = Text::from_utf32(&text.to_utf32());
        prop_assert_eq!(from32.as_str(), s.as_str());
    }

    #[test]
    fn prop_byte_encodings_roundtrip(s in any::<String>()) {
        prop_assume!(!s.starts_with('\u{feff}'));
        let text = Text::from(s.as_str());
        for encoding in [
            Encoding::Utf8,
            Encoding::Utf16Little,
            Encoding::Utf16Big,
            Encoding::Utf32Little,
            Encoding::Utf32Big,
        ] {
            let bytes = text.to_bytes(encoding);
            let decoded = Text::from_bytes(bytes.as_slice(), encoding);
            prop_assert_eq!(decoded.as_str(), s.as_str());
        }
    }

    #[test]
    fn prop_set_to_array_replaces_any_payload(mut value in arb_blueprint()) {
        value.set_to_array();
        prop_assert!(value.is_array());
        prop_assert!(!value.is_string());
        prop_assert!(!value.is_object());
        prop_assert_eq!(value.len(), 0);
    }

    #[test]
    fn prop_deep_copy_is_independent(original in arb_blueprint()) {
        let before = encode_blueprint(&original).unwrap();

        let mut copy = original.clone();
        mutate_everywhere(&mut copy);

        prop_assert_ne!(&copy, &original);
        prop_assert_eq!(encode_blueprint(&original).unwrap(), before);
    }

    #[test]
    fn prop_binary_roundtrip(value in arb_blueprint()) {
        let encoded = encode_blueprint(&value).unwrap();
        prop_assert_eq!(decode_blueprint(&encoded).unwrap(), value.clone());

        let canonical = encode_blueprint_with_options(&value, EncodeOptions::canonical()).unwrap();
        prop_assert_eq!(decode_blueprint(&canonical).unwrap(), value);
    }

    #[test]
    fn prop_canonical_ignores_insertion_order(
        entries in prop::collection::vec(("[a-z]{1,6}", arb_blueprint()), 0..8)
    ) {
        let forward: Object = entries.iter().cloned().collect();
        let reversed: Object = forward.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
        let forward = Blueprint::Object(forward);
        let reversed = Blueprint::Object(reversed);

        prop_assert_eq!(&forward, &reversed);
        prop_assert_eq!(
            encode_blueprint_with_options(&forward, EncodeOptions::canonical()).unwrap(),
            encode_blueprint_with_options(&reversed, EncodeOptions::canonical()).unwrap()
        );
    }

    #[test]
    fn prop_cursor_symmetry(s in ".{0,24}", k in 0usize..32) {
        let text = Text::from(s.as_str());
        let len = text.len();
        prop_assert_eq!(text.end() - text.begin(), len as isize);

        let moved = text.begin() + k;
        prop_assert_eq!(moved - text.begin(), k.min(len) as isize);
        prop_assert!((moved - k) == text.begin());

        let mut cursor = text.end();
        let mut backwards = Vec::new();
        while cursor.step_back() {
            backwards.extend(cursor.get());
        }
        backwards.reverse();
        prop_assert_eq!(backwards.into_iter().collect::<String>(), s);
    }
}

#[test]
fn test_bmp_roundtrip_through_utf16() {
    let s: String = (0u32..=0xFFFF).filter_map(char::from_u32).collect();
    let text = Text::from(s.as_str());
    let back = Text::from_utf16(&text.to_utf16());
    assert_eq!(back.as_str().as_bytes(), s.as_bytes());
}

#[test]
fn test_surrogate_pair_roundtrip() {
    let text = Text::from("\u{1F600}\u{10000}\u{10FFFF}");
    let units = text.to_utf16();
    assert_eq!(units, [0xD83D, 0xDE00, 0xD800, 0xDC00, 0xDBFF, 0xDFFF]);
    assert_eq!(Text::from_utf16(&units), text);
}

#[test]
fn test_guess_encoding_scenarios() {
    assert_eq!(guess_encoding(&[0xEF, 0xBB, 0xBF, 0x41, 0x42]), Encoding::Utf8);
    assert_eq!(guess_encoding(&[0x48, 0x65, 0x6C, 0x6C, 0x6F]), Encoding::Ascii);
    assert_eq!(guess_encoding(&[0xFF]), Encoding::Unknown);
}

#[test]
fn test_base64_scenarios() {
    assert_eq!(to_base64(&[0x4D, 0x61, 0x6E]), "TWFu");
    assert_eq!(to_base64(&[0x4D]), "TQ==");
    assert_eq!(to_base64(&[0x4D, 0x61]), "TWE=");
    assert_eq!(from_base64("TQ==").as_slice(), &[0x4D]);
}

#[test]
fn test_blueprint_scenario() {
    let mut value = Blueprint::default();
    assert!(value.is_invalid());

    value.set_to_integer(42);
    assert!(value.is_integer());
    assert_eq!(value.as_integer(), 42);
    assert!(value.as_string().is_none());
    assert_eq!(value.as_str(), "");
}
