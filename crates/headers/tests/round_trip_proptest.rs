use micro_headers::protocol::{Header, HeaderName, HeaderValue, LineLimit, MessageHeaders};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9!#$%&'*+.^_`|~-]{0,15}").expect("name regex")
}

/// Printable ASCII without margin whitespace, which parsing strips.
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        proptest::string::string_regex("[!-~]([ -~\t]{0,38}[!-~])?").expect("value regex"),
    ]
}

/// Words joined by whitespace runs of up to three bytes, each run ending in a
/// space: foldable without loss under any limit of 22 or more.
fn words_strategy() -> impl Strategy<Value = String> {
    let word = || proptest::string::string_regex("[a-z0-9,;=]{1,8}").expect("word regex");
    let separator = proptest::string::string_regex("[ \t]{0,2} ").expect("separator regex");
    (word(), proptest::collection::vec((separator, word()), 0..24)).prop_map(|(first, rest)| {
        rest.into_iter().fold(first, |mut value, (separator, word)| {
            value.push_str(&separator);
            value.push_str(&word);
            value
        })
    })
}

fn header(name: &str, value: &str) -> Header {
    Header::new(name.parse().expect("valid name"), value.parse().expect("valid value"))
}

proptest! {
    #[test]
    fn parse_generate_round_trip(fields in proptest::collection::vec((name_strategy(), value_strategy()), 0..12)) {
        let headers: MessageHeaders = fields.iter().map(|(name, value)| header(name, value)).collect();
        let raw = headers.generate().unwrap();

        let mut parsed = MessageHeaders::new();
        let body_offset = parsed.parse(&raw).unwrap();

        prop_assert_eq!(body_offset, raw.len());
        prop_assert_eq!(parsed.len(), fields.len());
        for (header, (name, value)) in parsed.iter().zip(&fields) {
            prop_assert_eq!(header.name().as_str(), name.as_str());
            prop_assert_eq!(header.value().as_bytes(), value.as_bytes());
        }
    }

    #[test]
    fn folded_lines_respect_limit(name in "[A-Za-z]{1,8}", value in words_strategy(), limit in 22_usize..80) {
        let mut headers = MessageHeaders::with_line_limit(LineLimit::new(limit));
        headers.add_one(HeaderName::from_bytes(name.as_bytes()).unwrap(), HeaderValue::from_bytes(value.as_bytes()).unwrap());

        let raw = headers.generate().unwrap();
        for line in raw.split_inclusive(|b| *b == b'\n') {
            prop_assert!(line.len() <= limit, "line {:?} exceeds {}", line, limit);
        }

        let mut parsed = MessageHeaders::with_line_limit(LineLimit::new(limit));
        parsed.parse(&raw).unwrap();
        let got = parsed.get(&name).unwrap();
        prop_assert_eq!(got.as_bytes(), value.as_bytes());
    }

    #[test]
    fn get_all_preserves_order(values in proptest::collection::vec(value_strategy(), 0..8)) {
        let mut headers = MessageHeaders::new();
        for (index, value) in values.iter().enumerate() {
            headers.add_one(HeaderName::from_static("Via"), value.parse().unwrap());
            headers.add_one(HeaderName::from_static("Seq"), HeaderValue::from(index));
        }

        let collected: Vec<&[u8]> = headers.get_all("via").map(HeaderValue::as_bytes).collect();
        let expected: Vec<&[u8]> = values.iter().map(String::as_bytes).collect();
        prop_assert_eq!(collected, expected);
        prop_assert_eq!(headers.get("VIA").is_some(), !values.is_empty());
    }
}
