//! End-to-end tests of the library API on dictionary-style word lists.

use std::io::Cursor;

use pfc::{
    compress, compress_all, compress_stream, expand, expand_all, expand_stream, CodecError,
    SymbolAlphabet,
};

fn dictionary() -> Vec<String> {
    let mut words: Vec<String> = ["nation", "national", "nationalism", "nationalist", "nations"]
        .iter()
        .flat_map(|w| [w.to_string(), format!("inter{w}"), format!("un{w}")])
        .chain(std::iter::once("internationalization-and-localization".to_string()))
        .chain(std::iter::once("internationalization-and-localisation".to_string()))
        .collect();
    words.sort();
    words
}

#[test]
fn test_dictionary_roundtrip() {
    let words = dictionary();
    let codes = compress_all(&words, SymbolAlphabet::DEFAULT).unwrap();

    assert_eq!(codes.len(), words.len());
    assert_eq!(expand_all(&codes, SymbolAlphabet::DEFAULT).unwrap(), words);
}

#[test]
fn test_dictionary_shrinks() {
    let words = dictionary();
    let codes = compress_all(&words, SymbolAlphabet::DEFAULT).unwrap();

    let original: usize = words.iter().map(String::len).sum();
    let compressed: usize = codes.iter().map(String::len).sum();
    assert!(compressed < original);
}

#[test]
fn test_prefix_beyond_max_is_written_literally() {
    let words = dictionary();
    let codes = compress_all(&words, SymbolAlphabet::DEFAULT).unwrap();

    let i = words
        .iter()
        .position(|w| w == "internationalization-and-localization")
        .unwrap();
    // 31 characters shared with "...localisation", only 25 reused
    assert_eq!(codes[i], "Zlocalization");
}

#[test]
fn test_lazy_pipeline_matches_collected() {
    let words = dictionary();
    let codes = compress(words.iter(), SymbolAlphabet::DEFAULT).map(Result::unwrap);
    let roundtrip: Vec<String> = expand(codes, SymbolAlphabet::DEFAULT)
        .collect::<pfc::Result<_>>()
        .unwrap();
    assert_eq!(roundtrip, words);
}

#[test]
fn test_independent_streams_do_not_interact() {
    let first = "apple\napplet\n";
    let second = "applet\napply\n";

    let mut out_first = Vec::new();
    let mut out_second = Vec::new();
    compress_stream(Cursor::new(first), &mut out_first, SymbolAlphabet::DEFAULT).unwrap();
    compress_stream(Cursor::new(second), &mut out_second, SymbolAlphabet::DEFAULT).unwrap();

    assert_eq!(String::from_utf8(out_first).unwrap(), "Aapple\nFt\n");
    assert_eq!(String::from_utf8(out_second).unwrap(), "Aapplet\nEy\n");
}

#[test]
fn test_mismatched_alphabet_is_detected() {
    let codes = compress_all(["abate", "abatement"], SymbolAlphabet::DEFAULT).unwrap();
    let digits = SymbolAlphabet::new('0', 9).unwrap();

    let err = expand_all(&codes, digits).unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(matches!(
        err.codec_error(),
        Some(CodecError::InvalidSymbol { symbol: 'A', first: '0', last: '9' })
    ));

    let mut out = Vec::new();
    let err = expand_stream(Cursor::new("Aabate\n"), &mut out, digits).unwrap_err();
    assert_eq!(err.line(), Some(1));
}
