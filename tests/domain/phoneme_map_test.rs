use speechlens::domain::{PHONEME_NOT_FOUND, PhonemeMap, Pronunciations};

#[test]
fn given_empty_lookup_when_converting_then_is_not_found() {
    assert_eq!(Pronunciations::from_lookup(Vec::new()), Pronunciations::NotFound);
    assert!(Pronunciations::NotFound.phones().is_empty());
}

#[test]
fn given_map_with_unknown_word_when_serialized_then_renders_sentinel_string() {
    let mut map = PhonemeMap::new();
    map.insert(
        "hello".to_string(),
        Pronunciations::from_lookup(vec!["HH AH0 L OW1".to_string()]),
    );
    map.insert("qwzx".to_string(), Pronunciations::NotFound);

    let json: serde_json::Value = serde_json::from_str(&map.to_pretty_json()).unwrap();

    assert_eq!(json["hello"], serde_json::json!(["HH AH0 L OW1"]));
    assert_eq!(json["qwzx"], PHONEME_NOT_FOUND);
    assert_eq!(map.not_found_count(), 1);
}

#[test]
fn given_words_inserted_out_of_order_when_iterating_then_keys_are_sorted() {
    let mut map = PhonemeMap::new();
    map.insert("zebra".to_string(), Pronunciations::NotFound);
    map.insert("apple".to_string(), Pronunciations::NotFound);

    let words: Vec<&str> = map.words().collect();

    assert_eq!(words, vec!["apple", "zebra"]);
}

#[test]
fn given_empty_map_when_rendered_then_is_empty_object() {
    assert_eq!(PhonemeMap::new().to_pretty_json(), "{}");
}
