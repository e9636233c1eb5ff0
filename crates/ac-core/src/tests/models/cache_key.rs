use crate::CacheKey;

#[test]
fn test_cache_key_rejects_empty() {
    assert!(CacheKey::new("").is_none());
    assert!(CacheKey::from_type_and_id("Person", "").is_none());
    assert!(CacheKey::from_type_and_id("", "1").is_none());
}

#[test]
fn test_cache_key_default_format() {
    let key = CacheKey::from_type_and_id("Person", "7").unwrap();
    assert_eq!(key.as_str(), "Person:7");
    assert_eq!(key.to_string(), "Person:7");
}

#[test]
fn test_cache_key_deserialize_rejects_empty() {
    let result = serde_json::from_str::<CacheKey>("\"\"");
    assert!(result.is_err());

    let key: CacheKey = serde_json::from_str("\"Media:u1\"").unwrap();
    assert_eq!(key.as_str(), "Media:u1");
}
