use pfo_utils::seed_from_str;

#[test]
fn test_seed_from_str() {
    assert_eq!(seed_from_str("portfolio"), seed_from_str("portfolio"));
    assert_ne!(seed_from_str("portfolio"), seed_from_str("portfolio2"));
    assert_eq!(
        seed_from_str(""),
        *blake3::hash(b"").as_bytes()
    );
}
