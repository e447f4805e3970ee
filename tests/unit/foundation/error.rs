use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlyerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FlyerError::render("x").to_string().contains("render error:"));
    assert!(
        FlyerError::archive("x")
            .to_string()
            .contains("archive error:")
    );
    assert!(
        FlyerError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlyerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
