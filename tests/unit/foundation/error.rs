use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SheenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SheenError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(SheenError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SheenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
