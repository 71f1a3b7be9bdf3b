use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        CardError::artwork(anyhow::anyhow!("x"))
            .to_string()
            .contains("failed to load artwork:")
    );
    assert!(CardError::render("x").to_string().contains("render error:"));
}

#[test]
fn artwork_error_preserves_cause() {
    let base = std::io::Error::other("connection refused");
    let err = CardError::artwork(base);
    assert!(err.to_string().contains("connection refused"));

    let source = std::error::Error::source(&err).expect("artwork error has a source");
    assert!(source.to_string().contains("connection refused"));
}

#[test]
fn only_configuration_errors_report_as_configuration() {
    assert!(CardError::configuration("x").is_configuration());
    assert!(!CardError::render("x").is_configuration());
    assert!(!CardError::artwork(anyhow::anyhow!("x")).is_configuration());
}
