use licensefile::{LicenseError, Stage};

#[test]
fn error_display_config() {
    let err = LicenseError::Config("public key is required".into());
    let msg = format!("{err}");
    assert!(msg.contains("configuration"));
    assert!(msg.contains("public key is required"));
}

#[test]
fn error_display_malformed_artifact() {
    let err = LicenseError::MalformedArtifact("invalid base64".into());
    assert!(format!("{err}").contains("malformed license file: invalid base64"));
}

#[test]
fn error_display_unsupported_algorithm() {
    let err = LicenseError::UnsupportedAlgorithm("rsa".into());
    let msg = format!("{err}");
    assert!(msg.contains("not supported"));
    assert!(msg.contains("rsa"));
}

#[test]
fn error_display_invalid_signature() {
    let err = LicenseError::InvalidSignature;
    assert!(format!("{err}").contains("signature"));
}

#[test]
fn error_display_malformed_ciphertext() {
    let err = LicenseError::MalformedCiphertext("expected 3 segments, found 2".into());
    assert!(format!("{err}").contains("ciphertext"));
}

#[test]
fn error_display_decryption_failed() {
    assert_eq!(
        LicenseError::DecryptionFailed.to_string(),
        "license file decryption failed"
    );
}

#[test]
fn error_display_malformed_claims() {
    let err = LicenseError::MalformedClaims("missing field `meta`".into());
    assert!(format!("{err}").contains("claims"));
}

#[test]
fn error_display_window_names_bound() {
    let not_yet = LicenseError::NotYetValid {
        issued: "2030-01-01T00:00:00Z".into(),
    };
    assert!(format!("{not_yet}").contains("not valid until 2030-01-01T00:00:00Z"));

    let expired = LicenseError::Expired {
        expiry: "2020-01-01T00:00:00Z".into(),
    };
    let msg = format!("{expired}");
    assert!(msg.contains("expired"));
    assert!(msg.contains("2020-01-01T00:00:00Z"));
}

#[test]
fn error_stages() {
    assert_eq!(LicenseError::Config(String::new()).stage(), Stage::Config);
    assert_eq!(LicenseError::MalformedArtifact(String::new()).stage(), Stage::Parse);
    assert_eq!(LicenseError::UnsupportedAlgorithm(String::new()).stage(), Stage::Parse);
    assert_eq!(LicenseError::InvalidSignature.stage(), Stage::Verify);
    assert_eq!(LicenseError::MalformedCiphertext(String::new()).stage(), Stage::Decrypt);
    assert_eq!(LicenseError::DecryptionFailed.stage(), Stage::Decrypt);
    assert_eq!(LicenseError::MalformedClaims(String::new()).stage(), Stage::Validate);
    assert_eq!(
        LicenseError::Expired { expiry: String::new() }.stage(),
        Stage::Validate
    );
}

#[test]
fn stage_display() {
    assert_eq!(Stage::Verify.to_string(), "verify");
    assert_eq!(Stage::Decrypt.as_str(), "decrypt");
}

#[test]
fn error_is_debug() {
    let err = LicenseError::InvalidSignature;
    let _ = format!("{err:?}");
}
