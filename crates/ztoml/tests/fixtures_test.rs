//! Fixture-directory conformance walk

use std::fs;

use ztoml::parse_str;

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if let Err(err) = parse_str(&content) {
            return Err(std::io::Error::other(format!(
                "failed to parse valid fixture {path:?}: {err}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let invalid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid");
    for entry in fs::read_dir(invalid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if parse_str(&content).is_ok() {
            return Err(std::io::Error::other(format!(
                "invalid fixture parsed successfully: {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_valid_fixtures_emit_stably() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let content = fs::read_to_string(entry.path())?;
        let first = parse_str(&content).map(|root| ztoml::to_json(&root));
        let second = parse_str(&content).map(|root| ztoml::to_json(&root));
        match (first, second) {
            (Ok(a), Ok(b)) if a == b => {}
            other => {
                return Err(std::io::Error::other(format!(
                    "unstable emission for {:?}: {other:?}",
                    entry.path()
                ))
                .into());
            }
        }
    }
    Ok(())
}
