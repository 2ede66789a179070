//! mathpulsectl command tests
//!
//! Commands run in-process against temp files; nothing reaches the network.

use mathpulse_common::dialogue::content::body;
use mathpulse_common::dialogue::{ContentKind, Topic};
use mathpulsectl::commands::{answer, config_toml};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_offline_answer_follows_history() {
    let history = temp_file(
        r#"[{"sender": "user", "message": "derivatives please"},
            {"sender": "ai", "message": "Nice! Would you like an example?"}]"#,
    );

    let reply = answer(None, "yes", Some(history.path()), true).unwrap();
    assert_eq!(reply, body(Topic::Derivatives, ContentKind::Examples));
}

#[test]
fn test_offline_answer_without_history() {
    let reply = answer(None, "give me a practice problem", None, true).unwrap();
    assert_eq!(reply, body(Topic::Derivatives, ContentKind::Practice));
}

#[test]
fn test_answer_rejects_bad_input() {
    assert!(answer(None, "   ", None, true).is_err());

    let history = temp_file("not json");
    let err = answer(None, "yes", Some(history.path()), true).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load"));
}

#[test]
fn test_config_dump_masks_token() {
    let config = temp_file(
        "[inference]\napi_token = \"hf_secret\"\n\n[server]\nbind = \"0.0.0.0:9000\"\n",
    );

    let dump = config_toml(Some(config.path())).unwrap();
    assert!(dump.contains("bind = \"0.0.0.0:9000\""));
    assert!(dump.contains("api_token = \"***\""));
    assert!(!dump.contains("hf_secret"));
}
