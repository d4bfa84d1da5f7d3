use crate::LangOptions;

#[test]
fn defaults_to_c() {
    assert_eq!(LangOptions::default(), LangOptions::c());
    assert!(!LangOptions::c().cplusplus);
}

#[test]
fn deserializes_partial_json() {
    let opts: LangOptions = serde_json::from_str(r#"{"cplusplus": true}"#).unwrap();

    assert_eq!(opts, LangOptions::cxx());
}
