use lx::parse::{extract_positions, parse_locale_source, FallbackParser, JsonParser, LocaleFormat, YamlParser};
use lx::IndexError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_integration_parse_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "
section:
  subsection:
    key: value
"
    )
    .unwrap();

    let entries = YamlParser::parse_file(file.path()).unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.key, "section.subsection.key");
    assert_eq!(entry.value, "value");
    assert_eq!(entry.line, Some(4));
}

#[test]
fn test_parse_file_missing() {
    let result = YamlParser::parse_file(Path::new("/definitely/not/here/en.yml"));
    assert!(matches!(result, Err(IndexError::Read { .. })));
}

#[test]
fn test_position_extraction() {
    let positions = extract_positions("a:\n  b: hello\n");
    assert_eq!(positions.exact("a.b"), Some(2));
    assert_eq!(positions.exact("a"), None);
}

#[test]
fn test_rails_style_file() {
    let content = "\
# Rails locale
en:
  activerecord:
    attributes:
      user:
        email: \"E-mail\"
        password: Password
  date:
    formats:
      short: \"%b %d\"
  notice: |
    Line one
    Line two
  empty:
  numbers:
    - one
    - two
";
    let entries =
        YamlParser::parse_str(content, Path::new("config/locales/en.yml"), None).unwrap();

    let get = |key: &str| entries.iter().find(|e| e.key == key);
    assert!(entries.iter().all(|e| e.language.as_deref() == Some("en")));
    assert_eq!(get("activerecord.attributes.user.email").unwrap().line, Some(6));
    assert_eq!(get("activerecord.attributes.user.password").unwrap().value, "Password");
    assert_eq!(get("date.formats.short").unwrap().value, "%b %d");
    assert_eq!(get("notice").unwrap().value, "Line one\nLine two\n");
    assert_eq!(get("notice").unwrap().line, Some(11));
    // null values and arrays are not entries
    assert!(get("empty").is_none());
    assert!(get("numbers").is_none());
    assert_eq!(entries.len(), 4);
}

#[test]
fn test_parse_locale_source_falls_back_for_yaml() {
    let content = "en:\n  ok: Fine\n  bad: \"unterminated\n";
    let entries = parse_locale_source(content, Path::new("en.yml"), LocaleFormat::Yaml, None);

    let ok = entries.iter().find(|e| e.key == "en.ok").unwrap();
    assert_eq!(ok.value, "Fine");
    assert_eq!(ok.line, Some(2));
}

#[test]
fn test_parse_locale_source_skips_broken_json() {
    let entries = parse_locale_source(
        "{\"en\": {\"a\": ",
        Path::new("en.json"),
        LocaleFormat::Json,
        None,
    );
    assert!(entries.is_empty());
}

#[test]
fn test_json_with_comments() {
    let content = r#"{
  /* shared strings */
  "en": {
    "nav": {
      "home": "Home", // inline
      "count": 2
    }
  }
}"#;
    let entries = JsonParser::parse_str(content, Path::new("messages.json"), None).unwrap();

    assert_eq!(entries.len(), 2);
    let home = entries.iter().find(|e| e.key == "nav.home").unwrap();
    assert_eq!(home.value, "Home");
    assert_eq!(home.language.as_deref(), Some("en"));
    assert_eq!(home.line, Some(5));
    assert_eq!(entries.iter().find(|e| e.key == "nav.count").unwrap().value, "2");
}

#[test]
fn test_fallback_keeps_well_formed_sibling() {
    let content = "\
ko:
  broken:
    title: [oops
  good:
    hello: 안녕
";
    let entries = FallbackParser::parse(content, Path::new("ko.yml"), None);
    let hello = entries.iter().find(|e| e.key == "ko.good.hello").unwrap();
    assert_eq!(hello.value, "안녕");
    assert_eq!(hello.language.as_deref(), Some("ko"));
    assert_eq!(hello.line, Some(5));
}

#[test]
fn test_locale_format_from_path() {
    assert_eq!(LocaleFormat::from_path(Path::new("en.yml")), Some(LocaleFormat::Yaml));
    assert_eq!(LocaleFormat::from_path(Path::new("en.YAML")), Some(LocaleFormat::Yaml));
    assert_eq!(LocaleFormat::from_path(Path::new("en.json")), Some(LocaleFormat::Json));
    assert_eq!(LocaleFormat::from_path(Path::new("en.js")), None);
    assert_eq!(LocaleFormat::from_path(Path::new("Makefile")), None);
}
