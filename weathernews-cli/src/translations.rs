use std::{fs, path::Path};

use anyhow::{Context, Result};
use weathernews_core::{Lang, Translations};

const EMBEDDED_KOREAN: &str = include_str!("../../translations/ko.json");
const FALLBACK_FILE: &str = "en.json";

/// Load the translation table for `lang`.
///
/// Looks for `<dir>/<lang>.json` first and falls back to `<dir>/en.json`.
/// Without a directory, Korean comes from the embedded table and English
/// uses the built-in strings.
pub fn load(dir: Option<&Path>, lang: Lang) -> Result<Translations> {
    let Some(dir) = dir else {
        return embedded(lang);
    };

    let path = dir.join(format!("{}.json", lang.short()));
    let path = if path.exists() {
        path
    } else {
        let fallback = dir.join(FALLBACK_FILE);
        tracing::warn!(
            missing = %path.display(),
            fallback = %fallback.display(),
            "Translation file not found; falling back"
        );
        if !fallback.exists() {
            return embedded(lang);
        }
        fallback
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read translation file: {}", path.display()))?;
    let translations = Translations::from_json_str(&contents)
        .with_context(|| format!("Failed to parse translation file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), entries = translations.len(), "Loaded translations");
    Ok(translations)
}

fn embedded(lang: Lang) -> Result<Translations> {
    match lang {
        Lang::Korean => Translations::from_json_str(EMBEDDED_KOREAN)
            .context("Failed to parse embedded Korean translations"),
        Lang::English => Ok(Translations::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_korean_is_valid() {
        let tr = load(None, Lang::Korean).unwrap();
        assert_eq!(tr.translate("no rain"), "비안옴");
    }

    #[test]
    fn english_without_dir_is_identity() {
        let tr = load(None, Lang::English).unwrap();
        assert!(tr.is_empty());
        assert_eq!(tr.translate("no rain"), "no rain");
    }

    #[test]
    fn file_in_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ko.json"), r#"{"no rain": "맑음"}"#).unwrap();

        let tr = load(Some(tmp.path()), Lang::Korean).unwrap();
        assert_eq!(tr.translate("no rain"), "맑음");
    }

    #[test]
    fn missing_language_falls_back_to_english_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("en.json"), r#"{"no rain": "dry"}"#).unwrap();

        let tr = load(Some(tmp.path()), Lang::Korean).unwrap();
        assert_eq!(tr.translate("no rain"), "dry");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("en.json"), "{not json").unwrap();

        let err = load(Some(tmp.path()), Lang::English).unwrap_err();
        assert!(err.to_string().contains("Failed to parse translation file"));
    }
}
