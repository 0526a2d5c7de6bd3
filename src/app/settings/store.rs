// Settings store: data type, global state, load/save.

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::localization::SupportedLang;

fn default_endpoint() -> String {
    crate::api::POSTS_URL.to_string()
}

fn default_window_title() -> String {
    "projeto3-revisando".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("log.txt")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    // URL the post list reads from
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    // Blank means the translated default title
    #[serde(default = "default_window_title")]
    pub window_title: String,
    // Warn+ log lines are appended here
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    // UI language (None = system). Stored as "en"/"pt" or null.
    #[serde(
        default,
        serialize_with = "serialize_language_opt",
        deserialize_with = "deserialize_language_opt"
    )]
    pub language: Option<SupportedLang>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            window_title: default_window_title(),
            log_file: default_log_file(),
            language: None,
        }
    }
}

fn deserialize_language_opt<'de, D>(deserializer: D) -> Result<Option<SupportedLang>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    // "auto" or anything unknown means: follow the system locale
    Ok(opt.and_then(|s| SupportedLang::from_code(&s)))
}

fn serialize_language_opt<S>(value: &Option<SupportedLang>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(lang) => serializer.serialize_some(lang.code()),
        None => serializer.serialize_none(),
    }
}

lazy_static! {
    pub static ref APP_SETTINGS: RwLock<AppSettings> = RwLock::new(AppSettings::default());
}

/// settings.json in the working directory; POSTS_SETTINGS_PATH overrides it.
pub fn settings_file_path() -> PathBuf {
    if let Ok(p) = std::env::var("POSTS_SETTINGS_PATH") {
        return PathBuf::from(p);
    }
    PathBuf::from("settings.json")
}

impl AppSettings {
    /// Configured title, or the translated `app-window-title` when blank.
    pub fn resolved_window_title(&self) -> String {
        let title = self.window_title.trim();
        if title.is_empty() {
            crate::localization::translate("app-window-title")
        } else {
            title.to_string()
        }
    }

    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let s: AppSettings = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(s)
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}

pub fn load_settings_from_disk() {
    let path = settings_file_path();
    match AppSettings::load_from_file(&path) {
        Ok(s) => {
            *APP_SETTINGS.write().unwrap_or_else(|e| e.into_inner()) = s;
            log::info!("Loaded settings from {}", path.to_string_lossy());
        }
        Err(e) => {
            // Keep defaults if missing/unreadable
            log::info!(
                "Using default settings; cannot load {}: {}",
                path.to_string_lossy(),
                e
            );
        }
    }
}

pub fn save_settings_to_disk() {
    let path = settings_file_path();
    let st = super::with_settings(|s| s.clone());
    if let Err(e) = st.save_to_file(&path) {
        log::error!(
            "Failed to save settings to {}: {}",
            path.to_string_lossy(),
            e
        );
    } else {
        log::info!("Saved settings to {}", path.to_string_lossy());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, AppSettings::default());
        assert_eq!(s.endpoint, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(s.log_file, PathBuf::from("log.txt"));
    }

    #[test]
    fn log_file_is_read_from_json() {
        let s: AppSettings = serde_json::from_str(r#"{"log_file": "logs/posts.log"}"#).unwrap();
        assert_eq!(s.log_file, PathBuf::from("logs/posts.log"));
        assert_eq!(s.window_title, "projeto3-revisando");
    }

    #[test]
    fn blank_window_title_uses_translation() {
        crate::localization::set_current_language(SupportedLang::English).unwrap();
        let s = AppSettings {
            window_title: "  ".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(s.resolved_window_title(), "projeto3-revisando");

        let s = AppSettings {
            window_title: "Mural".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(s.resolved_window_title(), "Mural");
    }

    #[test]
    fn unknown_language_means_system() {
        let s: AppSettings = serde_json::from_str(r#"{"language": "auto"}"#).unwrap();
        assert_eq!(s.language, None);
        let s: AppSettings = serde_json::from_str(r#"{"language": "pt"}"#).unwrap();
        assert_eq!(s.language, Some(SupportedLang::Portuguese));
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let s = AppSettings {
            endpoint: "http://127.0.0.1:9/posts".to_string(),
            log_file: PathBuf::from("other.log"),
            language: Some(SupportedLang::English),
            ..AppSettings::default()
        };
        s.save_to_file(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"language\": \"en\""));
        assert_eq!(AppSettings::load_from_file(&path).unwrap(), s);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        let err = AppSettings::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
