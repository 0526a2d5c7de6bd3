use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

type Bundle = FluentBundle<FluentResource>;

const FALLBACK_LANG: &str = "en";

/// Languages with an embedded FTL resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLang {
    English,
    Portuguese,
}

impl SupportedLang {
    pub const ALL: [SupportedLang; 2] = [SupportedLang::English, SupportedLang::Portuguese];

    pub fn code(self) -> &'static str {
        match self {
            SupportedLang::English => "en",
            SupportedLang::Portuguese => "pt",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        let short = &code[..code.find(['-', '_']).unwrap_or(code.len())];
        Self::ALL.into_iter().find(|l| l.code() == short)
    }

    /// Name shown in the language picker, always in its own language.
    pub fn native_name(self) -> &'static str {
        match self {
            SupportedLang::English => "English",
            SupportedLang::Portuguese => "Português",
        }
    }

    fn ftl_source(self) -> &'static str {
        match self {
            SupportedLang::English => include_str!("resources/en.ftl"),
            SupportedLang::Portuguese => include_str!("resources/pt.ftl"),
        }
    }
}

fn parse_lang(lang_code: &str) -> Result<LanguageIdentifier, LocalizationError> {
    lang_code
        .parse::<LanguageIdentifier>()
        .map_err(|e| LocalizationError::InitError(format!("bad language id {lang_code}: {e}")))
}

fn detect_system_lang() -> SupportedLang {
    sys_locale::get_locale()
        .and_then(|sys| SupportedLang::from_code(&sys))
        .unwrap_or(SupportedLang::English)
}

struct LocalizationManager {
    current: SupportedLang,
    bundles: HashMap<&'static str, Bundle>,
}

impl LocalizationManager {
    fn new() -> Self {
        let mut bundles: HashMap<&'static str, Bundle> = HashMap::new();
        for lang in SupportedLang::ALL {
            match build_bundle(lang) {
                Ok(bundle) => {
                    bundles.insert(lang.code(), bundle);
                }
                Err(e) => log::error!("Skipping {} translations: {e}", lang.code()),
            }
        }
        Self {
            current: SupportedLang::English,
            bundles,
        }
    }

    fn set_current(&mut self, lang: SupportedLang) -> Result<(), LocalizationError> {
        if !self.bundles.contains_key(lang.code()) {
            return Err(LocalizationError::UnsupportedLanguage(lang.code().to_string()));
        }
        self.current = lang;
        Ok(())
    }

    fn format_with_args(&self, id: &str, args: Option<&FluentArgs>) -> String {
        for code in [self.current.code(), FALLBACK_LANG] {
            let Some(b) = self.bundles.get(code) else {
                continue;
            };
            if let Some(pat) = b.get_message(id).and_then(|m| m.value()) {
                let mut errors = vec![];
                let s = b.format_pattern(pat, args, &mut errors).to_string();
                if !errors.is_empty() {
                    log::warn!("Formatting {id} ({code}) reported {} errors", errors.len());
                }
                return s;
            }
        }
        format!("[missing: {}]", id)
    }
}

fn build_bundle(lang: SupportedLang) -> Result<Bundle, LocalizationError> {
    let mut bundle: Bundle = FluentBundle::new(vec![parse_lang(lang.code())?]);
    // Isolation marks around placeables render as boxes in egui fonts.
    bundle.set_use_isolating(false);
    let res = FluentResource::try_new(lang.ftl_source().to_string())
        .map_err(|(_, errs)| LocalizationError::InitError(format!("{errs:?}")))?;
    bundle
        .add_resource(res)
        .map_err(|errs| LocalizationError::InitError(format!("{errs:?}")))?;
    Ok(bundle)
}

thread_local! {
    static LOCALIZATION: RefCell<LocalizationManager> = RefCell::new(LocalizationManager::new());
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Initialize localization. `None` picks the system locale, falling back to English.
pub fn initialize_localization(preferred: Option<SupportedLang>) -> Result<(), LocalizationError> {
    let lang = preferred.unwrap_or_else(detect_system_lang);
    set_current_language(lang)
}

pub fn set_current_language(lang: SupportedLang) -> Result<(), LocalizationError> {
    LOCALIZATION.with(|cell| cell.borrow_mut().set_current(lang))
}

pub fn current_language() -> SupportedLang {
    LOCALIZATION.with(|cell| cell.borrow().current)
}

/// Translate a message without arguments.
pub fn translate(message_id: &str) -> String {
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, None))
}

/// Translate a message with arguments given as (&str, String) pairs.
pub fn translate_with(message_id: &str, args: &[(&str, String)]) -> String {
    let mut fargs = FluentArgs::new();
    for (k, v) in args {
        fargs.set(*k, v.clone());
    }
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, Some(&fargs)))
}
