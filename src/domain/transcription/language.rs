use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

/// Languages a learner is expected to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpokenLanguage {
    #[serde(rename = "ga")]
    Irish,
    #[serde(rename = "en")]
    English,
}

impl SpokenLanguage {
    /// ISO 639-1 code
    pub fn as_str(&self) -> &'static str {
        match self {
            SpokenLanguage::Irish => "ga",
            SpokenLanguage::English => "en",
        }
    }

    /// Locale used when none of the configured locales match
    pub fn default_locale(&self) -> &'static str {
        match self {
            SpokenLanguage::Irish => "ga-IE",
            SpokenLanguage::English => "en-IE",
        }
    }

    /// Pick the configured locale for this language, e.g. `en-GB` if configured
    pub fn locale_in<'a>(&self, locales: &'a [String]) -> Option<&'a str> {
        locales
            .iter()
            .find(|locale| {
                locale
                    .split(['-', '_'])
                    .next()
                    .is_some_and(|code| code.eq_ignore_ascii_case(self.as_str()))
            })
            .map(String::as_str)
    }

    pub fn from_lingua(language: Language) -> Option<Self> {
        match language {
            Language::Irish => Some(SpokenLanguage::Irish),
            Language::English => Some(SpokenLanguage::English),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl std::fmt::Display for SpokenLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn build_detector() -> LanguageDetector {
    LanguageDetectorBuilder::from_languages(&[Language::Irish, Language::English]).build()
}

/// Detect whether the text is Irish or English
pub fn detect_language(detector: &LanguageDetector, text: &str) -> Option<SpokenLanguage> {
    detector
        .detect_language_of(text)
        .and_then(SpokenLanguage::from_lingua)
}
