use wordbook_types::{Language, LanguageCode, SetupProfile};

/// Languages offered during setup
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", flag: "🇬🇧" },
    Language { code: "es", name: "Spanish", flag: "🇪🇸" },
    Language { code: "fr", name: "French", flag: "🇫🇷" },
    Language { code: "de", name: "German", flag: "🇩🇪" },
    Language { code: "it", name: "Italian", flag: "🇮🇹" },
    Language { code: "pt", name: "Portuguese", flag: "🇵🇹" },
    Language { code: "ja", name: "Japanese", flag: "🇯🇵" },
    Language { code: "ko", name: "Korean", flag: "🇰🇷" },
    Language { code: "zh", name: "Chinese", flag: "🇨🇳" },
    Language { code: "ru", name: "Russian", flag: "🇷🇺" },
    Language { code: "ar", name: "Arabic", flag: "🇸🇦" },
    Language { code: "hi", name: "Hindi", flag: "🇮🇳" },
    Language { code: "tr", name: "Turkish", flag: "🇹🇷" },
    Language { code: "nl", name: "Dutch", flag: "🇳🇱" },
    Language { code: "pl", name: "Polish", flag: "🇵🇱" },
    Language { code: "sv", name: "Swedish", flag: "🇸🇪" },
];

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

/// Resolved language pair: codes stamp entries, names go into prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub native: &'static Language,
    pub target: &'static Language,
}

impl LanguagePair {
    pub fn resolve(profile: &SetupProfile) -> Option<Self> {
        Some(Self {
            native: find(&profile.native_lang)?,
            target: find(&profile.target_lang)?,
        })
    }

    pub fn native_code(&self) -> LanguageCode {
        self.native.code.to_string()
    }

    pub fn target_code(&self) -> LanguageCode {
        self.target.code.to_string()
    }

    pub fn native_label(&self) -> &'static str {
        self.native.name
    }

    pub fn target_label(&self) -> &'static str {
        self.target.name
    }

    pub fn profile(&self) -> SetupProfile {
        SetupProfile {
            native_lang: self.native_code(),
            target_lang: self.target_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("JA").map(|l| l.name), Some("Japanese"));
        assert_eq!(find(" es ").map(|l| l.name), Some("Spanish"));
        assert!(find("xx").is_none());
    }

    #[test]
    fn test_pair_resolution() {
        let profile = SetupProfile {
            native_lang: "es".to_string(),
            target_lang: "en".to_string(),
        };
        let pair = LanguagePair::resolve(&profile).unwrap();
        assert_eq!(pair.native_label(), "Spanish");
        assert_eq!(pair.target_label(), "English");
        assert_eq!(pair.profile(), profile);

        let unknown = SetupProfile {
            native_lang: "es".to_string(),
            target_lang: "klingon".to_string(),
        };
        assert!(LanguagePair::resolve(&unknown).is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            assert!(LANGUAGES[i + 1..].iter().all(|b| b.code != a.code), "{}", a.code);
        }
    }
}
