use rust_i18n::t;

/// Languages the app ships catalogs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Hi,
    Mr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Hi, Locale::Mr];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Mr => "mr",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Locale::En),
            "hi" => Some(Locale::Hi),
            "mr" => Some(Locale::Mr),
            _ => None,
        }
    }

    /// Short badge shown in the header, in the language's own script.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Hi => "हिंदी",
            Locale::Mr => "मराठी",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "हिंदी",
            Locale::Mr => "मराठी",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Locale::En => Locale::Hi,
            Locale::Hi => Locale::Mr,
            Locale::Mr => Locale::En,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// String lookup service the sessions depend on. Production uses the
/// rust-i18n backed [`Catalog`]; tests substitute stubs.
pub trait Translate {
    fn translate(&self, key: &str, locale: Locale) -> String;
}

/// Translation catalog over the embedded `locales/` YAML files.
#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog;

impl Translate for Catalog {
    fn translate(&self, key: &str, locale: Locale) -> String {
        t!(key, locale = locale.as_str()).into_owned()
    }
}
