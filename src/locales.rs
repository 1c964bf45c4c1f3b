//! Supported locales and tag/name lookups.

/// A supported locale, identified by a short tag and a full language name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Short locale tag, e.g. `"en"`.
    pub tag: &'static str,
    /// Full language name, e.g. `"english"`.
    pub name: &'static str,
}

/// Locales the training pipeline knows about.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale {
    tag: "en",
    name: "english",
}];

/// Look up the full language name for a locale tag.
pub fn name_by_tag(tag: &str) -> Option<&'static str> {
    SUPPORTED_LOCALES
        .iter()
        .find(|locale| locale.tag == tag)
        .map(|locale| locale.name)
}

/// Look up the locale tag for a full language name.
pub fn tag_by_name(name: &str) -> Option<&'static str> {
    SUPPORTED_LOCALES
        .iter()
        .find(|locale| locale.name == name)
        .map(|locale| locale.tag)
}

/// Check whether a locale tag is supported.
pub fn is_supported(tag: &str) -> bool {
    name_by_tag(tag).is_some()
}
