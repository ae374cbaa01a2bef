//! Culture-specific casing for display names

/// Casing rules applied when normalizing display names.
///
/// Passed explicitly so normalization never depends on ambient locale state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Culture {
    /// Unicode default case mappings
    #[default]
    Invariant,

    /// Turkish and Azerbaijani: dotted and dotless `i` map separately
    Turkic,
}

impl Culture {
    /// Pick the casing rules for a BCP 47 language tag such as `tr-TR`.
    ///
    /// Unknown languages fall back to [`Culture::Invariant`].
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("tr") || language.eq_ignore_ascii_case("az") {
            Self::Turkic
        } else {
            Self::Invariant
        }
    }

    #[must_use]
    pub fn to_lowercase(self, text: &str) -> String {
        match self {
            Self::Invariant => text.to_lowercase(),
            Self::Turkic => {
                let mut lowered = String::with_capacity(text.len());
                for c in text.chars() {
                    match c {
                        'I' => lowered.push('ı'),
                        '\u{130}' => lowered.push('i'),
                        _ => lowered.extend(c.to_lowercase()),
                    }
                }
                lowered
            }
        }
    }

    /// Lowercase `text`, then capitalize the first letter of every word.
    ///
    /// A word starts at a letter that follows the start of text or any
    /// character other than a letter, digit or apostrophe.
    #[must_use]
    pub fn to_title_case(self, text: &str) -> String {
        let lowered = self.to_lowercase(text);
        let mut titled = String::with_capacity(lowered.len());
        let mut previous: Option<char> = None;

        for c in lowered.chars() {
            let word_start = previous.is_none_or(|p| !p.is_alphanumeric() && p != '\'');
            if word_start && c.is_alphabetic() {
                self.push_upper(c, &mut titled);
            } else {
                titled.push(c);
            }
            previous = Some(c);
        }

        titled
    }

    fn push_upper(self, c: char, out: &mut String) {
        match (self, c) {
            (Self::Turkic, 'i') => out.push('\u{130}'),
            (Self::Turkic, 'ı') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
}
