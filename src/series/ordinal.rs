use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KOREAN_ORDINALS: [&str; 10] = [
    "첫번째",
    "두번째",
    "세번째",
    "네번째",
    "다섯번째",
    "여섯번째",
    "일곱번째",
    "여덟번째",
    "아홉번째",
    "열번째",
];

const ENGLISH_ORDINALS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Word set used for series titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdinalLocale {
    #[default]
    Korean,
    English,
}

impl OrdinalLocale {
    /// Ordinal word for a 1-based position; numeric form past ten
    pub fn ordinal_label(&self, position: usize) -> String {
        let words = match self {
            OrdinalLocale::Korean => &KOREAN_ORDINALS,
            OrdinalLocale::English => &ENGLISH_ORDINALS,
        };

        match position.checked_sub(1).and_then(|index| words.get(index)) {
            Some(word) => (*word).to_string(),
            None => match self {
                OrdinalLocale::Korean => format!("{}번째", position),
                OrdinalLocale::English => format!("{}-th", position),
            },
        }
    }

    /// Noun appended to the ordinal in a title
    pub fn series_noun(&self) -> &'static str {
        match self {
            OrdinalLocale::Korean => "시리즈",
            OrdinalLocale::English => "series",
        }
    }

    /// Full title for the series at a 1-based position
    pub fn series_title(&self, position: usize) -> String {
        format!("{} {}", self.ordinal_label(position), self.series_noun())
    }
}

impl fmt::Display for OrdinalLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrdinalLocale::Korean => write!(f, "ko"),
            OrdinalLocale::English => write!(f, "en"),
        }
    }
}

impl FromStr for OrdinalLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ko" | "korean" => Ok(OrdinalLocale::Korean),
            "en" | "english" => Ok(OrdinalLocale::English),
            other => Err(format!("unknown locale: {}", other)),
        }
    }
}

/// Korean ordinal label, the default title style
pub fn ordinal_label(position: usize) -> String {
    OrdinalLocale::Korean.ordinal_label(position)
}
