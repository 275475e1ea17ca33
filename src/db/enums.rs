use serde::{Deserialize, Serialize};

/// Separator used when a genre list is flattened into a single column.
pub const GENRE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RhythmAndBlues,
    Reggae,
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 19] = [
        Self::Alternative,
        Self::Blues,
        Self::Classical,
        Self::Country,
        Self::Electronic,
        Self::Folk,
        Self::Funk,
        Self::HipHop,
        Self::HeavyMetal,
        Self::Instrumental,
        Self::Jazz,
        Self::MusicalTheatre,
        Self::Pop,
        Self::Punk,
        Self::RhythmAndBlues,
        Self::Reggae,
        Self::RockNRoll,
        Self::Soul,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RhythmAndBlues => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.as_str() == s)
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> String {
        genre.as_str().to_string()
    }
}

/// Two-letter codes accepted for the `state` field (50 states plus DC).
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub fn is_state_code(code: &str) -> bool {
    STATE_CODES.contains(&code)
}

/// Flatten genres into the stored column format: `"Jazz, Reggae"`.
pub fn encode_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(Genre::as_str)
        .collect::<Vec<_>>()
        .join(GENRE_SEPARATOR)
}

/// Split the stored column back into its ordered list.
///
/// Values are returned verbatim so rows written before a genre was retired
/// still display.
pub fn decode_genres(stored: &str) -> Vec<String> {
    stored
        .split(GENRE_SEPARATOR)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
