//! Field and cross-field checks applied to venue, artist and show submissions
//! before anything reaches the store.
//!
//! Every failing field is collected; nothing short-circuits on the first
//! problem.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use crate::db::enums::{is_state_code, Genre};
use crate::services::schedule::parse_start_time;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\([0-9]{3}\)|[0-9]{3})[-. ]?[0-9]{3}[-. ]?[0-9]{4}$").expect("phone regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://(?P<host>[^/?#:\s]+)(?::[0-9]{1,5})?(?:[/?#]\S*)?$")
        .expect("url regex")
});

pub const REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    InvalidPhone,
    InvalidGenres,
    InvalidState,
    InvalidUrl,
    InvalidDateTime,
    InvalidReference,
    Duplicate,
}

impl ValidationErrorKind {
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Required => REQUIRED_MESSAGE,
            Self::InvalidPhone => "Invalid phone.",
            Self::InvalidGenres => "Invalid genres.",
            Self::InvalidState => "Invalid state.",
            Self::InvalidUrl => "Invalid URL.",
            Self::InvalidDateTime => "Not a valid datetime value.",
            Self::InvalidReference => "No matching record exists.",
            Self::Duplicate => "This show is already listed.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, kind: ValidationErrorKind) {
        self.0.push(FieldError {
            field,
            kind,
            message: kind.default_message().to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn kinds_for(&self, field: &str) -> Vec<ValidationErrorKind> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.kind)
            .collect()
    }

    pub fn has(&self, field: &str, kind: ValidationErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Please fix the following errors: {}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_valid_phone(number: &str) -> bool {
    PHONE_RE.is_match(number)
}

/// Absolute URL with a scheme and a host that is either dotted with an
/// alphabetic top-level label or an IPv4 address.
pub fn is_valid_url(url: &str) -> bool {
    let Some(captures) = URL_RE.captures(url) else {
        return false;
    };
    let host = &captures["host"];
    if host.parse::<Ipv4Addr>().is_ok() {
        return true;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.to_ascii_lowercase().starts_with("xn--"));

    labels_ok && tld_ok
}

/// Resolve submitted genre names, dropping repeats but keeping first-seen order.
///
/// Returns `None` if any name is outside the enumeration.
pub fn parse_genres(submitted: &[String]) -> Option<Vec<Genre>> {
    let mut genres = Vec::with_capacity(submitted.len());
    for name in submitted {
        let genre = Genre::from_str(name.trim())?;
        if !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    Some(genres)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if blank(value) {
        errors.push(field, ValidationErrorKind::Required);
    }
}

/// Fields and rules shared by venues and artists.
struct ProfileFields<'a> {
    name: &'a str,
    city: &'a str,
    state: &'a str,
    phone: &'a str,
    genres: &'a [String],
    facebook_link: &'a str,
}

fn check_profile(errors: &mut ValidationErrors, fields: ProfileFields<'_>) -> Vec<Genre> {
    required(errors, "name", fields.name);
    required(errors, "city", fields.city);

    if blank(fields.state) {
        errors.push("state", ValidationErrorKind::Required);
    } else if !is_state_code(fields.state.trim()) {
        errors.push("state", ValidationErrorKind::InvalidState);
    }

    if !is_valid_phone(fields.phone.trim()) {
        errors.push("phone", ValidationErrorKind::InvalidPhone);
    }

    let genres = if fields.genres.iter().all(|g| blank(g)) {
        errors.push("genres", ValidationErrorKind::Required);
        Vec::new()
    } else {
        let non_blank: Vec<String> = fields
            .genres
            .iter()
            .filter(|g| !blank(g))
            .cloned()
            .collect();
        parse_genres(&non_blank).unwrap_or_else(|| {
            errors.push("genres", ValidationErrorKind::InvalidGenres);
            Vec::new()
        })
    };

    if !blank(fields.facebook_link) && !is_valid_url(fields.facebook_link.trim()) {
        errors.push("facebook_link", ValidationErrorKind::InvalidUrl);
    }

    genres
}

/// Raw venue fields as submitted by a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueSubmission {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    #[serde(alias = "website")]
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// A venue that passed every check and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueSubmission {
    pub fn validate(self) -> Result<ValidVenue, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let genres = check_profile(
            &mut errors,
            ProfileFields {
                name: &self.name,
                city: &self.city,
                state: &self.state,
                phone: &self.phone,
                genres: &self.genres,
                facebook_link: &self.facebook_link,
            },
        );
        required(&mut errors, "address", &self.address);

        errors.into_result(ValidVenue {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            genres,
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
        })
    }
}

fn default_seeking_venue() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistSubmission {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    #[serde(alias = "website")]
    pub website_link: String,
    #[serde(default = "default_seeking_venue")]
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl Default for ArtistSubmission {
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            genres: Vec::new(),
            image_link: String::new(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_venue: default_seeking_venue(),
            seeking_description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistSubmission {
    pub fn validate(self) -> Result<ValidArtist, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let genres = check_profile(
            &mut errors,
            ProfileFields {
                name: &self.name,
                city: &self.city,
                state: &self.state,
                phone: &self.phone,
                genres: &self.genres,
                facebook_link: &self.facebook_link,
            },
        );

        errors.into_result(ValidArtist {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: self.phone.trim().to_string(),
            genres,
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website_link),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowSubmission {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

fn check_id(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> i32 {
    if blank(raw) {
        errors.push(field, ValidationErrorKind::Required);
        return 0;
    }
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.push(field, ValidationErrorKind::InvalidReference);
            0
        }
    }
}

impl ShowSubmission {
    /// Shape checks only; whether the artist and venue exist is decided
    /// against the store by `services::shows::create`.
    pub fn validate(self) -> Result<ValidShow, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let artist_id = check_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = check_id(&mut errors, "venue_id", &self.venue_id);

        let start_time = if blank(&self.start_time) {
            errors.push("start_time", ValidationErrorKind::Required);
            None
        } else {
            let parsed = parse_start_time(&self.start_time);
            if parsed.is_none() {
                errors.push("start_time", ValidationErrorKind::InvalidDateTime);
            }
            parsed
        };

        match start_time {
            Some(start_time) if errors.is_empty() => Ok(ValidShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}
