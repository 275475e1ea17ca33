//! Decoding of URL-encoded HTML form bodies.
//!
//! Multi-selects post the same key once per chosen option, so bodies are
//! taken as ordered key/value pairs rather than a flat struct.

use crate::services::validation::{ArtistSubmission, ShowSubmission, VenueSubmission};

const TRUE_VALUES: [&str; 5] = ["y", "yes", "on", "true", "1"];

#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value posted under `key`, or an empty string.
    pub fn text(&self, key: &str) -> String {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    /// Every value posted under `key`, in submission order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Checkbox semantics: unchecked boxes are simply absent from the body.
    pub fn flag(&self, key: &str) -> bool {
        self.0
            .iter()
            .any(|(k, v)| k == key && TRUE_VALUES.contains(&v.to_ascii_lowercase().as_str()))
    }
}

impl From<&FormFields> for VenueSubmission {
    fn from(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            address: form.text("address"),
            phone: form.text("phone"),
            genres: form.all("genres"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website_link: form.text("website_link"),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.text("seeking_description"),
        }
    }
}

impl From<&FormFields> for ArtistSubmission {
    fn from(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            phone: form.text("phone"),
            genres: form.all("genres"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website_link: form.text("website_link"),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.text("seeking_description"),
        }
    }
}

impl From<&FormFields> for ShowSubmission {
    fn from(form: &FormFields) -> Self {
        Self {
            artist_id: form.text("artist_id"),
            venue_id: form.text("venue_id"),
            start_time: form.text("start_time"),
        }
    }
}
