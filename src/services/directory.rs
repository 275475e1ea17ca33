//! Read models for listings and search, plus the grouping they need.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::entities::{artist, show, venue};
use crate::error::Result;
use crate::services::schedule::{is_past, parse_stored_start_time};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

impl From<artist::Model> for ArtistSummary {
    fn from(artist: artist::Model) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

impl SearchResults {
    pub fn new(search_term: &str, data: Vec<SearchMatch>) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: data.len(),
            data,
        }
    }
}

/// Group venues by (city, state).
///
/// Groups appear in the order their first venue was seen; venues keep their
/// input order inside each group.
pub fn group_venues_by_city(venues: impl IntoIterator<Item = venue::Model>) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name,
        };
        let key = (venue.city, venue.state);
        match index.get(&key) {
            Some(&position) => groups[position].venues.push(summary),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CityGroup {
                    city: key.0,
                    state: key.1,
                    venues: vec![summary],
                });
            }
        }
    }

    groups
}

/// Count upcoming shows per owner id, where `owner` picks the venue or artist
/// side of each show.
pub fn count_upcoming<F>(
    shows: &[show::Model],
    now: NaiveDateTime,
    owner: F,
) -> Result<HashMap<i32, usize>>
where
    F: Fn(&show::Model) -> i32,
{
    let mut counts = HashMap::new();
    for show in shows {
        let start = parse_stored_start_time(&show.start_time)?;
        if !is_past(start, now) {
            *counts.entry(owner(show)).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn venue(id: i32, name: &str, city: &str, state: &str) -> venue::Model {
        venue::Model {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main St".to_string(),
            phone: None,
            genres: "Jazz".to_string(),
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn summary(id: i32, name: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let groups = group_venues_by_city(vec![
            venue(1, "A", "NYC", "NY"),
            venue(2, "C", "LA", "CA"),
            venue(3, "B", "NYC", "NY"),
        ]);

        assert_eq!(
            groups,
            vec![
                CityGroup {
                    city: "NYC".into(),
                    state: "NY".into(),
                    venues: vec![summary(1, "A"), summary(3, "B")],
                },
                CityGroup {
                    city: "LA".into(),
                    state: "CA".into(),
                    venues: vec![summary(2, "C")],
                },
            ]
        );
    }

    #[test]
    fn same_city_in_different_states_is_separate() {
        let groups = group_venues_by_city(vec![
            venue(1, "A", "Portland", "OR"),
            venue(2, "B", "Portland", "ME"),
        ]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_venues_by_city(Vec::new()).is_empty());
    }

    #[test]
    fn counts_only_upcoming_shows() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let show = |venue_id, start: &str| show::Model {
            artist_id: 1,
            venue_id,
            start_time: start.to_string(),
        };
        let shows = vec![
            show(1, "2024-06-01 12:00:00"),
            show(1, "2030-01-01 20:00:00"),
            show(2, "2031-01-01 20:00:00"),
            show(2, "2032-01-01 20:00:00"),
            show(3, "2001-01-01 20:00:00"),
        ];

        let counts = count_upcoming(&shows, now, |s| s.venue_id).unwrap();
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&3), None);
    }
}
