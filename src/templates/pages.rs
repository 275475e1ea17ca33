use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    checkbox, error_summary, genre_select, genre_tags, notice_banner, profile_image, search_box,
    show_card, state_select, text_field, Notice,
};
use super::layout::base_layout;
use crate::services::{
    artists::ArtistDetail, shows::ShowListing, validation::ValidationErrors, venues::VenueDetail,
    ArtistSubmission, ArtistSummary, CityGroup, SearchResults, ShowSubmission, VenueSubmission,
};

/// Whether a form creates a new record or edits the one with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn path(&self) -> &'static str {
        match self {
            Self::Venues => "/venues",
            Self::Artists => "/artists",
        }
    }
}

pub fn home_page(notice: Option<&Notice>) -> Markup {
    base_layout(
        "Home",
        html! {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { "Find venues, artists and shows" }
                p class="text-gray-600 mt-4" {
                    "Browse where music happens, or post your own venue, act or gig."
                }
                div class="mt-8 flex justify-center gap-4" {
                    a href="/venues" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" { "Venues" }
                    a href="/artists" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" { "Artists" }
                    a href="/shows" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" { "Shows" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[CityGroup]) -> Markup {
    base_layout(
        "Venues",
        html! {
            (search_box("/venues/search", "Find a venue"))

            @if areas.is_empty() {
                p class="text-gray-600 text-lg" { "No venues listed yet." }
            }

            @for area in areas {
                h3 class="text-xl font-semibold text-gray-900 mt-6" { (area.city) ", " (area.state) }
                ul class="mt-2 space-y-1" {
                    @for venue in &area.venues {
                        li {
                            a href=(format!("/venues/{}", venue.id)) class="text-primary hover:underline" {
                                (venue.name)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[ArtistSummary]) -> Markup {
    base_layout(
        "Artists",
        html! {
            (search_box("/artists/search", "Find an artist"))

            @if artists.is_empty() {
                p class="text-gray-600 text-lg" { "No artists listed yet." }
            }

            ul class="space-y-1" {
                @for artist in artists {
                    li {
                        a href=(format!("/artists/{}", artist.id)) class="text-primary hover:underline" {
                            (artist.name)
                        }
                    }
                }
            }
        },
    )
}

pub fn search_results_page(kind: SearchKind, results: &SearchResults) -> Markup {
    let title = match kind {
        SearchKind::Venues => "Venue search",
        SearchKind::Artists => "Artist search",
    };

    base_layout(
        title,
        html! {
            (search_box(&format!("{}/search", kind.path()), "Search again"))

            h3 class="text-xl font-semibold text-gray-900" {
                "Number of search results for \"" (results.search_term) "\": " (results.count)
            }
            ul class="mt-4 space-y-2" {
                @for item in &results.data {
                    li {
                        a href=(format!("{}/{}", kind.path(), item.id)) class="text-primary hover:underline" {
                            (item.name)
                        }
                        span class="ml-2 text-sm text-gray-500" {
                            (item.num_upcoming_shows) " upcoming shows"
                        }
                    }
                }
            }
        },
    )
}

fn detail_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(value) = value {
            div {
                dt class="text-sm font-medium text-gray-500" { (label) }
                dd class="mt-1 text-gray-900" { (value) }
            }
        }
    }
}

fn seeking_block(seeking: bool, what: &str, description: Option<&str>) -> Markup {
    html! {
        @if seeking {
            div class="mt-4 p-4 bg-green-50 rounded-md" {
                p class="font-semibold text-green-800" { "Currently seeking " (what) }
                @if let Some(description) = description {
                    p class="text-green-700 mt-1" { (description) }
                }
            }
        } @else {
            p class="mt-4 text-gray-500" { "Not currently seeking " (what) }
        }
    }
}

pub fn venue_detail_page(venue: &VenueDetail) -> Markup {
    let location = format!("{}, {}", venue.city, venue.state);

    base_layout(
        &venue.name,
        html! {
            div class="flex flex-col md:flex-row gap-6" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    p class="text-gray-500 text-sm" { "ID: " (venue.id) }
                    div class="mt-2" { (genre_tags(&venue.genres)) }

                    dl class="mt-4 space-y-3" {
                        (detail_row("Address", Some(venue.address.as_str())))
                        (detail_row("City", Some(location.as_str())))
                        (detail_row("Phone", venue.phone.as_deref()))
                        (detail_row("Website", venue.website.as_deref()))
                        (detail_row("Facebook", venue.facebook_link.as_deref()))
                    }

                    (seeking_block(venue.seeking_talent, "talent", venue.seeking_description.as_deref()))

                    div class="mt-6 flex gap-3" {
                        a href=(format!("/venues/{}/edit", venue.id))
                          class="px-4 py-2 bg-blue-500 text-white font-semibold rounded-md" { "Edit" }
                        form method="post" action=(format!("/venues/{}/delete", venue.id)) {
                            button type="submit" class="px-4 py-2 bg-red-500 text-white font-semibold rounded-md" {
                                "Delete"
                            }
                        }
                    }
                }
                div class="flex-shrink-0" {
                    (profile_image(venue.image_link.as_deref(), &venue.name))
                }
            }

            section class="mt-8" {
                h2 class="text-2xl font-semibold" { (venue.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-4" {
                    @for show in &venue.upcoming_shows {
                        (show_card(&format!("/artists/{}", show.artist_id), &show.artist_name,
                            show.artist_image_link.as_deref(), &show.start_time))
                    }
                }
            }

            section class="mt-8" {
                h2 class="text-2xl font-semibold" { (venue.past_shows_count) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-4" {
                    @for show in &venue.past_shows {
                        (show_card(&format!("/artists/{}", show.artist_id), &show.artist_name,
                            show.artist_image_link.as_deref(), &show.start_time))
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(artist: &ArtistDetail) -> Markup {
    let location = format!("{}, {}", artist.city, artist.state);

    base_layout(
        &artist.name,
        html! {
            div class="flex flex-col md:flex-row gap-6" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    p class="text-gray-500 text-sm" { "ID: " (artist.id) }
                    div class="mt-2" { (genre_tags(&artist.genres)) }

                    dl class="mt-4 space-y-3" {
                        (detail_row("City", Some(location.as_str())))
                        (detail_row("Phone", artist.phone.as_deref()))
                        (detail_row("Website", artist.website.as_deref()))
                        (detail_row("Facebook", artist.facebook_link.as_deref()))
                    }

                    (seeking_block(artist.seeking_venue, "performance venues", artist.seeking_description.as_deref()))

                    div class="mt-6 flex gap-3" {
                        a href=(format!("/artists/{}/edit", artist.id))
                          class="px-4 py-2 bg-blue-500 text-white font-semibold rounded-md" { "Edit" }
                        form method="post" action=(format!("/artists/{}/delete", artist.id)) {
                            button type="submit" class="px-4 py-2 bg-red-500 text-white font-semibold rounded-md" {
                                "Delete"
                            }
                        }
                    }
                }
                div class="flex-shrink-0" {
                    (profile_image(artist.image_link.as_deref(), &artist.name))
                }
            }

            section class="mt-8" {
                h2 class="text-2xl font-semibold" { (artist.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-4" {
                    @for show in &artist.upcoming_shows {
                        (show_card(&format!("/venues/{}", show.venue_id), &show.venue_name,
                            show.venue_image_link.as_deref(), &show.start_time))
                    }
                }
            }

            section class="mt-8" {
                h2 class="text-2xl font-semibold" { (artist.past_shows_count) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-4" {
                    @for show in &artist.past_shows {
                        (show_card(&format!("/venues/{}", show.venue_id), &show.venue_name,
                            show.venue_image_link.as_deref(), &show.start_time))
                    }
                }
            }
        },
    )
}

fn form_target(mode: FormMode, base: &str) -> (String, &'static str) {
    match mode {
        FormMode::Create => (format!("{}/create", base), "Create"),
        FormMode::Edit(id) => (format!("{}/{}/edit", base, id), "Save changes"),
    }
}

pub fn venue_form_page(
    mode: FormMode,
    venue: &VenueSubmission,
    errors: Option<&ValidationErrors>,
) -> Markup {
    let (action, submit_label) = form_target(mode, "/venues");
    let title = match mode {
        FormMode::Create => "List a new venue",
        FormMode::Edit(_) => "Edit venue",
    };

    base_layout(
        title,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { (title) }
            (error_summary(errors))

            form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 max-w-2xl" {
                (text_field("Name", "name", &venue.name, errors))
                (text_field("City", "city", &venue.city, errors))
                (state_select(&venue.state, errors))
                (text_field("Address", "address", &venue.address, errors))
                (text_field("Phone", "phone", &venue.phone, errors))
                (genre_select(&venue.genres, errors))
                (text_field("Facebook link", "facebook_link", &venue.facebook_link, errors))
                (text_field("Image link", "image_link", &venue.image_link, errors))
                (text_field("Website", "website_link", &venue.website_link, errors))
                (checkbox("Looking for talent", "seeking_talent", venue.seeking_talent))
                (text_field("Seeking description", "seeking_description", &venue.seeking_description, errors))

                button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                    (submit_label)
                }
            }
        },
    )
}

pub fn artist_form_page(
    mode: FormMode,
    artist: &ArtistSubmission,
    errors: Option<&ValidationErrors>,
) -> Markup {
    let (action, submit_label) = form_target(mode, "/artists");
    let title = match mode {
        FormMode::Create => "List a new artist",
        FormMode::Edit(_) => "Edit artist",
    };

    base_layout(
        title,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { (title) }
            (error_summary(errors))

            form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 max-w-2xl" {
                (text_field("Name", "name", &artist.name, errors))
                (text_field("City", "city", &artist.city, errors))
                (state_select(&artist.state, errors))
                (text_field("Phone", "phone", &artist.phone, errors))
                (genre_select(&artist.genres, errors))
                (text_field("Facebook link", "facebook_link", &artist.facebook_link, errors))
                (text_field("Image link", "image_link", &artist.image_link, errors))
                (text_field("Website", "website_link", &artist.website_link, errors))
                (checkbox("Looking for venues", "seeking_venue", artist.seeking_venue))
                (text_field("Seeking description", "seeking_description", &artist.seeking_description, errors))

                button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                    (submit_label)
                }
            }
        },
    )
}

pub fn show_form_page(show: &ShowSubmission, errors: Option<&ValidationErrors>) -> Markup {
    base_layout(
        "List a new show",
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "List a new show" }
            (error_summary(errors))

            form method="post" action="/shows/create" class="bg-white rounded-lg shadow-sm p-6 max-w-2xl" {
                (text_field("Artist ID", "artist_id", &show.artist_id, errors))
                (text_field("Venue ID", "venue_id", &show.venue_id, errors))
                (text_field("Start time (YYYY-MM-DD HH:MM:SS)", "start_time", &show.start_time, errors))

                button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                    "Create"
                }
            }
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        html! {
            @if shows.is_empty() {
                p class="text-gray-600 text-lg" { "No shows listed yet." }
            }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for show in shows {
                    div class="bg-white rounded-lg shadow-sm p-4" {
                        (show_card(&format!("/artists/{}", show.artist_id), &show.artist_name,
                            show.artist_image_link.as_deref(), &show.start_time_short))
                        p class="mt-2 text-sm text-gray-600" { (show.start_time_display) }
                        p class="text-sm text-gray-600" {
                            "playing at "
                            a href=(format!("/venues/{}", show.venue_id)) class="text-primary hover:underline" {
                                (show.venue_name)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = if status == StatusCode::NOT_FOUND {
        "Not found"
    } else {
        "Something went wrong"
    };

    base_layout(
        heading,
        html! {
            div class="text-center py-12" {
                h1 class="text-5xl font-bold text-gray-900" { (status.as_u16()) }
                h2 class="text-2xl text-gray-700 mt-2" { (heading) }
                p class="text-gray-600 mt-4" { (message) }
                a href="/" class="mt-6 inline-block text-primary hover:underline" { "Back home" }
            }
        },
    )
}
