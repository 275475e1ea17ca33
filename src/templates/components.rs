use maud::{html, Markup};

use crate::db::enums::{Genre, STATE_CODES};
use crate::services::validation::ValidationErrors;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300/1a1a1a/ffffff?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-off message shown at the top of a page after a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub fn notice_banner(notice: &Notice) -> Markup {
    let color = match notice.kind {
        NoticeKind::Success => "bg-green-100 text-green-800 border-green-300",
        NoticeKind::Error => "bg-red-100 text-red-800 border-red-300",
    };

    html! {
        div id="notification-area" class=(format!("mb-4 p-4 border rounded-md {}", color)) {
            (notice.message)
        }
    }
}

/// Every validation message at once, above the form.
pub fn error_summary(errors: Option<&ValidationErrors>) -> Markup {
    html! {
        @if let Some(errors) = errors {
            @if !errors.is_empty() {
                div class="mb-4 p-4 border rounded-md bg-red-100 text-red-800 border-red-300" {
                    (errors.to_string())
                }
            }
        }
    }
}

fn field_errors(errors: Option<&ValidationErrors>, field: &str) -> Markup {
    html! {
        @if let Some(errors) = errors {
            @for error in errors.fields().iter().filter(|e| e.field == field) {
                p class="mt-1 text-sm text-red-600" { (error.message) }
            }
        }
    }
}

pub fn text_field(
    label: &str,
    name: &str,
    value: &str,
    errors: Option<&ValidationErrors>,
) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=(value)
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
            (field_errors(errors, name))
        }
    }
}

pub fn state_select(selected: &str, errors: Option<&ValidationErrors>) -> Markup {
    html! {
        div class="mb-4" {
            label for="state" class="block text-sm font-medium text-gray-700 mb-2" { "State" }
            select id="state" name="state" class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                option value="" { "Choose a state" }
                @for code in STATE_CODES {
                    option value=(code) selected[code == selected] { (code) }
                }
            }
            (field_errors(errors, "state"))
        }
    }
}

pub fn genre_select(selected: &[String], errors: Option<&ValidationErrors>) -> Markup {
    html! {
        div class="mb-4" {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" {
                "Genres"
                span class="text-gray-500 text-xs ml-2" { "Ctrl+Click to select multiple" }
            }
            select id="genres" name="genres" multiple size="8"
                class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for genre in Genre::ALL {
                    option value=(genre.as_str()) selected[selected.iter().any(|g| g == genre.as_str())] {
                        (genre.as_str())
                    }
                }
            }
            (field_errors(errors, "genres"))
        }
    }
}

pub fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="mb-4 flex items-center" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked] class="mr-2";
            label for=(name) class="text-sm font-medium text-gray-700" { (label) }
        }
    }
}

pub fn search_box(action: &str, placeholder: &str) -> Markup {
    html! {
        form method="post" action=(action) class="mb-6 flex gap-2" {
            input
                type="search"
                name="search_term"
                placeholder=(placeholder)
                class="flex-grow px-3 py-2 border border-gray-300 rounded-md";
            button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                "Search"
            }
        }
    }
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

/// Card linking to the other side of a booking (artist on a venue page and
/// vice versa).
pub fn show_card(href: &str, name: &str, image_link: Option<&str>, start_time: &str) -> Markup {
    html! {
        a href=(href) class="flex items-center gap-4 p-4 bg-white rounded-lg shadow-sm hover:shadow-md" {
            img
                src=(image_link.unwrap_or(PLACEHOLDER_IMAGE))
                alt=(name)
                class="w-16 h-16 rounded object-cover"
                loading="lazy";
            div {
                h5 class="font-semibold text-gray-900" { (name) }
                p class="text-sm text-gray-600" { (start_time) }
            }
        }
    }
}

pub fn profile_image(image_link: Option<&str>, alt: &str) -> Markup {
    html! {
        img
            src=(image_link.unwrap_or(PLACEHOLDER_IMAGE))
            alt=(alt)
            class="w-full md:w-64 rounded-lg shadow-md";
    }
}
