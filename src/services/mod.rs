pub mod artists;
pub mod directory;
pub mod schedule;
pub mod shows;
pub mod validation;
pub mod venues;

pub use directory::{ArtistSummary, CityGroup, SearchMatch, SearchResults, VenueSummary};
pub use schedule::ReferenceClock;
pub use validation::{ArtistSubmission, ShowSubmission, ValidationErrors, VenueSubmission};
