//! Screen logic for the catalog
//!
//! Each screen loads rows through the backend traits, keeps them as view
//! state, and applies user actions to that state:
//! - `catalog` - listing screen (search + category filter)
//! - `repo_detail` - single repo view
//! - `reviews` - review panel
//! - `lists` - "My Lists" screen and saving repos
//! - `session` - sign-in, sign-up, sign-out, confirmation resend
//! - `leaderboard` - static most-used templates table
//! - `rating` - star and number rendering for ratings

pub mod catalog;
pub mod error;
pub mod leaderboard;
pub mod lists;
pub mod messages;
pub mod rating;
pub mod repo_detail;
pub mod reviews;
pub mod session;

pub use catalog::{CategoryFilter, ListingScreen};
pub use error::{ViewError, ViewErrorKind};
pub use lists::{ListsScreen, MoveTarget, SavedRepo};
pub use repo_detail::RepoDetail;
pub use reviews::{ReviewDraft, ReviewPanel};
pub use session::Session;
