//! User-visible message strings

// Listing
pub const LOAD_INITIAL_FAILED: &str = "Failed to load initial data";
pub const SAVE_REQUIRES_LOGIN: &str = "You must be logged in to save repos.";
pub const SAVE_SUCCESS: &str = "Repo saved to \"My Lists\"!";
pub const SAVE_FAILED: &str = "Failed to save repo. Please try again.";

// Repo detail
pub const INVALID_REPO_ID: &str = "Invalid repo ID";
pub const FETCH_REPO_FAILED: &str = "Error fetching repo";
pub const REPO_NOT_FOUND: &str = "Repo not found";
pub const NO_RATING_AVAILABLE: &str = "No rating available";
pub const NO_TAGS_AVAILABLE: &str = "No tags available";

// Reviews
pub const LOAD_REVIEWS_FAILED: &str = "Failed to load reviews";
pub const REVIEW_REQUIRES_LOGIN: &str = "You must be logged in to submit a review";
pub const SUBMIT_REVIEW_FAILED: &str = "Failed to submit review";
pub const REVIEW_SUBMITTED: &str = "Review submitted successfully!";
pub const REVIEW_RATING_INVALID: &str = "Please select a rating between 1 and 5";
pub const NO_REVIEWS: &str = "No reviews yet. Be the first to leave a review!";

// Lists
pub const LISTS_REQUIRE_LOGIN: &str = "Please sign in to view your lists.";
pub const FETCH_LISTS_FAILED: &str = "Failed to fetch lists";
pub const FETCH_SAVED_FAILED: &str = "Failed to fetch saved repos";
pub const CREATE_LIST_FAILED: &str = "Failed to create list. Please try again.";
pub const LIST_NAME_REQUIRED: &str = "List name is required";
pub const MOVE_TO_UNSORTED_FAILED: &str = "Failed to move repo to Unsorted";
pub const MOVE_FAILED: &str = "Failed to move repo";
pub const REMOVE_FAILED: &str = "Failed to remove repo";
pub const ALL_SAVED_HEADING: &str = "All Saved Repos";
pub const SAVED_HEADING_FALLBACK: &str = "Saved Repos";
pub const UNSORTED_LABEL: &str = "Unsorted";

// Session
pub const EMAIL_NOT_CONFIRMED_MARKER: &str = "Email not confirmed";
pub const EMAIL_NOT_CONFIRMED: &str =
    "Please check your email and click the confirmation link before signing in.";
pub const SIGN_UP_SUCCESS: &str = "Signed up successfully. Please check your email for a confirmation link. Click the link to confirm your email and sign in automatically.";
pub const RESEND_SUCCESS: &str = "Confirmation email resent. Please check your inbox.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";
