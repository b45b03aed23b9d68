pub mod credential_store;
pub mod moderated_review_store;
pub mod review_board;

pub use credential_store::CredentialStore;
pub use moderated_review_store::ModeratedReviewStore;
pub use review_board::ReviewBoard;
