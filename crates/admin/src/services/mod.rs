//! Business logic services for admin.

pub mod auth;
pub mod upload;

pub use auth::PasswordVerifier;
pub use upload::{UPLOAD_BODY_LIMIT, UploadedFile, discard_on_error, save_image};
