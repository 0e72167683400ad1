//! Repositories over the stored documents.
//!
//! Each mutation loads the full document, edits it in memory and writes it
//! back. Nothing serializes concurrent writers.

mod holidays;
mod products;
mod store;

pub use holidays::HolidayRepository;
pub use products::ProductRepository;
pub use store::{StoreHoursRepository, StoreStatusRepository};
