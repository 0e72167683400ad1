//! Core types for Doughda.
//!
//! This module provides type-safe wrappers for the bakery's domain concepts.

pub mod holiday;
pub mod id;
pub mod price;
pub mod product;
pub mod store;

pub use holiday::{
    Holiday, HolidayCheck, HolidayCheckQuery, HolidayId, HolidayOccurrence, HolidayPatch, NewHoliday,
    find_holiday, upcoming_holidays,
};
pub use id::*;
pub use price::Price;
pub use product::{NewProduct, Product, ProductId, ProductPatch};
pub use store::{StoreHours, StoreStatus, StoreStatusPatch, hours_for, validate_hours};
