//! Document models for the fetched collections and the derived dashboard view.

pub mod dashboard;
pub mod product;
pub mod punch_record;
pub mod quotation;
pub mod request;
pub mod timestamp;
