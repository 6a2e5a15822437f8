//! Dashboard services: the view-model builder, activation lifecycle, and
//! display shaping.

pub mod dashboard;
pub mod presentation;
pub mod view;
