//! Per-resource endpoint functions.
//!
//! Each function builds a path plus query parameters, makes one client call,
//! and returns the decoded JSON body verbatim unless noted. Functions taking
//! an explicit `location_id` fall back to the client's default location.

pub mod calendars;
pub mod contacts;
pub mod conversations;
pub mod locations;
pub mod objects;
pub mod opportunities;
pub mod workflows;
