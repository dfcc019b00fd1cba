//! iOffice booking client
//!
//! Layers, inside out:
//! - `domain`: service records, dates, outcome envelope
//! - `application`: request/response mapping for each booking intent
//! - `infrastructure`: HTTP transport and service wiring
//! - `cli`: argument parsing, intent validation, dispatch, rendering

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
