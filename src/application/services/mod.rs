//! Application services

pub mod ioffice;

pub use ioffice::IOfficeService;
