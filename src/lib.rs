#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod dataset;
pub mod exporters;
pub mod http;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
