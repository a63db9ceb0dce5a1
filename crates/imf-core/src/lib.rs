pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod outcome;
pub mod pipeline;
pub mod seen;
pub mod storage;
pub mod transport;
pub mod url_model;
