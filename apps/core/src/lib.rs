pub mod config;
pub mod contract;
pub mod core_service;
pub mod data_context;
pub mod filter;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod runtime;
pub mod search;
pub mod transport;
