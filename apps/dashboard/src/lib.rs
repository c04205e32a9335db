pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod http;
pub mod models;
pub mod pages;
pub mod query;
pub mod routes;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;
pub mod validation;
