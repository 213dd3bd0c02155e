pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs_util;
pub mod http;
pub mod layout;
pub mod output;
