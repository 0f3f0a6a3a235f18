pub mod config;
pub mod content;
pub mod domain;
pub mod filters;
pub mod handlers;
pub mod paths;
pub mod practice;
pub mod session;
pub mod state;
