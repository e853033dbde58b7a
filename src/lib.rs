pub mod ai;
pub mod app;
pub mod config;
pub mod provisioning;
pub mod shared;
pub mod site_admin;
pub mod store;
pub mod web;
pub mod wizard;
