pub mod config;
pub mod cookie;
pub mod error;
pub mod i18n;
pub mod pages;
pub mod proxy;
pub mod seo;
pub mod server;
