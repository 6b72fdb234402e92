// Library for tests to access modules

pub mod config;
pub mod duration;
pub mod models;
pub mod monitor;
pub mod routes;
pub mod version;
pub mod worker;
