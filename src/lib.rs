// Library for tests to access modules

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod models;
pub mod routes;
pub mod store_repo;
pub mod version;
