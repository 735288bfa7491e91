// Library for tests to access modules

pub mod config;
pub mod counters;
pub mod cpu_usage;
pub mod host_repo;
pub mod models;
pub mod rate;
pub mod routes;
pub mod service;
pub mod snapshot;
pub mod version;
pub mod worker;
