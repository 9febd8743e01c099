pub mod forecast_service;
pub mod fusion;
pub mod poller;
