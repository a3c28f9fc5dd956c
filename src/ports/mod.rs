pub mod cache;
pub mod weather_provider;
