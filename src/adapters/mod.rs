pub mod cache;
pub mod openweather;
