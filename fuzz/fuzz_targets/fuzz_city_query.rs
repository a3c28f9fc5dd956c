#![no_main]
use libfuzzer_sys::fuzz_target;

use weather_cache_proxy::adapters::openweather::client::build_current_weather_url;
use weather_cache_proxy::domain::city::City;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(city) = City::from_query(Some(raw)) {
            let _ = build_current_weather_url(
                "http://api.openweathermap.org",
                city.as_str(),
                "key",
                "metric",
            );
        }
    }
});
