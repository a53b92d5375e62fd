//! Seasonal weather defaults used to pre-fill temperature, rainfall and
//! humidity before a prediction. Values are kharif-season city averages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAverages {
    /// °C
    pub temperature: f64,
    /// mm
    pub rainfall: f64,
    /// percent
    pub humidity: f64,
}

const fn avg(temperature: f64, rainfall: f64, humidity: f64) -> WeatherAverages {
    WeatherAverages {
        temperature,
        rainfall,
        humidity,
    }
}

const CITY_WEATHER: [(&str, WeatherAverages); 31] = [
    ("Mumbai", avg(28.5, 2200.0, 78.0)),
    ("Delhi", avg(30.2, 700.0, 65.0)),
    ("Bangalore", avg(24.8, 970.0, 72.0)),
    ("Hyderabad", avg(27.5, 750.0, 68.0)),
    ("Ahmedabad", avg(29.8, 800.0, 70.0)),
    ("Chennai", avg(30.5, 1400.0, 75.0)),
    ("Kolkata", avg(29.2, 1600.0, 80.0)),
    ("Pune", avg(26.5, 1600.0, 70.0)),
    ("Jaipur", avg(31.5, 650.0, 60.0)),
    ("Lucknow", avg(30.8, 1000.0, 72.0)),
    ("Kanpur", avg(31.2, 950.0, 68.0)),
    ("Nagpur", avg(29.5, 1200.0, 70.0)),
    ("Indore", avg(28.8, 1000.0, 68.0)),
    ("Bhopal", avg(29.0, 1200.0, 70.0)),
    ("Visakhapatnam", avg(29.5, 1000.0, 75.0)),
    ("Patna", avg(30.5, 1100.0, 75.0)),
    ("Vadodara", avg(29.5, 900.0, 72.0)),
    ("Coimbatore", avg(26.5, 700.0, 70.0)),
    ("Vijayawada", avg(30.0, 900.0, 72.0)),
    ("Jodhpur", avg(32.5, 350.0, 55.0)),
    ("Madurai", avg(30.0, 850.0, 70.0)),
    ("Raipur", avg(29.8, 1300.0, 75.0)),
    ("Kota", avg(31.0, 700.0, 65.0)),
    ("Guwahati", avg(28.5, 1800.0, 80.0)),
    ("Chandigarh", avg(29.5, 900.0, 68.0)),
    ("Mysore", avg(25.5, 800.0, 72.0)),
    ("Bhubaneswar", avg(29.8, 1500.0, 78.0)),
    ("Kochi", avg(27.5, 3000.0, 85.0)),
    ("Dehradun", avg(26.5, 2000.0, 75.0)),
    ("Gurgaon", avg(30.5, 750.0, 65.0)),
    ("Noida", avg(30.8, 750.0, 65.0)),
];

pub const DEFAULT_WEATHER: WeatherAverages = avg(28.5, 1000.0, 70.0);
const NORTH_WEATHER: WeatherAverages = avg(30.0, 800.0, 65.0);
const SOUTH_WEATHER: WeatherAverages = avg(28.0, 1200.0, 75.0);

pub const SOURCE: &str = "Indian City Weather Database";

/// Weather lookup request: a city name or a coordinate pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    /// whole millimetres
    pub rainfall: i64,
    /// whole percent
    pub humidity: i64,
    pub source: String,
}

// "dElHi" -> "Delhi"
fn normalize_city(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Exact city match, then the first city whose name contains or is
/// contained in the query, then the national default.
pub fn lookup_city(name: &str) -> WeatherAverages {
    let city = normalize_city(name.trim());
    if let Some((_, w)) = CITY_WEATHER.iter().find(|(c, _)| *c == city) {
        return *w;
    }
    let query = city.to_lowercase();
    if query.is_empty() {
        return DEFAULT_WEATHER;
    }
    CITY_WEATHER
        .iter()
        .find(|(c, _)| {
            let c = c.to_lowercase();
            c.contains(&query) || query.contains(&c)
        })
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_WEATHER)
}

pub fn lookup_coordinates(latitude: f64) -> WeatherAverages {
    if latitude > 20.0 {
        NORTH_WEATHER
    } else {
        SOUTH_WEATHER
    }
}

/// Resolve a query. Returns `None` when neither a city nor both
/// coordinates are present.
pub fn resolve(query: &WeatherQuery) -> Option<WeatherReport> {
    let (label, w) = match (&query.city, query.latitude, query.longitude) {
        (Some(city), _, _) if !city.trim().is_empty() => (city.clone(), lookup_city(city)),
        (_, Some(lat), Some(_)) => ("Current Location".to_string(), lookup_coordinates(lat)),
        _ => return None,
    };
    Some(WeatherReport {
        city: label,
        temperature: (w.temperature * 10.0).round() / 10.0,
        rainfall: w.rainfall.round() as i64,
        humidity: w.humidity.round() as i64,
        source: SOURCE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_case_insensitive_match() {
        assert_eq!(lookup_city("Delhi"), avg(30.2, 700.0, 65.0));
        assert_eq!(lookup_city("jODHPUR"), avg(32.5, 350.0, 55.0));
    }

    #[test]
    fn partial_match_and_default() {
        // "new delhi" contains "delhi"
        assert_eq!(lookup_city("New Delhi"), avg(30.2, 700.0, 65.0));
        assert_eq!(lookup_city("Atlantis"), DEFAULT_WEATHER);
    }

    #[test]
    fn coordinates_split_north_south() {
        assert_eq!(lookup_coordinates(28.6), NORTH_WEATHER);
        assert_eq!(lookup_coordinates(20.0), SOUTH_WEATHER);
    }

    #[test]
    fn resolve_requires_city_or_coordinates() {
        assert!(resolve(&WeatherQuery::default()).is_none());
        let only_lat = WeatherQuery {
            latitude: Some(12.9),
            ..Default::default()
        };
        assert!(resolve(&only_lat).is_none());

        let q = WeatherQuery {
            latitude: Some(12.9),
            longitude: Some(77.6),
            ..Default::default()
        };
        let r = resolve(&q).unwrap();
        assert_eq!(r.city, "Current Location");
        assert_eq!(r.rainfall, 1200);
        assert_eq!(r.source, SOURCE);
    }

    #[test]
    fn report_serializes_whole_numbers() {
        let q = WeatherQuery {
            city: Some("Delhi".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(resolve(&q).unwrap()).unwrap();
        assert!(v["rainfall"].is_i64(), "{v}");
        assert!(v["humidity"].is_i64(), "{v}");
        assert!(v["temperature"].is_f64(), "{v}");
    }
}
