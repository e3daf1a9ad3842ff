use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<(i32, i32)> for LatLng {
    fn from((lat, lng): (i32, i32)) -> Self {
        Self::new(f64::from(lat), f64::from(lng))
    }
}

/// Renders as `lat,lng` the way the API expects it in query parameters.
impl Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_float(self.lat), format_float(self.lng))
    }
}

/// At most 8 decimals, without trailing zeros or a trailing dot.
pub fn format_float(value: f64) -> String {
    let formatted = format!("{:.8}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "-0" => String::from("0"),
        _ => String::from(trimmed),
    }
}

/// Join locations with `|`, the separator for `path` and `points`.
pub fn location_list<I, L>(locations: I) -> String
where
    I: IntoIterator<Item = L>,
    L: Into<LatLng>,
{
    locations
        .into_iter()
        .map(|location| location.into().to_string())
        .collect::<Vec<_>>()
        .join("|")
}
