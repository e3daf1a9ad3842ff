use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue},
    HeaderMap,
};
use std::collections::HashMap;

pub(crate) fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();

    // values with opaque characters are skipped, repeated headers are comma-joined
    for (name, value) in header_map {
        if let Ok(value) = value.to_str() {
            headers
                .entry(String::from(name.as_str()))
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| String::from(value));
        }
    }

    headers
}

pub(crate) fn put_headers(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: &HashMap<String, String>,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.insert(header_name, header_value);
    }

    Ok(())
}
