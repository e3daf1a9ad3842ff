pub mod api_error;
pub mod lat_lng;
pub mod place_ids;
