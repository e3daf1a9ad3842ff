mod data;
mod error;
mod retry;
mod roads_api_client;

pub use data::{
    api_error::ApiErrorDetail,
    lat_lng::{format_float, LatLng},
    place_ids::PlaceIds,
};
pub use error::Error;
pub use retry::{RetryPolicy, RETRIABLE_STATUSES};
pub use roads_api_client::{ClientCredentials, RoadsClient, RoadsClientBuilder};
pub use serde_json::Value;
