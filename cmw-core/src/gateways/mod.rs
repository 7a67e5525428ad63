pub mod compose;
pub mod geolocation;
