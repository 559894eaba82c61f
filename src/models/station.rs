/// One station inventory entry, keyed by `station_id` alone.
///
/// `distance` and `direction` are populated when the location text ends
/// with a distance/bearing pair (e.g. "BOYNTON BEACH 3.2 SSW" in the
/// source inventory becomes location "BOYNTON BEACH", distance 3.2,
/// direction "SSW").
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub station_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub state: String,
    pub location_description: String,
    pub distance: Option<f64>,
    pub direction: Option<String>,
}
