use crate::discovery::GeoDiscoveryService;

pub struct AppState {
    pub service: GeoDiscoveryService,
}
