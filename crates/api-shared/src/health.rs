use crate::models::HealthRes;

/// Simple health service used by the REST API.
///
/// Reports whether the doctor data set was loaded at startup. The directory is
/// still "alive" when loading failed, but it is not ready to serve results.
pub struct HealthService;

impl HealthService {
    /// Health status given whether the catalogue is available.
    ///
    /// # Returns
    /// A `HealthRes` with `ok` mirroring `catalogue_loaded`.
    pub fn check_health(catalogue_loaded: bool) -> HealthRes {
        if catalogue_loaded {
            HealthRes {
                ok: true,
                message: "Doctor directory is alive".into(),
            }
        } else {
            HealthRes {
                ok: false,
                message: "Doctor directory is alive but doctor data failed to load".into(),
            }
        }
    }
}
