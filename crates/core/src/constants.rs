//! Constants used throughout the directory core crate.
//!
//! Query parameter names form the shareable-URL contract, so they live here
//! rather than next to the parsing code.

/// Default location of the doctor data set.
pub const DEFAULT_SOURCE_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Default bind address for the REST/HTML server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Query parameter carrying the free-text name search.
pub const SEARCH_PARAM: &str = "search";

/// Query parameter carrying the consultation type.
pub const TYPE_PARAM: &str = "type";

/// Query parameter carrying the comma-joined selected specialties.
pub const SPECIALTIES_PARAM: &str = "specialties";

/// Query parameter carrying the sort key.
pub const SORT_PARAM: &str = "sort";

/// Separator used to join specialty names in the URL.
pub const SPECIALTY_SEPARATOR: &str = ",";

/// Maximum number of search suggestions offered at once.
pub const MAX_SUGGESTIONS: usize = 3;

/// Notice shown in place of the result list when nothing matches.
pub const NO_RESULTS_NOTICE: &str = "No doctors found matching your criteria.";

/// Notice shown in place of the whole UI when the startup fetch fails.
pub const LOAD_FAILED_NOTICE: &str = "Failed to load doctor data. Please try again later.";
