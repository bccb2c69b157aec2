mod informed_search;
mod measure_informed;
mod search_statistics;

pub use informed_search::{InformedSearch, SearchStatus};
pub use measure_informed::{measure_informed, measure_informed_traceback};
pub use search_statistics::SearchStatistics;
