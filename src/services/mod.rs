pub mod providers;
pub mod recommendations;
pub mod search;

pub use recommendations::{load_recommendations, Recommendations};
pub use search::{ErrorKind, LookupSource, SearchController, ViewError, ViewState};
