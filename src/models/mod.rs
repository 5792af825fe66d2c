pub mod movie;

pub use movie::{Lookup, LookupKey, MovieRecord, Rating, NOT_AVAILABLE};
