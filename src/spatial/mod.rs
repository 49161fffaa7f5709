mod query;

pub use query::{current_matches, historical_matches, CurrentMatch, HistoricalMatch, RadiusQuery};
