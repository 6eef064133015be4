pub mod candidate_model;
pub mod coerce;
pub mod dedupe;
pub mod extract;
pub mod merge;
