// Shared data contracts for the screening pipeline.
// Each record type lives next to the extraction schema that produces it.

pub mod candidate;
pub mod job;
pub mod score;
