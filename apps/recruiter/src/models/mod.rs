pub mod candidate;
pub mod job;
pub mod outcome;
pub mod report;
