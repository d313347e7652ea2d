// Candidate fit scoring: weighted heuristic over six profile dimensions.
// Pure and synchronous; no I/O, no LLM calls.

pub mod fit_scoring;
pub mod reference_sets;
