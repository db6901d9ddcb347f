// Resume upload → profile.
// Implements: upload storage, the extraction pipeline, and the JSON endpoint.

pub mod handlers;
pub mod pipeline;
pub mod upload;
