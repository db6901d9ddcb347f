// Resume text → Profile.
// The model path (`extractor`) is tried first; `fallback` never fails.
// All model calls go through llm_client.

pub mod extractor;
pub mod fallback;
pub mod prompts;
