// Cross-cutting prompt fragments. Feature prompts live next to the feature
// (see profile/prompts.rs).

/// Trivial prompt used by the `/test-gemini` connectivity check.
pub const PING_PROMPT: &str = "Reply with only the word OK";
