// ABOUTME: Shared utility functions for the thesis archive
// ABOUTME: Record id generation

/// Generate a prefixed record id, e.g. `thesis-V1StGXR8_Z5jdHi6B-myT`
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, nanoid::nanoid!())
}
