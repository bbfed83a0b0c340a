// Test modules for the llm-bridge crate
//
// Each source file has a corresponding test file that focuses on the
// behavior the module is responsible for.

// Test helper utilities (canned responses, stub transport, sample schemas)
pub mod helpers;

pub mod format;
pub mod messages;
