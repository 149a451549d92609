// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal (generating a quiz or scoring a submission).
//
// Rules for this layer:
//   - No model calls except through the QuestionModel trait
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Settings shared by every workflow
pub mod config;

// Text → quiz document → structured questions
pub mod generate_use_case;

// Grading a full submission
pub mod score_use_case;
