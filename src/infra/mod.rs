// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting support that doesn't belong to one business layer:
//
//   tokenizer_store.rs — loads a HuggingFace tokenizer.json and
//                        enforces the model's prompt token budget,
//                        falling back to word counting without one
//
//   config_store.rs    — saves / loads QuizConfig as JSON
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Tokenizer loading and prompt truncation
pub mod tokenizer_store;

/// QuizConfig persistence
pub mod config_store;
