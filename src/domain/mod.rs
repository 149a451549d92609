// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what a quiz
// IS, independent of how it is generated, parsed or graded.
//
// Rules for this layer:
//   - NO HTTP clients or tokenizers here
//   - NO file I/O
//   - Only data types and the capability traits other layers implement
//
// The generation model is modelled as a capability (QuestionModel)
// that is constructed once and handed to whoever needs it, so
// nothing in the system reaches for a global model instance.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A text document supplied by the user as quiz source material
pub mod document;

// Question records, question kinds and per-type requested counts
pub mod question;

// Reference stories and their gold question/answer pairs
pub mod story;

// Capability traits (generation model, story source) and their errors
pub mod traits;
