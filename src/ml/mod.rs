// ============================================================
// Layer 5 — Generation Layer
// ============================================================
// Everything that touches the question-generation model lives
// here. Other layers only see the QuestionModel trait.
//
//   synthesizer.rs — QuestionSynthesizer: builds the prompt, applies
//                    the token budget, calls the model, cleans and
//                    filters the output
//
//   cloze.rs       — ClozeModel: offline, deterministic backend that
//                    turns the answer span into a fill-in-the-blank
//
//   remote.rs      — RemoteModel: HTTP text2text-generation endpoint
//                    (e.g. a hosted T5 question-generation model)
//
// The model is a capability object: constructed once by the caller,
// borrowed by the synthesizer, never stored in a global.

/// Prompt construction and output cleaning around a QuestionModel
pub mod synthesizer;

/// Offline fill-in-the-blank generator
pub mod cloze;

/// HTTP inference endpoint client
pub mod remote;
