// ============================================================
// Quiz Engine
// ============================================================
// The text-processing core of the system:
//
//   extractor   — candidate answers from a sentence
//   formatter   — distractors + the numbered quiz document
//   parser      — quiz document → QuestionRecords
//   similarity  — character-level similarity ratio
//   grader      — free-text answer scoring
//   corpus      — reference stories and fuzzy story lookup
//
// Nothing here performs I/O or talks to the generation model;
// every function is deterministic.

pub mod corpus;
pub mod extractor;
pub mod formatter;
pub mod grader;
pub mod parser;
pub mod similarity;
