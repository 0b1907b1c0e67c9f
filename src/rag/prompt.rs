//! The fixed grounding prompt.
//!
//! The template instructs the model to answer strictly from the supplied
//! context and to emit [`REFUSAL`] verbatim when the answer is absent.
//! There is no post-validation that the model honored the instruction.

use crate::types::SearchResult;

/// The exact refusal string the model is instructed to emit when the
/// answer is not in the provided documents.
pub const REFUSAL: &str = "I don't know based on the provided documents.";

/// Join retrieved passage contents with blank-line separators, in ranked
/// order, to form the context block.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the grounding prompt for the given context block and question.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Use ONLY the following context to answer the question. \
         If the answer isn't in the context, say: '{}'\n\n\
         Context:\n{}\n\n\
         Question: {}",
        REFUSAL, context, question
    )
}
