use std::fmt::Write;

use super::MatchInput;
use crate::constants::EXPLAIN_PROMPT_MATCHES;

/// One context line: `"- <name>: <description>"`, plus `" Compounds: <list>"` when known.
pub fn format_match_line(m: &MatchInput) -> String {
    let mut line = format!("- {}: {}", m.name, m.description);
    if let Some(compounds) = m.compounds.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(line, " Compounds: {}", compounds);
    }
    line
}

/// Builds the generation prompt from the first few matches, in caller order.
///
/// Pure: identical input yields a byte-identical prompt.
pub fn build_explain_prompt(query: &str, matches: &[MatchInput]) -> String {
    let context = matches
        .iter()
        .take(EXPLAIN_PROMPT_MATCHES)
        .map(format_match_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a culinary scientist explaining flavor connections between ingredients.

A user searched for \"{query}\" and found these similar ingredients (ranked by chemical similarity):

{context}

Explain WHY these ingredients are \"chemical cousins\" to {query}. Focus on:
1. Shared flavor compounds (glutamates, fermentation byproducts, etc.)
2. The science behind the similarity (amino acids, Maillard reaction, etc.)
3. A practical cooking tip for substitution

Keep it concise (2-3 sentences max) and accessible to home cooks."
    )
}
