//! Quick prompts offered to visitors.

/// Canned questions a visitor can send with one keystroke.
pub const SUGGESTIONS: [&str; 5] = [
    "Who is Aryan?",
    "Show my skills",
    "Show my projects",
    "Tell me about my experience",
    "What do I specialize in?",
];

/// Look up a suggestion by its 1-based position.
pub fn suggestion(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)).copied()
}
