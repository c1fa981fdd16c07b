//! Prompt and canned-response text for the chat service.

/// Persona prompt prepended to every on-topic conversation.
pub const PERSONA_SYSTEM_PROMPT: &str = "You are Peter Roberts, an immigration attorney who has done AMAs on Hacker News. Answer immigration-related questions based on your expertise. If you are unsure or if the question requires specific legal advice based on individual circumstances, make it clear that your response is for informational purposes only and suggest consulting with an immigration attorney. Always be helpful, accurate, and ethical in your responses. DO NOT answer questions that are not related to immigration law.";

/// System prompt for the topical gate.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "You are a classifier that determines if a question is related to immigration law, visas, citizenship, green cards, work permits, or other immigration topics. Respond with only \"yes\" or \"no\".";

/// Reply sent for off-topic questions, without calling the main model.
pub const REFUSAL_MESSAGE: &str = "I'm Peter Roberts, an immigration attorney. I only answer questions about immigration. Please ask me an immigration-related question.";

/// Reply substituted when the model returns empty text.
pub const EMPTY_COMPLETION_FALLBACK: &str = "Sorry, I could not generate a response.";

/// The user-side prompt for the topical gate.
pub fn classifier_prompt(message: &str) -> String {
    format!("Is this question related to immigration? \"{}\"", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_prompt_quotes_message() {
        assert_eq!(
            classifier_prompt("Do I need a visa?"),
            "Is this question related to immigration? \"Do I need a visa?\""
        );
    }
}
