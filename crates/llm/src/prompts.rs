//! Prompt templates for the shopping assistant

/// Base instruction for the shopping assistant.
///
/// The empty-context rule matters: when retrieval surfaces nothing, the
/// model must not invent products.
const SHOPPING_ASSISTANT_PROMPT: &str = r#"You are a helpful shopping assistant.
Use the following product information to answer the user's question.
If there are no products do NOT generate any products.

INSTRUCTION: Format your response using Markdown.
- Use **bold** for product names and prices.
- Use lists for features.
- When showing a product, include its image exactly as provided in the context using Markdown syntax: ![Product Name](URL)."#;

/// Build the system instruction with retrieved product context embedded
pub fn shopping_system_prompt(product_context: &str) -> String {
    format!("{}\n\nCONTEXT:\n{}", SHOPPING_ASSISTANT_PROMPT, product_context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context() {
        let prompt = shopping_system_prompt("Product: Shoes ($10)");
        assert!(prompt.contains("CONTEXT:\nProduct: Shoes ($10)"));
        assert!(prompt.starts_with("You are a helpful shopping assistant."));
    }

    #[test]
    fn test_prompt_with_empty_context() {
        let prompt = shopping_system_prompt("");
        assert!(prompt.ends_with("CONTEXT:\n"));
    }
}
