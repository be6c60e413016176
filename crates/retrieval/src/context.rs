use crate::types::ProductMatch;

/// Format retrieved products as a context block for the chat prompt.
///
/// One block per match in input order, separated by a blank line. Zero
/// matches produce an empty string; the system prompt handles the
/// no-products case, this only formats what it is given.
pub fn product_context(matches: &[ProductMatch]) -> String {
    matches
        .iter()
        .map(|p| {
            let image_url = p.image_url.as_deref().unwrap_or("");
            format!(
                "Product: {} (${})\nDetails: {}\n![{}]({})",
                p.name, p.price, p.description, p.name, image_url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
