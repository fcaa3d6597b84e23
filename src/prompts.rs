use crate::models::Product;

pub const CHAT_SYSTEM: &str = include_str!("../data/prompts/chat_system.txt");
pub const DISCLAIMER: &str = include_str!("../data/prompts/disclaimer.txt");
pub const STOCK_CONTEXT: &str = include_str!("../data/prompts/stock_context.txt");
pub const PRESCRIPTION: &str = include_str!("../data/prompts/prescription.txt");

/// Upper bound on products forwarded as stock context.
pub const MAX_STOCK_PRODUCTS: usize = 50;

const STOCK_SEPARATOR: &str = ", ";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Persona instructions with the closing disclaimer filled in.
pub fn system_instruction() -> String {
    render(CHAT_SYSTEM, &[("disclaimer", DISCLAIMER.trim())])
        .trim()
        .to_string()
}

/// Renders at most [`MAX_STOCK_PRODUCTS`] entries as `"<name> (Preço: Kz <price>)"`.
pub fn stock_list(products: &[Product]) -> String {
    products
        .iter()
        .take(MAX_STOCK_PRODUCTS)
        .map(|p| format!("{} (Preço: Kz {})", p.name, p.price))
        .collect::<Vec<_>>()
        .join(STOCK_SEPARATOR)
}

/// Single-prompt form: instructions, optional stock context, then the message.
pub fn combined_prompt(products: Option<&[Product]>, message: &str) -> String {
    let mut sections = vec![system_instruction()];

    if let Some(products) = products.filter(|p| !p.is_empty()) {
        sections.push(
            render(STOCK_CONTEXT, &[("products", &stock_list(products))])
                .trim()
                .to_string(),
        );
    }

    sections.push(format!("Pergunta do cliente: {}", message));
    sections.join("\n\n")
}
