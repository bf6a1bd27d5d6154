//! Cart display formatting

use crate::models::Cart;

pub fn format_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "The cart is empty.".to_string();
    }

    let title_width = cart
        .items
        .iter()
        .map(|item| item.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>13}  {:<title_width$}  {:<8}  {:>10}\n",
        "ID",
        "Title",
        "Payment",
        "Price",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:->13}  {:-<title_width$}  {:-<8}  {:->10}\n",
        "",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for item in &cart.items {
        output.push_str(&format!(
            "{:>13}  {:<title_width$}  {:<8}  {:>10}\n",
            item.id.value(),
            item.title,
            item.payment_type.to_string(),
            item.price().to_string(),
            title_width = title_width,
        ));
    }

    output.push_str(&format!(
        "{:>13}  {:<title_width$}  {:<8}  {:>10}\n",
        "",
        "TOTAL",
        "",
        cart.total().to_string(),
        title_width = title_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewNovela, Novela, NovelaId, PaymentType, PriceConfig};
    use crate::services::line_item;
    use chrono::Utc;

    #[test]
    fn test_cart_total_line() {
        let novela = Novela::from_new(
            NovelaId::new(4),
            NewNovela::priced("Rubí", "Drama", 20, 2004, &PriceConfig::default()),
            Utc::now(),
        );
        let mut cart = Cart::new();
        cart.items.push(line_item(&novela, PaymentType::Transfer));

        let output = format_cart(&cart);
        assert!(output.contains("100004"));
        assert!(output.contains("transfer"));
        assert!(output.contains("$110"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(format_cart(&Cart::new()), "The cart is empty.");
    }
}
