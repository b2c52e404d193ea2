use rust_decimal::Decimal;

use crate::core::{Client, InvoiceLayout, Product, ValidationError};

/// A value destined for one template cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
}

/// One cell assignment, e.g. `B11 = "Widget"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub cell: String,
    pub value: CellValue,
}

impl CellWrite {
    fn text(cell: String, value: impl Into<String>) -> Self {
        Self {
            cell,
            value: CellValue::Text(value.into()),
        }
    }
}

/// Compute every cell an invoice for `client` and `products` fills in.
///
/// The client identity goes first, then name and price for each product in
/// the given order.
///
/// # Errors
///
/// A `ValidationError` on field `products` unless exactly
/// `layout.line_items` products are given.
pub fn plan_invoice(
    layout: &InvoiceLayout,
    client: &Client,
    products: &[Product],
) -> Result<Vec<CellWrite>, ValidationError> {
    if products.len() != layout.line_items {
        return Err(ValidationError::new(
            "products",
            format!(
                "an invoice takes exactly {} products, got {}",
                layout.line_items,
                products.len()
            ),
        ));
    }

    let mut writes = Vec::with_capacity(1 + 2 * products.len());
    writes.push(CellWrite::text(layout.client_cell.clone(), client.identity()));
    for (i, product) in products.iter().enumerate() {
        writes.push(CellWrite::text(
            layout.item_cell(&layout.name_column, i),
            product.name(),
        ));
        writes.push(CellWrite {
            cell: layout.item_cell(&layout.price_column, i),
            value: CellValue::Number(product.price()),
        });
    }
    Ok(writes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn client() -> Client {
        Client::new(1, "Anna Nowak", "ul. Długa 5, Gdańsk", "0123456789").unwrap()
    }

    #[test]
    fn default_layout_cells() {
        let products = [
            Product::new(1, "Widget", dec!(9.99)).unwrap(),
            Product::new(2, "Gadget", dec!(19.99)).unwrap(),
        ];
        let writes = plan_invoice(&InvoiceLayout::default(), &client(), &products).unwrap();
        let cells: Vec<&str> = writes.iter().map(|w| w.cell.as_str()).collect();
        assert_eq!(cells, ["B7", "B11", "C11", "B12", "C12"]);
        assert_eq!(
            writes[0].value,
            CellValue::Text("Anna Nowak, ul. Długa 5, Gdańsk, NIP: 0123456789".into())
        );
        assert_eq!(writes[4].value, CellValue::Number(dec!(19.99)));
    }

    #[test]
    fn wrong_item_count_rejected() {
        let products = [Product::new(1, "Widget", dec!(9.99)).unwrap()];
        let err = plan_invoice(&InvoiceLayout::default(), &client(), &products).unwrap_err();
        assert_eq!(err.field, "products");
    }

    #[test]
    fn custom_layout() {
        let layout = InvoiceLayout {
            client_cell: "A1".into(),
            first_item_row: 20,
            name_column: "D".into(),
            price_column: "F".into(),
            line_items: 1,
            ..InvoiceLayout::default()
        };
        let products = [Product::new(5, "Bolt", dec!(0.5)).unwrap()];
        let writes = plan_invoice(&layout, &client(), &products).unwrap();
        let cells: Vec<&str> = writes.iter().map(|w| w.cell.as_str()).collect();
        assert_eq!(cells, ["A1", "D20", "F20"]);
    }
}
