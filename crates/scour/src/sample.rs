//! A small sales dataset seeded with every defect the validator looks for.

use crate::dataset::{Dataset, Value};

fn text(values: &[Option<&str>]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

/// Twelve sales orders with a duplicated row, missing values, outliers,
/// a malformed email, an impossible date, mixed boolean spellings and
/// column names that need normalizing.
pub fn sales_data() -> Dataset {
    let order_id: Vec<Value> = [1, 2, 3, 4, 5, 5, 7, 8, 9, 10, 11, 12]
        .into_iter()
        .map(Value::from)
        .collect();

    let customer_name = text(&[
        Some("John Doe"),
        Some("Jane Smith"),
        None,
        Some("Bob Johnson"),
        Some("Alice Williams"),
        Some("Alice Williams"),
        Some("Charlie Brown"),
        Some("Diana Prince"),
        Some("Eve Davis"),
        Some("Frank Miller"),
        Some("Grace Lee"),
        Some("Henry Wilson"),
    ]);

    let customer_email = text(&[
        Some("john@email.com"),
        Some("jane@email.com"),
        Some("invalid_email"),
        Some("bob@email.com"),
        Some("alice@email.com"),
        Some("alice@email.com"),
        None,
        Some("diana@email.com"),
        Some("eve@email.com"),
        Some("frank@email.com"),
        Some("grace@email.com"),
        Some("henry@email.com"),
    ]);

    let age: Vec<Value> = [25, 30, -5, 45, 28, 28, 35, 150, 22, 40, 33, 29]
        .into_iter()
        .map(Value::from)
        .collect();

    let order_amount: Vec<Value> = [
        Some(100.50),
        Some(250.75),
        Some(50.00),
        None,
        Some(300.00),
        Some(300.00),
        Some(175.25),
        Some(425.50),
        Some(80.00),
        Some(999999.99),
        Some(200.00),
        Some(150.50),
    ]
    .into_iter()
    .map(Value::from)
    .collect();

    let order_date = text(&[
        Some("2024-01-15"),
        Some("2024-01-16"),
        Some("2024-13-45"),
        Some("2024-01-18"),
        Some("2024-01-19"),
        Some("2024-01-19"),
        Some("2024-01-20"),
        Some("2024-01-21"),
        Some("2024-01-22"),
        Some("2024-01-23"),
        Some("2024-01-24"),
        Some("2024-01-25"),
    ]);

    let product_category = [
        "Electronics",
        "Clothing",
        "Electronics",
        "Home",
        "Electronics",
        "Electronics",
        "Clothing",
        "Home",
        "Electronics",
        "Clothing",
        "Home",
        "Electronics",
    ]
    .into_iter()
    .map(Value::from)
    .collect();

    let quantity: Vec<Value> = [1, 2, 1, 3, 1, 1, 2, 1, 1, 5, 2, 1]
        .into_iter()
        .map(Value::from)
        .collect();

    let is_shipped = [
        "True", "False", "True", "True", "False", "False", "True", "True", "1", "0", "True",
        "False",
    ]
    .into_iter()
    .map(Value::from)
    .collect();

    Dataset::from_columns(vec![
        ("order id", order_id),
        ("customer name", customer_name),
        ("customer-email", customer_email),
        ("Age", age),
        ("order_amount", order_amount),
        ("order date", order_date),
        ("product_category", product_category),
        ("quantity", quantity),
        ("is_shipped", is_shipped),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DType;

    #[test]
    fn test_shape() {
        let ds = sales_data();
        assert_eq!(ds.row_count(), 12);
        assert_eq!(ds.column_count(), 9);
        assert_eq!(ds.column("Age").unwrap().dtype, DType::Integer);
        assert_eq!(ds.column("order_amount").unwrap().dtype, DType::Float);
        assert_eq!(ds.column("is_shipped").unwrap().dtype, DType::Text);
    }
}
