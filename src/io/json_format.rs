//! JSON export of transaction records
//!
//! The export is a pretty-printed JSON array using the same field names as the
//! stored records, so an export can be read back with [`parse_json_export`]
//! and yields the original records field for field.

use crate::types::{TrackerError, Transaction};

/// Serialize records to a pretty-printed JSON array
pub fn export_to_json<'a, I>(transactions: I) -> Result<String, TrackerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let records: Vec<&Transaction> = transactions.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse a JSON export back into records
pub fn parse_json_export(text: &str) -> Result<Vec<Transaction>, TrackerError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{expense, income};
    use crate::types::Category;
    use rust_decimal::Decimal;

    #[test]
    fn test_export_round_trips() {
        let mut lunch = expense(Category::Food, 1250, "2024-01-05");
        lunch.description = "Pizza, \"large\"\nwith extra cheese".to_string();
        lunch.payment_method = Some("Card".to_string());
        let mut pay = income(Category::Salary, 200000, "2024-01-31");
        pay.amount = Decimal::new(2000000001, 6);
        let mut unlabelled = expense(Category::Other, 99, "2023-12-31");
        unlabelled.category = None;
        let records = vec![lunch, pay, unlabelled];

        let text = export_to_json(&records).unwrap();
        let parsed = parse_json_export(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_export_is_pretty_printed_array() {
        let records = vec![expense(Category::Food, 500, "2024-01-05")];
        let text = export_to_json(&records).unwrap();

        assert!(text.starts_with("[\n  {"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["type"], "expense");
        assert_eq!(value[0]["amount"], "5.00");
        assert_eq!(value[0]["date"], "2024-01-05");
    }

    #[test]
    fn test_empty_export() {
        let records: Vec<Transaction> = Vec::new();
        assert_eq!(export_to_json(&records).unwrap(), "[]");
    }
}
