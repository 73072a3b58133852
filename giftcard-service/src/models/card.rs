use serde::{Deserialize, Serialize};

/// Account snapshot returned by the balance lookup.
///
/// Every field is kept exactly as the upstream reported it; amounts and dates
/// are display strings such as `"$12.34"` or `"1 Jan 2018"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Card {
    pub card_no: String,
    pub account_no: String,
    pub loads_to_date: String,
    pub purchases_to_date: String,
    pub available_balance: String,
    pub purchased_date: String,
    pub expiry_date: String,
    /// Ordered as listed by the upstream, oldest first.
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Transaction {
    pub date: String,
    pub details: String,
    pub description: String,
    pub amount: String,
    pub balance: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_pascal_case_field_names() {
        let card = Card {
            card_no: "50211234567890".to_string(),
            available_balance: "$12.34".to_string(),
            transactions: vec![Transaction {
                amount: "$12.34-".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["CardNo"], "50211234567890");
        assert_eq!(value["AvailableBalance"], "$12.34");
        assert_eq!(value["Transactions"][0]["Amount"], "$12.34-");
    }

    #[test]
    fn tolerates_missing_fields() {
        let card: Card = serde_json::from_value(json!({ "CardNo": "123" })).unwrap();
        assert_eq!(card.card_no, "123");
        assert!(card.transactions.is_empty());
    }
}
