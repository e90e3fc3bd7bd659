use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    ///
    /// Enum-like fields travel as plain strings; the server validates them.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(default)]
        pub amount: f64,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub paid_by: String,
        #[serde(default)]
        pub shared_with: Vec<String>,
        pub split_type: Option<String>,
        #[serde(default)]
        pub split_values: Vec<f64>,
        pub category: Option<String>,
        #[serde(default)]
        pub is_recurring: bool,
        pub recurring_type: Option<String>,
        pub recurring_interval: Option<i64>,
        pub recurring_end_date: Option<String>,
    }

    /// A stored expense as returned by the API.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        pub shared_with: Vec<String>,
        pub split_type: String,
        pub split_values: Vec<f64>,
        pub category: String,
        pub is_recurring: bool,
        pub recurring_type: String,
        pub recurring_interval: u32,
        pub recurring_end_date: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod settlement {
    use std::fmt;

    use serde::{
        Deserializer, Serializer,
        de::{MapAccess, Visitor},
        ser::SerializeMap,
    };

    use super::*;

    /// A suggested payment.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from: String,
        pub to: String,
        pub amount: f64,
    }

    /// Net balance per person, serialized as a flat JSON object.
    ///
    /// Keys keep the order the ledger produced them in.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct BalancesView(pub Vec<(String, f64)>);

    impl BalancesView {
        pub fn get(&self, person: &str) -> Option<f64> {
            self.0
                .iter()
                .find(|(name, _)| name == person)
                .map(|(_, amount)| *amount)
        }
    }

    impl Serialize for BalancesView {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (person, amount) in &self.0 {
                map.serialize_entry(person, amount)?;
            }
            map.end()
        }
    }

    struct BalancesVisitor;

    impl<'de> Visitor<'de> for BalancesVisitor {
        type Value = BalancesView;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of person to balance")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((person, amount)) = access.next_entry::<String, f64>()? {
                entries.push((person, amount));
            }
            Ok(BalancesView(entries))
        }
    }

    impl<'de> Deserialize<'de> for BalancesView {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(BalancesVisitor)
        }
    }
}

pub mod analytics {
    use super::*;
    use crate::expense::ExpenseView;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthlyTotal {
        /// `YYYY-MM`
        pub month: String,
        pub total: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Analytics {
        pub monthly: Vec<MonthlyTotal>,
        pub category_summary: Vec<CategoryTotal>,
        pub top_categories: Vec<CategoryTotal>,
        pub top_transactions: Vec<ExpenseView>,
    }
}

#[cfg(test)]
mod tests {
    use super::settlement::BalancesView;

    #[test]
    fn balances_serialize_as_ordered_object() {
        let view = BalancesView(vec![
            ("Zoe".to_string(), 20.5),
            ("Adam".to_string(), -20.5),
        ]);
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(json, r#"{"Zoe":20.5,"Adam":-20.5}"#);

        let back: BalancesView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
        assert_eq!(back.get("Adam"), Some(-20.5));
    }

    #[test]
    fn expense_new_fills_defaults() {
        let body: super::expense::ExpenseNew =
            serde_json::from_str(r#"{"amount": 12.5, "description": "Taxi"}"#).unwrap();
        assert_eq!(body.amount, 12.5);
        assert!(body.shared_with.is_empty());
        assert!(body.split_type.is_none());
        assert!(!body.is_recurring);
    }
}
