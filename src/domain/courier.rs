use serde::{Deserialize, Serialize};

pub type CourierId = u32;

/// A delivery service a customer can book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
    pub description: String,
    /// The "Other" entry: the customer names the courier themselves.
    pub is_custom: bool,
}

const CATALOGUE: [(CourierId, &str, &str, bool); 4] = [
    (1, "Express Delivery", "Same day delivery", false),
    (2, "Standard Delivery", "2-3 days delivery", false),
    (3, "Economy Delivery", "5-7 days delivery", false),
    (4, "Other", "Custom courier service", true),
];

impl Courier {
    /// Every courier offered at booking time.
    pub fn catalogue() -> Vec<Courier> {
        CATALOGUE
            .iter()
            .map(|&(id, name, description, is_custom)| Courier {
                id,
                name: name.to_string(),
                description: description.to_string(),
                is_custom,
            })
            .collect()
    }

    pub fn find(id: CourierId) -> Option<Courier> {
        Self::catalogue().into_iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_other_is_custom() {
        let custom: Vec<_> = Courier::catalogue().into_iter().filter(|c| c.is_custom).collect();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].name, "Other");
        assert!(Courier::find(9).is_none());
    }
}
