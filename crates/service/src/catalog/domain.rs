use serde::{Deserialize, Serialize};

/// A menu entry as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Create input; `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

/// Full replacement of an item's mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemChanges {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl ItemChanges {
    pub fn into_item(self, id: String) -> Item {
        Item { id, name: self.name, description: self.description, price: self.price }
    }
}

impl From<models::item::Model> for Item {
    fn from(m: models::item::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, price: m.price }
    }
}

impl From<Item> for models::item::Model {
    fn from(i: Item) -> Self {
        Self { id: i.id, name: i.name, description: i.description, price: i.price }
    }
}
