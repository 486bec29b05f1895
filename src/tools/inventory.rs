//! Inventory mutation tools.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, Tool};
use crate::inventory::Inventory;

/// Append an item.
pub struct AddItem {
    inventory: Inventory,
}

impl AddItem {
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl Tool for AddItem {
    fn name(&self) -> &str {
        "add_item"
    }

    fn description(&self) -> &str {
        "Adds a new pharmaceutical item to the inventory."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item": {
                    "type": "string",
                    "description": "Name of the item to add"
                }
            },
            "required": ["item"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let item = required_str(&args, "item")?;
        tracing::info!("Adding item: {}", item);
        Ok(self.inventory.add(item).await.to_string())
    }
}

/// Remove the first matching item.
pub struct DeleteItem {
    inventory: Inventory,
}

impl DeleteItem {
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl Tool for DeleteItem {
    fn name(&self) -> &str {
        "delete_item"
    }

    fn description(&self) -> &str {
        "Deletes a pharmaceutical item from the inventory."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item": {
                    "type": "string",
                    "description": "Exact name of the item to delete"
                }
            },
            "required": ["item"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let item = required_str(&args, "item")?;
        tracing::info!("Deleting item: {}", item);
        Ok(self.inventory.delete(item).await.to_string())
    }
}

/// Rename the first matching item in place.
pub struct UpdateItem {
    inventory: Inventory,
}

impl UpdateItem {
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl Tool for UpdateItem {
    fn name(&self) -> &str {
        "update_item"
    }

    fn description(&self) -> &str {
        "Updates an existing pharmaceutical item to a new one."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "old_item": {
                    "type": "string",
                    "description": "Exact name of the item to replace"
                },
                "new_item": {
                    "type": "string",
                    "description": "Replacement item name"
                }
            },
            "required": ["old_item", "new_item"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let old_item = required_str(&args, "old_item")?;
        let new_item = required_str(&args, "new_item")?;
        tracing::info!("Updating item: {} -> {}", old_item, new_item);
        Ok(self.inventory.update(old_item, new_item).await.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_item_relays_store_result() {
        let inv = Inventory::seeded();
        let out = AddItem::new(inv.clone())
            .execute(json!({"item": "Amoxicillin"}))
            .await
            .unwrap();
        assert_eq!(out, "Added: Amoxicillin");
        assert_eq!(inv.snapshot().await.last().map(String::as_str), Some("Amoxicillin"));
    }

    #[tokio::test]
    async fn delete_item_not_found_is_ok() {
        let inv = Inventory::seeded();
        let out = DeleteItem::new(inv.clone())
            .execute(json!({"item": "Insulin"}))
            .await
            .unwrap();
        assert_eq!(out, "Insulin not found");
        assert_eq!(inv.len().await, 3);
    }

    #[tokio::test]
    async fn update_item_requires_both_arguments() {
        let inv = Inventory::seeded();
        let tool = UpdateItem::new(inv.clone());

        let err = tool
            .execute(json!({"old_item": "Aspirin"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'new_item' argument");
        assert_eq!(inv.snapshot().await, Inventory::seeded().snapshot().await);

        let out = tool
            .execute(json!({"old_item": "Aspirin", "new_item": "Naproxen"}))
            .await
            .unwrap();
        assert_eq!(out, "Updated: Aspirin -> Naproxen");
        assert_eq!(
            inv.snapshot().await,
            vec!["Paracetamol", "Naproxen", "Ibuprofen"]
        );
    }

    #[tokio::test]
    async fn missing_item_argument_leaves_store_untouched() {
        let inv = Inventory::seeded();
        let err = AddItem::new(inv.clone())
            .execute(Value::Null)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'item' argument");
        assert_eq!(inv.len().await, 3);
    }
}
