//! Input representation for labelbench.
//!
//! Classifier outputs and ground truth arrive as loosely typed JSON. This
//! module is the boundary that turns them into typed values: [`ItemId`] for
//! identifiers, [`Item`] for records and [`LabelSet`] for normalized labels.
//! Nothing past this boundary inspects raw JSON.
//!
//! # Example
//!
//! ```
//! use labelbench::ir::{Item, ItemId, LabelSet};
//!
//! let item = Item::new(1).with_field("content", "please add 4K export");
//! assert_eq!(item.id, ItemId::Int(1));
//!
//! let labels: LabelSet = ["export", "export", ""].into_iter().collect();
//! assert_eq!(labels.len(), 1);
//! ```

mod ids;
pub mod io_json;
mod model;

// Re-export core types for convenient access
pub use ids::ItemId;
pub use model::{Item, LabelSet};
