//! Fixed response texts of the item API.
//!
//! One not-found text is shared by the lookup, update and delete routes.

pub const ITEM_NOT_FOUND: &str = "Item non trouvé";
pub const ITEM_CREATED: &str = "Item créé avec succès / 成功创建项目";
pub const ITEM_UPDATED: &str = "Item mis à jour";
pub const ROUTE_NOT_FOUND: &str = "It works! (但该路径未定义)";
