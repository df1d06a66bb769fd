use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 项目记录：id 由存储生成，其余字段按调用方提供的原样保存（不做类型校验或转换）
/// - 缺失字段保存为 `Value::Null`，序列化为 `null`（键始终存在）
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: Value,
    pub description: Value,
    pub price: Value,
}

/// 创建/替换输入：不包含 id，由服务端生成；任意 JSON 值均原样接受
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ItemInput {
    pub name: Value,
    pub description: Value,
    pub price: Value,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: Value::String(name.into()),
            description: Value::String(description.into()),
            price: Value::from(price),
        }
    }

    pub(crate) fn into_item(self, id: String) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

impl Item {
    /// Overwrite every field but `id`.
    pub(crate) fn replace_fields(&mut self, input: ItemInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_serialize_as_null() {
        let input: ItemInput = serde_json::from_value(json!({ "name": "Stylo" })).unwrap();
        let item = input.into_item("abc".into());
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(
            v,
            json!({ "id": "abc", "name": "Stylo", "description": null, "price": null })
        );
    }

    #[test]
    fn values_of_any_type_are_kept_verbatim() {
        let input: ItemInput = serde_json::from_value(
            json!({ "name": 42, "description": ["a", "b"], "price": "9.99" }),
        )
        .unwrap();
        let item = input.into_item("x".into());
        assert_eq!(item.name, json!(42));
        assert_eq!(item.description, json!(["a", "b"]));
        assert_eq!(item.price, json!("9.99"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let input: ItemInput =
            serde_json::from_value(json!({ "name": "a", "price": 1.5, "colour": "red" })).unwrap();
        assert_eq!(input.price, json!(1.5));
        assert_eq!(input.description, Value::Null);
    }

    #[test]
    fn replace_keeps_id() {
        let mut item = ItemInput::new("a", "b", 1.0).into_item("keep".into());
        item.replace_fields(ItemInput::new("c", "d", 2.0));
        assert_eq!(item.id, "keep");
        assert_eq!(item.name, "c");
        assert_eq!(item.price, 2.0);
    }
}
