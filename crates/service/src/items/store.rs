use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::id::IdGenerator;
use super::model::{Item, ItemInput};
use crate::errors::ServiceError;

/// 内存存储：按插入顺序保存项目，进程重启即丢失
/// - 所有写操作持有写锁，同一时刻至多一个写者
#[derive(Clone)]
pub struct ItemStore {
    inner: Arc<RwLock<Vec<Item>>>,
    ids: Arc<dyn IdGenerator>,
}

impl ItemStore {
    /// Empty store.
    pub fn new(ids: Arc<dyn IdGenerator>) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(Vec::new())), ids })
    }

    /// Store holding the two sample items served at startup.
    pub fn seeded(ids: Arc<dyn IdGenerator>) -> Arc<Self> {
        let items = seed_inputs()
            .into_iter()
            .map(|input| input.into_item(ids.next_id()))
            .collect();
        Self::with_items(ids, items)
    }

    pub fn with_items(ids: Arc<dyn IdGenerator>, items: Vec<Item>) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(items)), ids })
    }

    /// 列出全部项目（插入顺序）
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.clone()
    }

    /// 根据 id 获取
    pub async fn get(&self, id: &str) -> Result<Item, ServiceError> {
        let items = self.inner.read().await;
        items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("item"))
    }

    /// 创建新项目并追加到末尾
    pub async fn create(&self, input: ItemInput) -> Item {
        let mut items = self.inner.write().await;
        // ids are random; regenerate on the rare collision with a held id
        let id = loop {
            let candidate = self.ids.next_id();
            if !items.iter().any(|i| i.id == candidate) {
                break candidate;
            }
        };
        let item = input.into_item(id);
        items.push(item.clone());
        debug!(id = %item.id, total = items.len(), "item appended");
        item
    }

    /// 原位替换 name/description/price，id 不变
    pub async fn replace(&self, id: &str, input: ItemInput) -> Result<Item, ServiceError> {
        let mut items = self.inner.write().await;
        let existing = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found("item"))?;
        existing.replace_fields(input);
        Ok(existing.clone())
    }

    /// 删除指定项目，其余项目相对顺序不变
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let mut items = self.inner.write().await;
        let index = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found("item"))?;
        items.remove(index);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

fn seed_inputs() -> Vec<ItemInput> {
    vec![
        ItemInput::new("Stylo", "Stylo bleu", 2.5),
        ItemInput::new("Cahier", "Cahier A4", 4.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{RandomIdGenerator, SequentialIdGenerator};

    fn setup_store() -> Arc<ItemStore> {
        ItemStore::new(Arc::new(SequentialIdGenerator::new("t")))
    }

    /// Always hands out the same id, to exercise the collision loop.
    struct StuckThenFree {
        calls: std::sync::atomic::AtomicU64,
    }

    impl IdGenerator for StuckThenFree {
        fn next_id(&self) -> String {
            let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if n < 3 { "dup".into() } else { format!("fresh-{n}") }
        }
    }

    #[tokio::test]
    async fn seeded_store_has_two_items_in_order() {
        let store = ItemStore::seeded(Arc::new(RandomIdGenerator));
        let list = store.list().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Stylo");
        assert_eq!(list[1].name, "Cahier");
        assert_eq!(list[1].price, 4.0);
        assert!(list.iter().all(|i| !i.id.is_empty()));
        assert_ne!(list[0].id, list[1].id);
    }

    #[tokio::test]
    async fn item_store_crud() {
        let store = setup_store();
        assert!(store.is_empty().await);

        // create
        let created = store.create(ItemInput::new("Item Test", "d", 9.99)).await;
        assert_eq!(created.id, "t-1");
        assert_eq!(store.get(&created.id).await, Ok(created.clone()));

        // replace
        let updated = store
            .replace(&created.id, ItemInput::new("Autre", "e", 1.0))
            .await
            .expect("replace ok");
        assert_eq!(updated.id, created.id);
        let found = store.get(&created.id).await.expect("found");
        assert_eq!(found.name, "Autre");
        assert_eq!(found.description, "e");
        assert_eq!(found.price, 1.0);

        // remove
        store.remove(&created.id).await.expect("remove ok");
        assert!(matches!(store.get(&created.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let store = setup_store();
        store.create(ItemInput::new("a", "b", 1.0)).await;
        let missing = "non-existent-id";
        assert!(matches!(store.get(missing).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            store.replace(missing, ItemInput::default()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(store.remove(missing).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn replace_keeps_position_and_remove_keeps_order() {
        let store = setup_store();
        let a = store.create(ItemInput::new("a", "", 1.0)).await;
        let b = store.create(ItemInput::new("b", "", 2.0)).await;
        let c = store.create(ItemInput::new("c", "", 3.0)).await;

        store.replace(&b.id, ItemInput::new("B", "", 20.0)).await.unwrap();
        let names: Vec<_> = store.list().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "B", "c"]);

        store.remove(&a.id).await.unwrap();
        let ids: Vec<_> = store.list().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, [b.id, c.id]);
    }

    #[tokio::test]
    async fn replace_with_missing_fields_clears_them() {
        let store = setup_store();
        let a = store.create(ItemInput::new("a", "b", 1.0)).await;
        let updated = store
            .replace(&a.id, ItemInput { name: "only".into(), ..Default::default() })
            .await
            .unwrap();
        assert!(updated.description.is_null());
        assert!(updated.price.is_null());
    }

    #[tokio::test]
    async fn colliding_ids_are_regenerated() {
        let store = ItemStore::new(Arc::new(StuckThenFree { calls: Default::default() }));
        let first = store.create(ItemInput::default()).await;
        let second = store.create(ItemInput::default()).await;
        assert_eq!(first.id, "dup");
        assert_eq!(second.id, "fresh-3");
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_kept() {
        let store = ItemStore::new(Arc::new(RandomIdGenerator));
        let mut handles = Vec::new();
        for n in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(ItemInput::new(format!("n{n}"), "", n as f64)).await
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
    }
}
