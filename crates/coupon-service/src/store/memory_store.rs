//! 内存存储
//!
//! 使用 DashMap 实现的并发内存存储，是仓储层内存实现的底座。

use dashmap::DashMap;
use std::sync::Arc;

/// 通用内存存储
///
/// 基于 DashMap 实现，支持并发读写。
/// `update` 在持有单条记录锁的期间执行修改闭包，因此"检查后修改"对单条记录是原子的。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// 插入或更新数据
    ///
    /// 如果 key 已存在则覆盖原有数据
    pub fn insert(&self, id: &str, value: T) {
        self.data.insert(id.to_string(), value);
    }

    /// 获取数据
    ///
    /// 返回数据的克隆，不持有锁
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|v| v.clone())
    }

    /// 查找第一条满足条件的数据
    pub fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.data
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// 原地修改一条数据
    ///
    /// 闭包在记录锁内执行，返回闭包结果；key 不存在时返回 None
    pub fn update<F, R>(&self, id: &str, mutator: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.data.get_mut(id).map(|mut entry| mutator(entry.value_mut()))
    }

    /// 列出所有数据
    ///
    /// 返回所有值的克隆列表，顺序不保证
    pub fn list(&self) -> Vec<T> {
        self.data
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// 检查是否存在指定 key
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// 批量插入数据
    ///
    /// 接收一个迭代器，提取每个元素的 key 并插入
    pub fn insert_many<I, F>(&self, items: I, key_fn: F)
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        for item in items {
            let key = key_fn(&item);
            self.data.insert(key, item);
        }
    }
}

impl<T: Clone> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestItem {
        id: String,
        value: i32,
    }

    fn item(id: &str, value: i32) -> TestItem {
        TestItem {
            id: id.to_string(),
            value,
        }
    }

    fn populated() -> MemoryStore<TestItem> {
        let store = MemoryStore::new();
        store.insert_many(vec![item("1", 10), item("2", 20), item("3", 30)], |i| {
            i.id.clone()
        });
        store
    }

    #[test]
    fn test_memory_store_insert_get() {
        let store: MemoryStore<TestItem> = MemoryStore::new();

        store.insert("test-1", item("test-1", 42));
        assert_eq!(store.get("test-1").unwrap(), item("test-1", 42));

        store.insert("test-1", item("test-1", 100));
        assert_eq!(store.get("test-1").unwrap().value, 100);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_memory_store_list() {
        let store = populated();
        let mut values: Vec<_> = store.list().into_iter().map(|i| i.value).collect();
        values.sort();
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    fn test_memory_store_find() {
        let store = populated();

        assert_eq!(store.find(|i| i.value == 20).unwrap().id, "2");
        assert!(store.find(|i| i.value == 99).is_none());
    }

    #[test]
    fn test_memory_store_update() {
        let store = populated();

        let previous = store.update("2", |i| {
            let old = i.value;
            i.value += 1;
            old
        });
        assert_eq!(previous, Some(20));
        assert_eq!(store.get("2").unwrap().value, 21);

        let missing = store.update("missing", |i| i.value += 1);
        assert!(missing.is_none());
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let store = populated();
        let other = store.clone();

        other.insert("4", item("4", 40));
        assert!(store.contains("4"));
        assert!(!store.contains("5"));
    }
}
