//! 文档集合
//!
//! 有序的文档行列表，顺序即输出时的拼接顺序。
//! 每个操作都一次性完成，不会留下中间状态。

use tracing::debug;

use crate::error::CollectionError;
use crate::models::{DocumentEntry, DocumentKey, SplitItem};
use crate::selection::SelectionGrammar;

/// 有序文档集合，按 `key` 区分行
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    entries: Vec<DocumentEntry>,
    /// 下一个可分配的标识，`None` 表示已用尽
    next_key: Option<u64>,
}

impl Default for DocumentCollection {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_key: Some(0),
        }
    }
}

impl DocumentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: DocumentKey) -> Option<&DocumentEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn position(&self, key: DocumentKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// 分配一个集合内从未使用过的行标识
    ///
    /// 标识只增不减，用尽后返回 `KeySpaceExhausted`，不会回绕
    pub fn allocate_key(&mut self) -> Result<DocumentKey, CollectionError> {
        let key = self.next_key.ok_or(CollectionError::KeySpaceExhausted)?;
        self.next_key = key.checked_add(1);
        Ok(DocumentKey(key))
    }

    /// 追加到末尾
    ///
    /// `key` 已存在属于编程错误
    pub fn append(&mut self, entry: DocumentEntry) -> Result<(), CollectionError> {
        if self.get(entry.key).is_some() {
            return Err(CollectionError::DuplicateKey(entry.key));
        }
        // 外部构造的 key 也不能被后续分配撞上
        if let Some(next) = self.next_key {
            if entry.key.0 >= next {
                self.next_key = entry.key.0.checked_add(1);
            }
        }
        debug!("追加 {} {}", entry.key, entry.display_name);
        self.entries.push(entry);
        Ok(())
    }

    /// 删除一行，不存在时什么也不做
    pub fn remove(&mut self, key: DocumentKey) -> Option<DocumentEntry> {
        let index = self.position(key)?;
        debug!("删除 {}", key);
        Some(self.entries.remove(index))
    }

    /// 复制一行并插入到原行之后，复制当前的页码选择
    ///
    /// # 返回
    /// 新行的标识；原行不存在或标识已用尽时返回 `None` 且集合不变
    pub fn duplicate(&mut self, key: DocumentKey) -> Option<DocumentKey> {
        let index = self.position(key)?;
        let new_key = self.allocate_key().ok()?;
        let copy = DocumentEntry {
            key: new_key,
            ..self.entries[index].clone()
        };
        self.entries.insert(index + 1, copy);
        debug!("复制 {} -> {}", key, new_key);
        Some(new_key)
    }

    /// 替换页码选择，不做校验（编辑过程中允许暂时非法）
    ///
    /// # 返回
    /// 行是否存在
    pub fn update_selection(&mut self, key: DocumentKey, selection: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.selection = selection.into();
                true
            }
            None => false,
        }
    }

    /// 把 `from` 位置的行移动到 `to`，其余行保持相对顺序
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(CollectionError::IndexOutOfBounds { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        debug!("移动 {} -> {}", from, to);
        Ok(())
    }

    /// 集合非空且每行的页码选择都合法
    pub fn is_ready_to_generate(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(DocumentEntry::is_selection_valid)
    }

    /// 按当前顺序生成合并请求项
    pub fn split_items(&self) -> Vec<SplitItem> {
        self.entries
            .iter()
            .map(|e| SplitItem {
                id: e.id.clone(),
                selection: e.selection.clone(),
            })
            .collect()
    }

    /// 输出文档的总页数，集合为空或任意一行非法时为 `None`
    pub fn output_page_total(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .map(|e| SelectionGrammar::parse(&e.selection, e.page_count).map(|s| s.page_total()))
            .sum::<Result<usize, _>>()
            .ok()
    }
}
