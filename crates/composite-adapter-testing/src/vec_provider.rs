use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use composite_adapter::{AdapterError, ChangeObservers, ItemKind, ItemProvider, Result};

/// Render context for test providers: logs every creation.
#[derive(Debug, Default)]
pub struct TestContext {
    pub created: Vec<(String, ItemKind)>,
}

/// Handle produced by [`VecProvider::create_item`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestHandle {
    pub kind: ItemKind,
    /// Name of the provider that created the handle.
    pub owner: String,
    /// `"<provider>:<item>"` after a bind.
    pub bound: Option<String>,
}

/// Observable provider over a `Vec<T>`.
///
/// Every mutation helper applies the change, releases its borrow, then
/// emits the matching event, as real providers must.
pub struct VecProvider<T> {
    name: String,
    items: RefCell<Vec<T>>,
    kinds: Vec<ItemKind>,
    kind_of: Box<dyn Fn(&T) -> ItemKind>,
    observers: ChangeObservers,
}

impl<T: fmt::Display + 'static> VecProvider<T> {
    /// Provider whose items all share `kind`.
    pub fn uniform(name: &str, kind: impl Into<ItemKind>, items: Vec<T>) -> Rc<Self> {
        let kind = kind.into();
        Self::with_kinds(name, items, [kind], move |_| kind)
    }

    /// Provider declaring `kinds` and deciding each item's kind with `kind_of`.
    pub fn with_kinds(
        name: &str,
        items: Vec<T>,
        kinds: impl IntoIterator<Item = ItemKind>,
        kind_of: impl Fn(&T) -> ItemKind + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            items: RefCell::new(items),
            kinds: kinds.into_iter().collect(),
            kind_of: Box::new(kind_of),
            observers: ChangeObservers::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn push(&self, item: T) {
        let start = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.observers.notify_range_inserted(start, 1);
    }

    pub fn extend(&self, new_items: impl IntoIterator<Item = T>) {
        let (start, count) = {
            let mut items = self.items.borrow_mut();
            let start = items.len();
            items.extend(new_items);
            (start, items.len() - start)
        };
        if count > 0 {
            self.observers.notify_range_inserted(start, count);
        }
    }

    pub fn insert(&self, index: usize, item: T) {
        self.items.borrow_mut().insert(index, item);
        self.observers.notify_range_inserted(index, 1);
    }

    /// Inserts `new_items` starting at `index` as one range.
    pub fn insert_all(&self, index: usize, new_items: impl IntoIterator<Item = T>) {
        let count = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.splice(index..index, new_items);
            items.len() - before
        };
        if count > 0 {
            self.observers.notify_range_inserted(index, count);
        }
    }

    pub fn remove(&self, index: usize) -> T {
        let item = self.items.borrow_mut().remove(index);
        self.observers.notify_range_removed(index, 1);
        item
    }

    pub fn remove_range(&self, range: Range<usize>) -> Vec<T> {
        let start = range.start;
        let removed: Vec<T> = self.items.borrow_mut().drain(range).collect();
        if !removed.is_empty() {
            self.observers.notify_range_removed(start, removed.len());
        }
        removed
    }

    /// Replaces the item at `index`, reporting a changed range.
    pub fn set(&self, index: usize, item: T) {
        self.items.borrow_mut()[index] = item;
        self.observers.notify_range_changed(index, 1);
    }

    pub fn move_item(&self, from: usize, to: usize) {
        {
            let mut items = self.items.borrow_mut();
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.observers.notify_range_moved(from, to, 1);
    }

    /// Swaps in a whole new list, reporting an invalidation.
    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.observers.notify_invalidated();
    }
}

impl<T: fmt::Display + 'static> ItemProvider for VecProvider<T> {
    type Context = TestContext;
    type Handle = TestHandle;

    fn item_count(&self) -> usize {
        self.items.borrow().len()
    }

    fn item_kind(&self, index: usize) -> Result<ItemKind> {
        let items = self.items.borrow();
        let item = items
            .get(index)
            .ok_or(AdapterError::out_of_range(index, items.len()))?;
        Ok((self.kind_of)(item))
    }

    fn create_item(&self, kind: ItemKind, context: &mut TestContext) -> Result<TestHandle> {
        if !self.kinds.contains(&kind) {
            return Err(AdapterError::UnsupportedKind { kind });
        }
        context.created.push((self.name.clone(), kind));
        Ok(TestHandle {
            kind,
            owner: self.name.clone(),
            bound: None,
        })
    }

    fn bind_item(&self, handle: &mut TestHandle, index: usize) -> Result<()> {
        let items = self.items.borrow();
        let item = items
            .get(index)
            .ok_or(AdapterError::out_of_range(index, items.len()))?;
        if (self.kind_of)(item) != handle.kind {
            return Err(AdapterError::UnsupportedKind { kind: handle.kind });
        }
        handle.bound = Some(format!("{}:{}", self.name, item));
        Ok(())
    }

    fn observers(&self) -> &ChangeObservers {
        &self.observers
    }
}

impl<T> fmt::Debug for VecProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecProvider")
            .field("name", &self.name)
            .field("len", &self.items.borrow().len())
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}
