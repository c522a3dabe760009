use std::cell::RefCell;
use std::rc::Rc;

use composite_adapter::{AdapterError, ChangeObservers, ItemKind, ItemProvider, Result};

use crate::messages::TextMessage;
use crate::people::Person;
use crate::view::{RowContext, RowView};

// Disjoint from PERSON and TEXT_MESSAGE: the composite routes creation by kind.
pub const FEED_PERSON: ItemKind = ItemKind::new(2);
pub const FEED_MESSAGE: ItemKind = ItemKind::new(3);

#[derive(Clone, Debug)]
pub enum FeedItem {
    Person(Person),
    Message(TextMessage),
}

impl FeedItem {
    fn kind(&self) -> ItemKind {
        match self {
            FeedItem::Person(_) => FEED_PERSON,
            FeedItem::Message(_) => FEED_MESSAGE,
        }
    }
}

/// One provider mixing two kinds of rows.
pub struct FeedProvider {
    items: RefCell<Vec<FeedItem>>,
    observers: ChangeObservers,
}

impl FeedProvider {
    pub fn new(items: Vec<FeedItem>) -> Rc<Self> {
        Rc::new(Self {
            items: RefCell::new(items),
            observers: ChangeObservers::new(),
        })
    }

    pub fn replace_all(&self, items: Vec<FeedItem>) {
        *self.items.borrow_mut() = items;
        self.observers.notify_invalidated();
    }
}

impl ItemProvider for FeedProvider {
    type Context = RowContext;
    type Handle = RowView;

    fn item_count(&self) -> usize {
        self.items.borrow().len()
    }

    fn item_kind(&self, index: usize) -> Result<ItemKind> {
        let items = self.items.borrow();
        items
            .get(index)
            .map(FeedItem::kind)
            .ok_or(AdapterError::out_of_range(index, items.len()))
    }

    fn create_item(&self, kind: ItemKind, context: &mut RowContext) -> Result<RowView> {
        if kind != FEED_PERSON && kind != FEED_MESSAGE {
            return Err(AdapterError::UnsupportedKind { kind });
        }
        Ok(RowView::new(kind, context))
    }

    fn bind_item(&self, handle: &mut RowView, index: usize) -> Result<()> {
        let items = self.items.borrow();
        let item = items
            .get(index)
            .ok_or(AdapterError::out_of_range(index, items.len()))?;
        let text = match item {
            FeedItem::Person(person) => {
                format!("⭐ {} {} joined", person.first_name, person.last_name)
            }
            FeedItem::Message(message) => format!("⭐ {}", message.body),
        };
        handle.set_text(&text);
        Ok(())
    }

    fn observers(&self) -> &ChangeObservers {
        &self.observers
    }
}
