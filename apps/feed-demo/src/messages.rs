use std::cell::RefCell;
use std::rc::Rc;

use composite_adapter::{AdapterError, ChangeObservers, ItemKind, ItemProvider, Result};

use crate::view::{RowContext, RowView};

pub const TEXT_MESSAGE: ItemKind = ItemKind::new(1);

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
                     Aliquam porta tempus erat, quis dictum sem mollis eget.";

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub body: String,
}

pub struct MessagesProvider {
    messages: RefCell<Vec<TextMessage>>,
    observers: ChangeObservers,
}

impl MessagesProvider {
    pub fn new(messages: Vec<TextMessage>) -> Rc<Self> {
        Rc::new(Self {
            messages: RefCell::new(messages),
            observers: ChangeObservers::new(),
        })
    }

    pub fn generate(count: usize) -> Vec<TextMessage> {
        (0..count)
            .map(|i| TextMessage {
                body: format!("#{i} {LOREM}"),
            })
            .collect()
    }

    /// Inserts `message` at the top of the list.
    pub fn prepend(&self, message: TextMessage) {
        self.messages.borrow_mut().insert(0, message);
        self.observers.notify_range_inserted(0, 1);
    }

    pub fn edit(&self, index: usize, body: &str) -> Result<()> {
        {
            let mut messages = self.messages.borrow_mut();
            let count = messages.len();
            let message = messages
                .get_mut(index)
                .ok_or(AdapterError::out_of_range(index, count))?;
            message.body = body.to_string();
        }
        self.observers.notify_range_changed(index, 1);
        Ok(())
    }
}

impl ItemProvider for MessagesProvider {
    type Context = RowContext;
    type Handle = RowView;

    fn item_count(&self) -> usize {
        self.messages.borrow().len()
    }

    fn item_kind(&self, index: usize) -> Result<ItemKind> {
        let count = self.item_count();
        if index < count {
            Ok(TEXT_MESSAGE)
        } else {
            Err(AdapterError::out_of_range(index, count))
        }
    }

    fn create_item(&self, kind: ItemKind, context: &mut RowContext) -> Result<RowView> {
        if kind != TEXT_MESSAGE {
            return Err(AdapterError::UnsupportedKind { kind });
        }
        Ok(RowView::new(kind, context))
    }

    fn bind_item(&self, handle: &mut RowView, index: usize) -> Result<()> {
        let messages = self.messages.borrow();
        let message = messages
            .get(index)
            .ok_or(AdapterError::out_of_range(index, messages.len()))?;
        handle.set_text(&format!("💬 {}", message.body));
        Ok(())
    }

    fn observers(&self) -> &ChangeObservers {
        &self.observers
    }
}
