use std::cell::RefCell;
use std::rc::Rc;

use composite_adapter::{AdapterError, ChangeObservers, ItemKind, ItemProvider, Result};

use crate::view::{RowContext, RowView};

pub const PERSON: ItemKind = ItemKind::new(0);

#[derive(Clone, Debug)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// People list; every row is a [`PERSON`].
pub struct PeopleProvider {
    people: RefCell<Vec<Person>>,
    observers: ChangeObservers,
}

impl PeopleProvider {
    pub fn new(people: Vec<Person>) -> Rc<Self> {
        Rc::new(Self {
            people: RefCell::new(people),
            observers: ChangeObservers::new(),
        })
    }

    pub fn generate(count: usize) -> Vec<Person> {
        (0..count)
            .map(|i| Person::new("Bob", &format!("Loblaw #{i}")))
            .collect()
    }

    pub fn remove_first(&self, count: usize) {
        let removed = {
            let mut people = self.people.borrow_mut();
            let count = count.min(people.len());
            people.drain(..count).count()
        };
        if removed > 0 {
            self.observers.notify_range_removed(0, removed);
        }
    }
}

impl ItemProvider for PeopleProvider {
    type Context = RowContext;
    type Handle = RowView;

    fn item_count(&self) -> usize {
        self.people.borrow().len()
    }

    fn item_kind(&self, index: usize) -> Result<ItemKind> {
        let count = self.item_count();
        if index < count {
            Ok(PERSON)
        } else {
            Err(AdapterError::out_of_range(index, count))
        }
    }

    fn create_item(&self, kind: ItemKind, context: &mut RowContext) -> Result<RowView> {
        if kind != PERSON {
            return Err(AdapterError::UnsupportedKind { kind });
        }
        Ok(RowView::new(kind, context))
    }

    fn bind_item(&self, handle: &mut RowView, index: usize) -> Result<()> {
        let people = self.people.borrow();
        let person = people
            .get(index)
            .ok_or(AdapterError::out_of_range(index, people.len()))?;
        handle.set_text(&format!("👤 {} {}", person.first_name, person.last_name));
        Ok(())
    }

    fn observers(&self) -> &ChangeObservers {
        &self.observers
    }
}
