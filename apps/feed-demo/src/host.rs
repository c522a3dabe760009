//! A terminal stand-in for a list-rendering host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

use composite_adapter::{ChangeEvent, ChangeSubscription, CompositeAdapter, ItemKind, Result};

use crate::view::{RowContext, RowView};

pub type FeedComposite = CompositeAdapter<RowContext, RowView>;

/// Renders a window of a composite, recycling rows per kind.
pub struct ListHost {
    composite: Rc<FeedComposite>,
    context: RowContext,
    recycled: HashMap<ItemKind, Vec<RowView>>,
    pending: Rc<RefCell<Vec<ChangeEvent>>>,
    _subscription: ChangeSubscription,
}

impl ListHost {
    /// Attaches to `composite`. Register every provider before this.
    pub fn attach(composite: Rc<FeedComposite>, width: usize) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        let subscription = composite.subscribe(move |event| sink.borrow_mut().push(*event));
        Self {
            composite,
            context: RowContext::new(width),
            recycled: HashMap::new(),
            pending,
            _subscription: subscription,
        }
    }

    /// Events received since the last call, in order.
    pub fn drain_events(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn inflated(&self) -> usize {
        self.context.inflated
    }

    /// Renders the rows of `window` that exist, top to bottom.
    pub fn render(&mut self, window: Range<usize>) -> Result<Vec<String>> {
        let end = window.end.min(self.composite.total_count());
        let mut lines = Vec::new();
        for position in window.start..end {
            // The kind must be asked for before a row of that kind is created.
            let kind = self.composite.kind_at(position)?;
            let mut row = match self.recycled.get_mut(&kind).and_then(Vec::pop) {
                Some(row) => row,
                None => self.composite.create_for(kind, &mut self.context)?,
            };
            debug_assert_eq!(row.kind, kind);
            self.composite.bind_at(&mut row, position)?;
            lines.extend(row.lines.iter().map(|line| format!("{position:>3} │ {line}")));
            self.recycled.entry(kind).or_default().push(row);
        }
        Ok(lines)
    }
}
