//! Feed demo: people, messages and a mixed feed shown as one list.
//!
//! Run with `RUST_LOG=debug` to watch kind routing and event forwarding.

mod feed;
mod host;
mod messages;
mod people;
mod view;

use std::rc::Rc;

use feed::{FeedItem, FeedProvider};
use host::{FeedComposite, ListHost};
use messages::{MessagesProvider, TextMessage};
use people::{PeopleProvider, Person};

const LIST_SIZE: usize = 20;
const ROW_WIDTH: usize = 48;

fn print_window(
    host: &mut ListHost,
    title: &str,
    window: std::ops::Range<usize>,
) -> anyhow::Result<()> {
    println!("── {title} ──");
    for line in host.render(window)? {
        println!("{line}");
    }
    for event in host.drain_events() {
        println!("   event: {event:?}");
    }
    println!();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let people = PeopleProvider::new(PeopleProvider::generate(LIST_SIZE));
    let messages = MessagesProvider::new(MessagesProvider::generate(LIST_SIZE));
    let feed = FeedProvider::new(vec![
        FeedItem::Person(Person::new("Lucille", "Bluth")),
        FeedItem::Message(TextMessage {
            body: "There's always money in the banana stand.".to_string(),
        }),
    ]);

    let composite = Rc::new(FeedComposite::new());
    composite.register(people.clone())?;
    composite.register(messages.clone())?;
    composite.register(feed.clone())?;

    let mut host = ListHost::attach(Rc::clone(&composite), ROW_WIDTH);
    log::info!("composite holds {} rows", composite.total_count());

    print_window(&mut host, "people → messages boundary", 18..22)?;

    messages.prepend(TextMessage {
        body: "Breaking: a new message arrives first.".to_string(),
    });
    people.remove_first(3);
    messages.edit(2, "#1 edited in place")?;
    print_window(&mut host, "after prepend, removal and edit", 15..20)?;

    feed.replace_all(vec![FeedItem::Person(Person::new("Gob", "Bluth"))]);
    let total = composite.total_count();
    print_window(&mut host, "feed tail", total.saturating_sub(3)..total)?;

    println!(
        "{} rows total, {} row views inflated",
        composite.total_count(),
        host.inflated()
    );
    Ok(())
}
