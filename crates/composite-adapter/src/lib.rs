//! Composite item providers for list-rendering hosts.
//!
//! A host that renders one list can only talk to one data source. This crate
//! lets several independently maintained, observable collections appear as
//! a single list addressed by absolute position.
//!
//! # Architecture
//!
//! - [`ItemProvider`] - indexed, observable item collection
//! - [`ChangeObservers`] / [`ChangeEvent`] - structural change notifications
//! - [`PositionTranslator`] - absolute ⇄ (provider, relative) translation
//! - [`KindRouter`] - first-writer-wins kind → provider routing
//! - [`CompositeAdapter`] - owns providers and forwarders, and is itself an
//!   [`ItemProvider`], so composites nest
//!
//! Everything runs synchronously on the rendering thread; nothing here is
//! `Send`.

mod collections;
mod composite;
mod config;
mod error;
mod forwarder;
mod kind;
mod observer;
mod position;
mod provider;
mod router;

pub use composite::*;
pub use config::*;
pub use error::*;
pub use kind::*;
pub use observer::*;
pub use position::*;
pub use provider::*;
pub use router::*;

pub mod prelude {
    pub use crate::composite::{CompositeAdapter, ResolvedPosition};
    pub use crate::config::{CompositeConfig, LateRegistration};
    pub use crate::error::{AdapterError, Result};
    pub use crate::kind::{ItemKind, ProviderId};
    pub use crate::observer::{ChangeEvent, ChangeObservers, ChangeSubscription};
    pub use crate::provider::{ItemProvider, SharedProvider};
}
