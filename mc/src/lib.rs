//! MessageCard - chat notification cards and their durable cache
//!
//! A [`MessageCard`] is the mutable notification document posted to a chat
//! webhook: a title, an activity header and an ordered list of name/value
//! facts. [`CardStore`] persists exactly one card as its wire-encoded JSON
//! so independent process runs can keep extending the same card before it
//! is finally sent.
//!
//! # Example
//!
//! ```ignore
//! use msgcard::{CardStore, MessageCard};
//!
//! let mut card = MessageCard::new("RepoHerald", None);
//! card.add_fact("Firefox", "imported ver. 128.0 -> testing");
//!
//! let store = CardStore::new("/tmp/pending-card.json");
//! store.save(&card)?;
//! ```

pub mod card;
pub mod cli;
mod store;

pub use card::{Fact, MessageCard};
pub use store::{CardStore, StoreError};
