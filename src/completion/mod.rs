//! Completion candidate production: the item model, the lazy multi-source
//! aggregator, and the provider strategies the editor plugs in.

pub mod aggregator;
pub mod item;
pub mod provider;

pub use aggregator::{Completions, filter_hotkeys, filter_snippets, filter_tokens};
pub use item::CompletionItem;
pub use provider::{CompletionProvider, ProviderKind};
