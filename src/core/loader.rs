//! Drives directory expansion against a [`ContentSource`].
//!
//! The tree decides whether a listing is needed; this module performs the
//! fetch and feeds the result back. The tree lives behind a [`TreeStore`]
//! so the same code runs against a reactive signal in the app and a plain
//! `RefCell` in tests.

use std::cell::RefCell;

use leptos::logging::warn;
use leptos::prelude::{RwSignal, Update};

use crate::core::error::FetchError;
use crate::core::source::ContentSource;
use crate::core::tree::{Expansion, SidebarTree};

/// Shared mutable access to the sidebar tree.
pub trait TreeStore {
    /// Run `f` against the tree; `None` if the tree is gone.
    fn modify<R>(&self, f: impl FnOnce(&mut SidebarTree) -> R) -> Option<R>;
}

impl TreeStore for RefCell<SidebarTree> {
    fn modify<R>(&self, f: impl FnOnce(&mut SidebarTree) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl TreeStore for RwSignal<SidebarTree> {
    fn modify<R>(&self, f: impl FnOnce(&mut SidebarTree) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Expand a directory, fetching its listing if it was never loaded.
pub async fn expand_directory<S, T>(source: &S, tree: &T, path: &str) -> Result<Expansion, FetchError>
where
    S: ContentSource,
    T: TreeStore,
{
    let expansion = tree.modify(|t| t.expand(path)).unwrap_or(Expansion::Ignored);
    settle(source, tree, expansion).await
}

/// Toggle a directory the way a click on its row does.
pub async fn toggle_directory<S, T>(source: &S, tree: &T, path: &str) -> Result<Expansion, FetchError>
where
    S: ContentSource,
    T: TreeStore,
{
    let expansion = tree.modify(|t| t.toggle(path)).unwrap_or(Expansion::Ignored);
    settle(source, tree, expansion).await
}

async fn settle<S, T>(source: &S, tree: &T, expansion: Expansion) -> Result<Expansion, FetchError>
where
    S: ContentSource,
    T: TreeStore,
{
    let Expansion::Fetch(path) = &expansion else {
        return Ok(expansion);
    };

    let result = source.list_directory(path).await;
    let failure = result.as_ref().err().cloned();
    tree.modify(|t| t.complete_listing(path, result));

    match failure {
        Some(err) => {
            warn!("Unable to read dir \"{}\": {}", path, err);
            Err(err)
        }
        None => Ok(expansion),
    }
}
