//! Rendering seam between the tracker and whatever displays it.

use crate::{Item, ItemKind, Stats};

/// Receives render calls from the tracker after each mutation
pub trait View {
    fn display_limit(&mut self, limit: i64);
    fn display_stats(&mut self, stats: &Stats);
    fn display_new_item(&mut self, kind: ItemKind, item: &Item);
    /// Must tolerate an id that is not currently rendered
    fn remove_item(&mut self, kind: ItemKind, id: &str);
    fn clear_items(&mut self);
}

/// A view that renders nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NullView;

impl View for NullView {
    fn display_limit(&mut self, _limit: i64) {}
    fn display_stats(&mut self, _stats: &Stats) {}
    fn display_new_item(&mut self, _kind: ItemKind, _item: &Item) {}
    fn remove_item(&mut self, _kind: ItemKind, _id: &str) {}
    fn clear_items(&mut self) {}
}
