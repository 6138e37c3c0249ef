//! Minimal view: coordinate accessor plus an "after paint" lifecycle hook.

use indexmap::IndexMap;
use std::fmt;

use crate::coordinate::Coordinate;
use crate::ids::{IdAllocator, SubscriptionId, ViewId};

/// Passed to every after-paint handler.
#[derive(Debug)]
pub struct PaintContext<'a> {
    pub view: ViewId,
    pub coordinate: &'a Coordinate,
    pub cycle: u64,
}

/// Returned by an after-paint handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaintFlow {
    Continue,
    /// Drop this handler after the current paint.
    Unsubscribe,
}

pub type PaintHandler = Box<dyn FnMut(&PaintContext<'_>) -> PaintFlow>;

pub struct View {
    id: ViewId,
    coordinate: Coordinate,
    ids: IdAllocator,
    after_paint: IndexMap<SubscriptionId, PaintHandler>,
    cycle: u64,
}

impl Default for View {
    fn default() -> Self {
        Self::new(Coordinate::default())
    }
}

impl View {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            id: ViewId::next(),
            coordinate,
            ids: IdAllocator::new(),
            after_paint: IndexMap::new(),
            cycle: 0,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    /// Number of paints so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn on_after_paint(&mut self, handler: PaintHandler) -> SubscriptionId {
        let id = self.ids.alloc_subscription();
        self.after_paint.insert(id, handler);
        id
    }

    /// Remove a handler. Unknown or already removed ids are ignored.
    pub fn off_after_paint(&mut self, id: SubscriptionId) -> bool {
        self.after_paint.shift_remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.after_paint.contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.after_paint.len()
    }

    /// Paint, then fire the after-paint handlers in subscription order.
    /// Handlers answering [`PaintFlow::Unsubscribe`] are dropped.
    /// Returns how many handlers ran.
    pub fn paint(&mut self) -> usize {
        self.cycle = self.cycle.wrapping_add(1);
        let ctx = PaintContext {
            view: self.id,
            coordinate: &self.coordinate,
            cycle: self.cycle,
        };
        let ran = self.after_paint.len();
        self.after_paint
            .retain(|_, handler| handler(&ctx) == PaintFlow::Continue);
        ran
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id)
            .field("coordinate", &self.coordinate)
            .field("subscribers", &self.after_paint.len())
            .field("cycle", &self.cycle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn handlers_fire_until_unsubscribed() {
        let hits = Rc::new(Cell::new(0u32));
        let mut view = View::default();
        let h = hits.clone();
        let id = view.on_after_paint(Box::new(move |_ctx: &PaintContext<'_>| {
            h.set(h.get() + 1);
            PaintFlow::Continue
        }));

        assert_eq!(view.paint(), 1);
        assert_eq!(hits.get(), 1);

        assert!(view.off_after_paint(id));
        assert!(!view.off_after_paint(id));
        assert_eq!(view.paint(), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(view.cycle(), 2);
    }

    #[test]
    fn handlers_can_unsubscribe_themselves() {
        let mut view = View::default();
        let mut left = 2;
        view.on_after_paint(Box::new(move |_ctx: &PaintContext<'_>| {
            left -= 1;
            if left == 0 {
                PaintFlow::Unsubscribe
            } else {
                PaintFlow::Continue
            }
        }));
        assert_eq!(view.paint(), 1);
        assert_eq!(view.paint(), 1);
        assert_eq!(view.subscriber_count(), 0);
        assert_eq!(view.paint(), 0);
    }

    #[test]
    fn views_have_distinct_ids() {
        assert_ne!(View::default().id(), View::default().id());
    }
}
