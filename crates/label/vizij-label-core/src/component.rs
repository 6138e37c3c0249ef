//! Geometry label component: owns the label group and snapshots of one
//! geometry and runs a draw + reconcile cycle per paint.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::animation::Animator;
use crate::capability::LabelStrategy;
use crate::config::LabelConfig;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::geometry::{Geometry, GeometrySpec};
use crate::group::LabelGroup;
use crate::ids::{LabelId, SubscriptionId, ViewId};
use crate::pipeline::{draw_labels, DrawOutcome};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::registry::LabelRegistry;
use crate::shape::TextShape;
use crate::snapshot::{LabelConfigMap, SnapshotStore};
use crate::tween::Tweener;
use crate::view::{PaintContext, PaintFlow, View};

/// Summary of one render cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub draw: DrawOutcome,
    pub reconcile: ReconcileReport,
}

/// The one view subscription a component is bound to. `epoch` tells the
/// current handler apart from ones left behind by an earlier attach.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ViewBinding {
    view: ViewId,
    subscription: SubscriptionId,
    epoch: u64,
}

#[derive(Debug)]
pub struct GeometryLabel<G: Geometry = GeometrySpec, A: Animator = Tweener> {
    geometry: G,
    strategy: LabelStrategy,
    animator: A,
    group: LabelGroup,
    snapshots: SnapshotStore,
    binding: Option<ViewBinding>,
    attach_epoch: u64,
    cycles: u64,
    last_report: Option<CycleReport>,
    destroyed: bool,
}

impl<G: Geometry, A: Animator> GeometryLabel<G, A> {
    pub fn new(geometry: G, strategy: LabelStrategy, animator: A) -> Self {
        Self {
            geometry,
            strategy,
            animator,
            group: LabelGroup::new(),
            snapshots: SnapshotStore::new(),
            binding: None,
            attach_epoch: 0,
            cycles: 0,
            last_report: None,
            destroyed: false,
        }
    }

    /// Build the strategy for `config` from `registry`, with content
    /// defaulting to the geometry's y field.
    pub fn from_config(
        geometry: G,
        registry: &LabelRegistry,
        config: &LabelConfig,
        animator: A,
    ) -> Result<Self> {
        let strategy = registry.create(&config.resolved_for(&geometry))?;
        Ok(Self::new(geometry, strategy, animator))
    }

    /// Run one cycle: clear, draw, reconcile against the previous pass, then
    /// keep this pass's snapshot for the next one.
    pub fn render(&mut self, coordinate: &Coordinate) -> CycleReport {
        if self.destroyed {
            return CycleReport {
                cycle: self.cycles,
                ..CycleReport::default()
            };
        }
        let cfg = self.geometry.animate_option().resolve();

        self.group.clear();
        self.snapshots.begin_pass();
        let draw = draw_labels(
            &self.geometry,
            &self.strategy,
            &mut self.group,
            self.snapshots.current_mut(),
        );

        let (previous, current) = self.snapshots.pair();
        let reconcile = reconcile(
            previous,
            current,
            &mut self.group,
            &mut self.animator,
            &cfg,
            coordinate,
        );
        self.snapshots.commit();
        self.cycles += 1;

        log::debug!(
            "label cycle {}: drawn={} suppressed={} appear={} update={} leave={}",
            self.cycles,
            draw.drawn,
            draw.suppressed,
            reconcile.appeared.len(),
            reconcile.updated.len(),
            reconcile.left.len()
        );
        let report = CycleReport {
            cycle: self.cycles,
            draw,
            reconcile,
        };
        self.last_report = Some(report.clone());
        report
    }

    /// Step the animation driver by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) -> usize {
        self.animator.advance(dt_ms, &mut self.group)
    }

    pub fn show(&mut self) {
        self.group.show();
    }

    pub fn hide(&mut self) {
        self.group.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.group.is_visible()
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Upstream data changes land here between paints.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn set_strategy(&mut self, strategy: LabelStrategy) {
        self.strategy = strategy;
    }

    /// Label shapes drawn by the latest pass.
    pub fn labels(&self) -> impl Iterator<Item = &TextShape> {
        self.group.labels()
    }

    pub fn label_ids(&self) -> Vec<LabelId> {
        self.group.labels().map(|s| s.label_id().clone()).collect()
    }

    pub fn group(&self) -> &LabelGroup {
        &self.group
    }

    /// Snapshot the next cycle will reconcile against.
    pub fn previous_snapshot(&self) -> &LabelConfigMap {
        self.snapshots.previous()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// View and subscription the component currently renders for.
    pub fn attached_to(&self) -> Option<(ViewId, SubscriptionId)> {
        self.binding.map(|b| (b.view, b.subscription))
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Stop rendering on paints. The handler is removed from `view` right
    /// away when it is the bound view; a handler left in any other view
    /// unsubscribes itself on that view's next paint. Returns whether the
    /// component was attached. Safe to call repeatedly.
    pub fn detach(&mut self, view: &mut View) -> bool {
        let Some(binding) = self.binding.take() else {
            return false;
        };
        if binding.view == view.id() {
            view.off_after_paint(binding.subscription);
        }
        true
    }

    /// Detach and drop every shape and snapshot. Safe to call repeatedly.
    pub fn destroy(&mut self, view: &mut View) {
        self.detach(view);
        if self.destroyed {
            return;
        }
        self.group.clear();
        self.snapshots.reset();
        self.destroyed = true;
        log::debug!("label component destroyed after {} cycles", self.cycles);
    }
}

impl<G: Geometry + 'static, A: Animator + 'static> GeometryLabel<G, A> {
    /// Subscribe `this` to the view's after-paint event; each paint runs one
    /// render cycle with the view's coordinate. A component is bound to one
    /// view at a time: attaching twice to the same view keeps the existing
    /// subscription, attaching to another view moves the component there.
    pub fn attach(this: &Rc<RefCell<Self>>, view: &mut View) -> SubscriptionId {
        let existing = this.borrow().binding;
        if let Some(binding) = existing {
            if binding.view == view.id() && view.is_subscribed(binding.subscription) {
                return binding.subscription;
            }
            log::debug!("label component rebinding from view {:?}", binding.view);
        }
        let mut label = this.borrow_mut();
        label.attach_epoch += 1;
        let epoch = label.attach_epoch;
        drop(label);
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let subscription = view.on_after_paint(Box::new(move |ctx: &PaintContext<'_>| {
            let Some(label) = weak.upgrade() else {
                return PaintFlow::Unsubscribe;
            };
            let busy = label.try_borrow_mut();
            match busy {
                Ok(mut label) => {
                    if label.binding.map(|b| b.epoch) != Some(epoch) {
                        return PaintFlow::Unsubscribe;
                    }
                    label.render(ctx.coordinate);
                    PaintFlow::Continue
                }
                Err(_) => {
                    log::warn!(
                        "label component busy during paint {}; cycle skipped",
                        ctx.cycle
                    );
                    PaintFlow::Continue
                }
            }
        }));
        this.borrow_mut().binding = Some(ViewBinding {
            view: view.id(),
            subscription,
            epoch,
        });
        subscription
    }
}
