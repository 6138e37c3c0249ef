//! Vizij Label Core (engine-agnostic)
//!
//! Incremental label reconciliation for chart annotation layers. On every
//! paint a [`GeometryLabel`] redraws the labels of its geometry, matches them
//! against the previous pass by [`LabelId`] and issues appear / update /
//! leave transitions to an [`Animator`].
//!
//! ```text
//!   View::paint() ──► after-paint handler ──► GeometryLabel::render()
//!                                                 │
//!        clear group, reset current snapshot ◄────┘
//!                      │
//!   pipeline::draw_labels()   (AttributeSource → shape → LabelAdjuster)
//!                      │
//!   reconcile::reconcile()    (previous vs current → Animator requests)
//!                      │
//!   SnapshotStore::commit()   (current becomes previous)
//! ```
//!
//! Chart types plug in through [`AttributeSource`] / [`LabelAdjuster`],
//! bundled as a [`LabelStrategy`] and looked up in an explicit
//! [`LabelRegistry`].

pub mod animation;
pub mod capability;
pub mod component;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod group;
pub mod identity;
pub mod ids;
pub mod pipeline;
pub mod reconcile;
pub mod registry;
pub mod shape;
pub mod snapshot;
pub mod tween;
pub mod value;
pub mod view;

// Re-exports for consumers (chart assembly, adapters)
pub use animation::{
    AnimateCfg, AnimateOption, AnimationPhase, AnimationRequest, Animator, Easing, RequestLog,
    TransitionSpec,
};
pub use capability::{AttributeSource, BaseLabel, LabelAdjuster, LabelStrategy};
pub use component::{CycleReport, GeometryLabel};
pub use config::LabelConfig;
pub use coordinate::Coordinate;
pub use error::{LabelError, Result};
pub use geometry::{Datum, Element, Geometry, GeometryKind, GeometrySpec, MappingDatum};
pub use group::LabelGroup;
pub use identity::{compose_label_id, resolve_label_id};
pub use ids::{LabelId, ShapeId, SubscriptionId, ViewId};
pub use pipeline::{draw_labels, DrawOutcome};
pub use reconcile::{reconcile, ReconcileReport};
pub use registry::LabelRegistry;
pub use shape::{ShapeMeta, ShapeRole, TextShape};
pub use snapshot::{LabelConfigMap, SnapshotStore};
pub use tween::Tweener;
pub use value::{AttrValue, LabelAttributes};
pub use view::{PaintContext, PaintFlow, View};
