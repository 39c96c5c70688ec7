#![forbid(unsafe_code)]

//! The drag session: handlers for draggables, droppables, and the root.
//!
//! # Gesture Lifecycle
//!
//! ```text
//!  drag_start ──▶ pickup pending ──drag──▶ dragging ──drop──▶ commit ─┐
//!       │                                      │                      │
//!       └──────────── drag_end / cancel ───────┴──────────────────────┴─▶ idle
//! ```
//!
//! `drag_start` records the pickup, writes the transfer, and renders the
//! placeholder; the session only reports `dragging` once the first motion
//! arrives. `drag_end` always resets, whether or not a drop happened.
//!
//! # Drop Path
//!
//! Pointer drops and keyboard moves share one commit path: a keyboard move
//! stores a drop intent and dispatches a drop on the destination, which the
//! droppable handler delivers exactly like a pointer drop.
//!
//! # Failure Modes
//!
//! | Failure | Behaviour |
//! |---------|-----------|
//! | Binding from another root | `ConfigError::ForeignBinding` |
//! | Unregistered binding | `ConfigError::Unknown*` |
//! | Draggable not found in any droppable's members | pickup rejected, warning logged |
//! | Drop with no payload id or origin | no callback, session reset |
//! | Type mismatch | no acceptance, no placeholder, no callback |

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace, warn};
use treedrop_core::{
    Candidate, CandidateFilter, ConfigError, Disposition, DragTransfer, DropResult, ElementSnapshot,
    InsertionSlot, KeyEvent, KeyEventKind, Location, LogicalDragEvent, NativeDragKind, Point,
    SlotAnchor, resolve_insertion_slot, visible_candidates,
};

use crate::arbiter::ReleaseOutcome;
use crate::autoscroll::ScrollStep;
use crate::config::SessionConfig;
use crate::keyboard::{ContainerView, KeyOutcome, plan_move};
use crate::registry::{
    DraggableAttributes, DraggableBinding, DraggableConfig, DraggableSnapshot, DroppableAttributes,
    DroppableBinding, DroppableConfig, DroppableSnapshot, Registry,
};
use crate::root::PlaceholderFn;
use crate::state::{DragSessionState, InvariantViolation};
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingPickup {
    drag_id: String,
    origin: Location,
}

/// A mounted drag session.
pub struct Session<P> {
    root_id: u64,
    config: SessionConfig,
    state: DragSessionState,
    registry: Registry,
    placeholder_fn: Option<PlaceholderFn<P>>,
    rendered_placeholder: Option<P>,
    pending_pickup: Option<PendingPickup>,
    drop_intent: Option<DropResult>,
}

impl<P> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("root_id", &self.root_id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("has_placeholder_fn", &self.placeholder_fn.is_some())
            .field("has_rendered_placeholder", &self.rendered_placeholder.is_some())
            .field("pending_pickup", &self.pending_pickup)
            .field("drop_intent", &self.drop_intent)
            .finish()
    }
}

impl<P> Session<P> {
    pub(crate) fn new(root_id: u64, config: SessionConfig, placeholder_fn: Option<PlaceholderFn<P>>) -> Self {
        Self {
            root_id,
            state: DragSessionState::new(config.acceptance_settle),
            config,
            registry: Registry::new(root_id),
            placeholder_fn,
            rendered_placeholder: None,
            pending_pickup: None,
            drop_intent: None,
        }
    }

    /// Id of the owning root.
    #[must_use]
    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> &DragSessionState {
        &self.state
    }

    /// Verify the gesture state invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.state.check_invariants()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a droppable. `on_drop` receives every committed drop here.
    pub fn register_droppable(
        &mut self,
        config: DroppableConfig,
        on_drop: impl FnMut(&DropResult) + 'static,
    ) -> Result<DroppableBinding, ConfigError> {
        let binding = self.registry.add_droppable(config, Box::new(on_drop))?;
        debug!(root = self.root_id, droppable = binding.id(), "droppable registered");
        Ok(binding)
    }

    /// Remove a droppable. A placeholder inside it is cleared.
    pub fn unregister_droppable(&mut self, binding: &DroppableBinding) -> Result<(), ConfigError> {
        self.registry.remove_droppable(binding)?;
        self.state.clear_placeholder_in(binding.id());
        Ok(())
    }

    /// Register a draggable inside an already registered droppable.
    pub fn register_draggable(&mut self, config: DraggableConfig) -> Result<DraggableBinding, ConfigError> {
        self.registry.add_draggable(config)
    }

    /// Remove a draggable.
    pub fn unregister_draggable(&mut self, binding: &DraggableBinding) -> Result<(), ConfigError> {
        self.registry.remove_draggable(binding).map(|_| ())
    }

    /// Record that the host moved a draggable into another droppable.
    pub fn move_draggable(&mut self, binding: &DraggableBinding, droppable_id: &str) -> Result<(), ConfigError> {
        if self.registry.droppable_by_id(droppable_id).is_none() {
            return Err(ConfigError::UnknownDroppable(droppable_id.to_owned()));
        }
        self.registry.draggable_mut(binding)?.config.droppable_id = droppable_id.to_owned();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Render-time queries
    // -----------------------------------------------------------------------

    fn is_payload(&self, drag_id: &str) -> bool {
        self.state.active_payload_id() == Some(drag_id)
    }

    /// Attributes for a draggable element.
    pub fn draggable_attributes(&self, binding: &DraggableBinding) -> Result<DraggableAttributes, ConfigError> {
        let entry = self.registry.draggable(binding)?;
        Ok(DraggableAttributes {
            id: entry.element_id.clone(),
            droppable_id: entry.config.droppable_id.clone(),
            tab_index: 0,
            role: "treeitem",
            aria_grabbed: self.is_payload(&entry.config.drag_id),
            draggable: !entry.config.disabled,
        })
    }

    /// Attributes for a droppable element.
    pub fn droppable_attributes(&self, binding: &DroppableBinding) -> Result<DroppableAttributes, ConfigError> {
        let entry = self.registry.droppable(binding)?;
        Ok(DroppableAttributes {
            id: entry.element_id.clone(),
            role: "tree",
            aria_orientation: entry.config.direction,
            accepts: entry.config.accepts.to_attribute(),
        })
    }

    /// Render-time state of a draggable.
    pub fn draggable_snapshot(&self, binding: &DraggableBinding) -> Result<DraggableSnapshot, ConfigError> {
        let entry = self.registry.draggable(binding)?;
        let is_dragging = self.is_payload(&entry.config.drag_id);
        Ok(DraggableSnapshot {
            is_dragging,
            is_droppable: is_dragging && self.state.is_any_container_accepting(),
        })
    }

    /// Render-time state of a droppable.
    pub fn droppable_snapshot(&self, binding: &DroppableBinding) -> Result<DroppableSnapshot, ConfigError> {
        let entry = self.registry.droppable(binding)?;
        Ok(DroppableSnapshot {
            is_dragging_over: entry.dragging_over,
        })
    }

    /// Current placeholder slot.
    #[must_use]
    pub fn placeholder_slot(&self) -> Option<&InsertionSlot> {
        self.state.placeholder()
    }

    /// The rendered placeholder if it belongs at the end of this droppable.
    pub fn droppable_placeholder(&self, binding: &DroppableBinding) -> Result<Option<&P>, ConfigError> {
        self.registry.droppable(binding)?;
        let here = self
            .state
            .placeholder()
            .is_some_and(|slot| slot.droppable_id == binding.id() && slot.anchor == SlotAnchor::End);
        Ok(if here { self.rendered_placeholder.as_ref() } else { None })
    }

    /// The rendered placeholder if it belongs right before this draggable.
    pub fn placeholder_before(&self, binding: &DraggableBinding) -> Result<Option<&P>, ConfigError> {
        self.registry.draggable(binding)?;
        let here = self
            .state
            .placeholder()
            .is_some_and(|slot| slot.anchor_id() == Some(binding.id()));
        Ok(if here { self.rendered_placeholder.as_ref() } else { None })
    }

    // -----------------------------------------------------------------------
    // Draggable handlers
    // -----------------------------------------------------------------------

    /// Pointer pressed on the draggable's handle.
    pub fn handle_pointer_down(&mut self, binding: &DraggableBinding) -> Result<(), ConfigError> {
        self.registry.draggable_mut(binding)?.handle_armed = true;
        Ok(())
    }

    /// Pointer released from the draggable's handle.
    pub fn handle_pointer_up(&mut self, binding: &DraggableBinding) -> Result<(), ConfigError> {
        self.registry.draggable_mut(binding)?.handle_armed = false;
        Ok(())
    }

    /// Find the draggable among visible members, trying its own droppable
    /// first and then every droppable in registration order.
    fn locate<S: Surface + ?Sized>(&self, surface: &S, config: &DraggableConfig) -> Option<(Location, ElementSnapshot)> {
        let find_in = |droppable_id: &str| {
            surface
                .members(droppable_id)
                .into_iter()
                .filter(|e| !e.hidden)
                .enumerate()
                .find(|(_, e)| e.id == config.drag_id)
                .map(|(index, e)| (Location::new(droppable_id, index), e))
        };
        find_in(&config.droppable_id).or_else(|| {
            self.registry
                .droppables()
                .iter()
                .map(|d| d.config.droppable_id.as_str())
                .filter(|id| *id != config.droppable_id)
                .find_map(find_in)
        })
    }

    /// Native drag start on a draggable.
    ///
    /// Writes the payload into `transfer`. Returns
    /// [`Disposition::REJECTED`] when the item is disabled, needs an armed
    /// handle, or cannot be found on the surface.
    pub fn drag_start<S: Surface + ?Sized>(
        &mut self,
        binding: &DraggableBinding,
        surface: &S,
        transfer: &mut DragTransfer,
    ) -> Result<Disposition, ConfigError> {
        let entry = self.registry.draggable(binding)?;
        if entry.config.disabled {
            debug!(drag_id = binding.id(), "pickup refused: disabled");
            return Ok(Disposition::REJECTED);
        }
        if entry.config.requires_handle && !entry.handle_armed {
            debug!(drag_id = binding.id(), "pickup refused: handle not armed");
            return Ok(Disposition::REJECTED);
        }
        let config = entry.config.clone();

        let Some((origin, element)) = self.locate(surface, &config) else {
            warn!(
                drag_id = binding.id(),
                droppable = %config.droppable_id,
                "pickup refused: draggable is not a visible member of any droppable"
            );
            return Ok(Disposition::REJECTED);
        };

        self.reset_gesture();
        *transfer = DragTransfer::for_payload(&config.drag_id, &origin, &config.types)
            .with_effects(config.drop_effect, config.effect_allowed);
        self.rendered_placeholder = self
            .placeholder_fn
            .as_ref()
            .map(|render| render(&element, &config.types));
        debug!(drag_id = %config.drag_id, origin = %origin, "pickup");
        self.pending_pickup = Some(PendingPickup {
            drag_id: config.drag_id,
            origin,
        });
        Ok(Disposition::CONTAINED)
    }

    /// Native drag motion on a draggable. The first motion after pickup
    /// starts the drag.
    pub fn drag(&mut self, binding: &DraggableBinding, pointer: Point) -> Result<Disposition, ConfigError> {
        self.registry.draggable(binding)?;
        self.state.track_pointer(pointer);
        if let Some(pickup) = self.pending_pickup.take_if(|p| p.drag_id == binding.id()) {
            debug!(drag_id = %pickup.drag_id, origin = %pickup.origin, "drag started");
            self.state.begin(pickup.drag_id, pickup.origin);
        }
        Ok(Disposition::PASS)
    }

    /// Native drag end. Always resets the session.
    pub fn drag_end(&mut self, binding: &DraggableBinding) -> Result<Disposition, ConfigError> {
        self.registry.check_root(binding.root_id)?;
        if self.state.is_dragging() || self.pending_pickup.is_some() {
            debug!(drag_id = binding.id(), "drag ended");
        }
        self.reset_gesture();
        self.release_keys();
        Ok(Disposition::PASS)
    }

    /// Abort any gesture in progress.
    pub fn cancel(&mut self) {
        if self.state.is_dragging() {
            debug!(root = self.root_id, "drag cancelled");
        }
        self.reset_gesture();
        self.release_keys();
    }

    fn release_keys(&mut self) {
        for entry in self.registry.draggables_mut() {
            entry.key_pressed = false;
            entry.handle_armed = false;
        }
    }

    fn reset_gesture(&mut self) {
        self.state.end();
        self.pending_pickup = None;
        self.drop_intent = None;
        self.rendered_placeholder = None;
        for entry in self.registry.droppables_mut() {
            entry.reset();
        }
    }

    /// Key pressed while a draggable has focus.
    pub fn key_down<S: Surface + ?Sized>(
        &mut self,
        binding: &DraggableBinding,
        event: &KeyEvent,
        surface: &S,
    ) -> Result<KeyOutcome, ConfigError> {
        let entry = self.registry.draggable(binding)?;
        if !self.config.keyboard_enabled || entry.config.disabled || event.kind == KeyEventKind::Release {
            return Ok(KeyOutcome::Ignored);
        }
        if entry.key_pressed || event.kind == KeyEventKind::Repeat {
            return Ok(KeyOutcome::Repeat);
        }
        let config = entry.config.clone();

        let Some((from, _)) = self.locate(surface, &config) else {
            warn!(drag_id = %config.drag_id, "keyboard move on a draggable missing from the surface");
            return Ok(KeyOutcome::Ignored);
        };
        let direction = self
            .registry
            .droppable_by_id(&from.droppable_id)
            .map(|d| d.config.direction)
            .unwrap_or_default();
        let Some(action) = self.config.key_bindings.action_for(event, direction) else {
            return Ok(KeyOutcome::Ignored);
        };
        self.registry.draggable_mut(binding)?.key_pressed = true;

        let counts: Vec<usize> = self
            .registry
            .droppables()
            .iter()
            .map(|d| {
                visible_candidates(&surface.members(&d.config.droppable_id), &CandidateFilter::visible_only()).len()
            })
            .collect();
        let views: Vec<ContainerView<'_>> = self
            .registry
            .droppables()
            .iter()
            .zip(&counts)
            .map(|(d, len)| ContainerView {
                droppable_id: &d.config.droppable_id,
                accepts: &d.config.accepts,
                len: *len,
            })
            .collect();
        let Some(to) = plan_move(action, &from, &config.type_set(), &views) else {
            debug!(drag_id = %config.drag_id, ?action, from = %from, "keyboard move out of bounds");
            return Ok(KeyOutcome::NoOp);
        };

        debug!(drag_id = %config.drag_id, ?action, from = %from, to = %to, "keyboard move");
        let destination = to.droppable_id.clone();
        self.drop_intent = Some(DropResult::new(config.drag_id.clone(), from.clone(), to));
        let transfer = DragTransfer::for_payload(&config.drag_id, &from, &config.types)
            .with_effects(config.drop_effect, config.effect_allowed);
        let pointer = self.state.pointer();
        let Some(destination) = self.registry.droppable_by_id(&destination).map(|d| DroppableBinding {
            root_id: self.root_id,
            droppable_id: d.config.droppable_id.clone(),
        }) else {
            return Ok(KeyOutcome::NoOp);
        };
        let delivered = self.dispatch_drop(&destination, pointer, &transfer, surface)?;
        Ok(delivered.map_or(KeyOutcome::NoOp, KeyOutcome::Moved))
    }

    /// Key released while a draggable has focus.
    pub fn key_up(&mut self, binding: &DraggableBinding, _event: &KeyEvent) -> Result<(), ConfigError> {
        self.registry.draggable_mut(binding)?.key_pressed = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Droppable handlers
    // -----------------------------------------------------------------------

    /// Root-level pointer tracker. Call before region handlers on every
    /// drag-over anywhere in the root.
    pub fn track_pointer(&mut self, pointer: Point) {
        self.state.track_pointer(pointer);
    }

    /// Native drag signal on a droppable.
    pub fn droppable_event<S: Surface + ?Sized>(
        &mut self,
        binding: &DroppableBinding,
        kind: NativeDragKind,
        pointer: Point,
        transfer: &DragTransfer,
        surface: &S,
        now: Instant,
    ) -> Result<Disposition, ConfigError> {
        self.state.track_pointer(pointer);
        let advertised = transfer.advertised_types();
        let dragging = self.state.is_dragging();
        let entry = self.registry.droppable_mut(binding)?;
        let outcome = entry.dragster.handle(kind, &advertised);
        let compatible = entry.dragster.is_compatible(&advertised);

        match outcome.logical {
            Some(LogicalDragEvent::Enter) => {
                entry.scroller.set_hovering(true);
                if compatible {
                    entry.dragging_over = true;
                    let epoch = self.state.arbiter_mut().claim();
                    debug!(droppable = binding.id(), epoch, "droppable accepts payload");
                }
            }
            Some(LogicalDragEvent::Leave) => {
                entry.dragging_over = false;
                entry.scroller.set_hovering(false);
                self.state.clear_placeholder_in(binding.id());
                let pending = self.state.arbiter_mut().schedule_release(now);
                trace!(droppable = binding.id(), epoch = pending.epoch, "acceptance release scheduled");
            }
            Some(LogicalDragEvent::Over) => {
                entry.dragging_over = true;
                entry.scroller.set_hovering(true);
                if dragging && entry.config.auto_scroll.enabled && entry.scroller.start() {
                    trace!(droppable = binding.id(), "auto-scroll loop started");
                }
                self.state.arbiter_mut().claim();
                self.update_placeholder(binding.id(), surface);
            }
            Some(LogicalDragEvent::Drop { accepted: true }) => {
                entry.dragging_over = false;
                self.dispatch_drop(binding, pointer, transfer, surface)?;
            }
            Some(LogicalDragEvent::Drop { accepted: false }) => {
                entry.dragging_over = false;
                debug!(droppable = binding.id(), advertised = %advertised, "drop refused: incompatible payload");
            }
            None => {}
        }
        Ok(outcome.disposition)
    }

    fn update_placeholder<S: Surface + ?Sized>(&mut self, droppable_id: &str, surface: &S) {
        if !self.state.is_dragging() {
            return;
        }
        let Some(entry) = self.registry.droppable_by_id(droppable_id) else {
            return;
        };
        let filter = CandidateFilter::excluding_payload(self.config.exclude_grabbed, self.state.active_payload_id());
        let candidates = visible_candidates(&surface.members(droppable_id), &filter);
        let slot = resolve_insertion_slot(self.state.pointer(), entry.config.direction, droppable_id, &candidates);
        let index = slot.index;
        if self.state.publish_placeholder(slot) {
            trace!(droppable = droppable_id, index, "placeholder moved");
        }
    }

    /// Build the drop result for a pointer drop on `droppable_id`.
    fn pointer_drop_result<S: Surface + ?Sized>(
        &self,
        droppable_id: &str,
        pointer: Point,
        transfer: &DragTransfer,
        surface: &S,
    ) -> Option<DropResult> {
        let pending = self.pending_pickup.as_ref();
        let drag_id = self
            .state
            .active_payload_id()
            .or_else(|| pending.map(|p| p.drag_id.as_str()))
            .or_else(|| transfer.payload_id())?
            .to_owned();
        let from = self
            .state
            .origin()
            .cloned()
            .or_else(|| pending.map(|p| p.origin.clone()))
            .or_else(|| transfer.origin())?;

        let filter = CandidateFilter::excluding_payload(self.config.exclude_grabbed, Some(&drag_id));
        let candidates = visible_candidates(&surface.members(droppable_id), &filter);
        let slot_index = match self.state.placeholder() {
            Some(slot) if slot.droppable_id == droppable_id => slot.index,
            _ => {
                let direction = self.registry.droppable_by_id(droppable_id)?.config.direction;
                resolve_insertion_slot(pointer, direction, droppable_id, &candidates).index
            }
        };
        Some(DropResult::new(
            drag_id.clone(),
            from,
            Location::new(droppable_id, post_removal_index(slot_index, &candidates, &drag_id)),
        ))
    }

    /// Deliver a drop on `binding`: the pending keyboard intent if it targets
    /// this droppable, otherwise the pointer result. Resets the session.
    fn dispatch_drop<S: Surface + ?Sized>(
        &mut self,
        binding: &DroppableBinding,
        pointer: Point,
        transfer: &DragTransfer,
        surface: &S,
    ) -> Result<Option<DropResult>, ConfigError> {
        let result = match self.drop_intent.take() {
            Some(intent) if intent.to.droppable_id == binding.id() => Some(intent),
            _ => self.pointer_drop_result(binding.id(), pointer, transfer, surface),
        };
        let Some(result) = result else {
            warn!(droppable = binding.id(), "drop without payload id or origin ignored");
            self.reset_gesture();
            return Ok(None);
        };

        debug!(droppable = binding.id(), result = %result, "drop committed");
        let entry = self.registry.droppable_mut(binding)?;
        (entry.on_drop)(&result);
        self.reset_gesture();
        Ok(Some(result))
    }

    /// Pointer entered a droppable (hover tracking for auto-scroll).
    ///
    /// Returns true if a new auto-scroll loop started and the host should
    /// request an animation frame.
    pub fn pointer_enter(&mut self, binding: &DroppableBinding) -> Result<bool, ConfigError> {
        let dragging = self.state.is_dragging();
        let entry = self.registry.droppable_mut(binding)?;
        entry.scroller.set_hovering(true);
        Ok(dragging && entry.config.auto_scroll.enabled && entry.scroller.start())
    }

    /// Pointer left a droppable.
    pub fn pointer_leave(&mut self, binding: &DroppableBinding) -> Result<(), ConfigError> {
        self.registry.droppable_mut(binding)?.scroller.set_hovering(false);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Timers and frames
    // -----------------------------------------------------------------------

    /// Run the deferred acceptance check if due. Returns true if acceptance
    /// was released.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state.arbiter_mut().poll(now) {
            Some(ReleaseOutcome::Released) => {
                debug!(root = self.root_id, "acceptance released");
                true
            }
            Some(ReleaseOutcome::Superseded) => {
                trace!(root = self.root_id, epoch = self.state.acceptance_epoch(), "acceptance release superseded");
                false
            }
            None => false,
        }
    }

    /// When [`Self::poll`] should next be called.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.arbiter().next_deadline()
    }

    /// Whether any auto-scroll loop is running.
    #[must_use]
    pub fn wants_animation_frame(&self) -> bool {
        self.registry.droppables().iter().any(|d| d.scroller.is_started())
    }

    /// Run one auto-scroll frame for every running loop.
    ///
    /// Returns true while at least one loop wants another frame.
    pub fn animation_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let dragging = self.state.is_dragging();
        let pointer = self.state.pointer();
        let mut again = false;
        for entry in self.registry.droppables_mut() {
            if !entry.scroller.is_started() {
                continue;
            }
            let id = entry.config.droppable_id.as_str();
            match entry
                .scroller
                .frame(&entry.config.auto_scroll, dragging, pointer, surface.scroll_frame(id))
            {
                ScrollStep::Stopped => trace!(droppable = id, "auto-scroll loop stopped"),
                ScrollStep::Nudge { dx, dy } => {
                    if dx != 0.0 || dy != 0.0 {
                        trace!(droppable = id, dx, dy, "auto-scroll");
                        surface.scroll_by(id, dx, dy);
                    }
                    again = true;
                }
            }
        }
        again
    }
}

/// Slot index once the payload is lifted out of `candidates`.
///
/// The payload is still a candidate when grabbed elements are not excluded;
/// a slot after it shifts down by one.
fn post_removal_index(slot_index: usize, candidates: &[Candidate], drag_id: &str) -> usize {
    match candidates.iter().position(|c| c.id == drag_id) {
        Some(own) if own < slot_index => slot_index - 1,
        _ => slot_index,
    }
}
