#![forbid(unsafe_code)]

//! Draggable and droppable registration.
//!
//! Registering returns a binding: a small token naming the element and the
//! root that owns it. Every handler takes a binding back, so a binding from
//! one root cannot drive another root's session.
//!
//! Droppables keep registration order; keyboard moves between droppables
//! walk that order.

use std::collections::BTreeMap;
use std::fmt;

use treedrop_core::{
    ConfigError, Direction, DraggableType, Dragster, DropEffect, DropResult, EffectAllowed, TypeSet,
};

use crate::autoscroll::{AutoScrollConfig, AutoScroller};

/// Membership attribute written on every draggable element.
pub const MEMBERSHIP_ATTRIBUTE: &str = "data-draggable-in-column-id";

// ---------------------------------------------------------------------------
// Configs
// ---------------------------------------------------------------------------

/// Droppable registration settings.
#[derive(Debug, Clone)]
pub struct DroppableConfig {
    /// Stable id.
    pub droppable_id: String,
    /// Accepted tags.
    pub accepts: TypeSet,
    /// Layout direction.
    pub direction: Direction,
    /// Edge auto-scroll.
    pub auto_scroll: AutoScrollConfig,
}

impl DroppableConfig {
    /// A vertical droppable without auto-scroll.
    #[must_use]
    pub fn new(droppable_id: impl Into<String>, accepts: TypeSet) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            accepts,
            direction: Direction::Vertical,
            auto_scroll: AutoScrollConfig::default(),
        }
    }

    /// Set the layout direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set auto-scroll.
    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }
}

/// Draggable registration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableConfig {
    /// Stable id. Must equal the element id reported by the host surface.
    pub drag_id: String,
    /// Droppable the item currently lives in.
    pub droppable_id: String,
    /// Type tags.
    pub types: Vec<DraggableType>,
    /// Disabled items cannot be picked up or moved by keyboard.
    pub disabled: bool,
    /// Effect written into the transfer.
    pub drop_effect: DropEffect,
    /// Allowed effects written into the transfer.
    pub effect_allowed: EffectAllowed,
    /// Only a drag started from an armed handle is accepted.
    pub requires_handle: bool,
}

impl DraggableConfig {
    /// An enabled draggable with the given tags.
    #[must_use]
    pub fn new(
        drag_id: impl Into<String>,
        droppable_id: impl Into<String>,
        types: impl IntoIterator<Item = DraggableType>,
    ) -> Self {
        Self {
            drag_id: drag_id.into(),
            droppable_id: droppable_id.into(),
            types: types.into_iter().collect(),
            disabled: false,
            drop_effect: DropEffect::default(),
            effect_allowed: EffectAllowed::default(),
            requires_handle: false,
        }
    }

    /// Disable or enable.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set transfer effects.
    #[must_use]
    pub fn with_effects(mut self, drop_effect: DropEffect, effect_allowed: EffectAllowed) -> Self {
        self.drop_effect = drop_effect;
        self.effect_allowed = effect_allowed;
        self
    }

    /// Require a drag handle.
    #[must_use]
    pub fn with_handle(mut self) -> Self {
        self.requires_handle = true;
        self
    }

    /// Tag keys as a set.
    #[must_use]
    pub fn type_set(&self) -> TypeSet {
        TypeSet::of_types(&self.types)
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// Token for a registered droppable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DroppableBinding {
    pub(crate) root_id: u64,
    pub(crate) droppable_id: String,
}

impl DroppableBinding {
    /// Droppable id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.droppable_id
    }

    /// Owning root.
    #[must_use]
    pub fn root_id(&self) -> u64 {
        self.root_id
    }
}

/// Token for a registered draggable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraggableBinding {
    pub(crate) root_id: u64,
    pub(crate) drag_id: String,
}

impl DraggableBinding {
    /// Draggable id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.drag_id
    }

    /// Owning root.
    #[must_use]
    pub fn root_id(&self) -> u64 {
        self.root_id
    }
}

// ---------------------------------------------------------------------------
// Attributes and snapshots
// ---------------------------------------------------------------------------

/// Attributes the host writes on a draggable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableAttributes {
    /// Generated element id, unique per root.
    ///
    /// Only for host wiring such as `aria-*` references. The session keys
    /// items, snapshots and placeholder anchors by drag id, which is also
    /// what [`Surface::members`](crate::Surface::members) reports.
    pub id: String,
    /// Owning droppable (the membership tag value).
    pub droppable_id: String,
    /// Always 0: draggables are tab reachable.
    pub tab_index: i32,
    /// ARIA role.
    pub role: &'static str,
    /// Whether this item is being dragged.
    pub aria_grabbed: bool,
    /// Native draggable flag.
    pub draggable: bool,
}

impl DraggableAttributes {
    /// Attribute name/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            (MEMBERSHIP_ATTRIBUTE, self.droppable_id.clone()),
            ("tabindex", self.tab_index.to_string()),
            ("role", self.role.to_owned()),
            ("aria-grabbed", self.aria_grabbed.to_string()),
            ("draggable", self.draggable.to_string()),
        ]
    }
}

/// Attributes the host writes on a droppable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppableAttributes {
    /// Element id.
    pub id: String,
    /// ARIA role.
    pub role: &'static str,
    /// ARIA orientation.
    pub aria_orientation: Direction,
    /// Accepted tags, space separated.
    pub accepts: String,
}

impl DroppableAttributes {
    /// Attribute name/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("role", self.role.to_owned()),
            ("aria-orientation", self.aria_orientation.as_str().to_owned()),
            ("data-accepts", self.accepts.clone()),
        ]
    }
}

/// Render-time state of a draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraggableSnapshot {
    /// This item is the payload in flight.
    pub is_dragging: bool,
    /// This item is in flight and some droppable accepts it.
    pub is_droppable: bool,
}

/// Render-time state of a droppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DroppableSnapshot {
    /// A compatible payload is over this droppable.
    pub is_dragging_over: bool,
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

pub(crate) type DropCallback = Box<dyn FnMut(&DropResult)>;

pub(crate) struct DroppableEntry {
    pub(crate) config: DroppableConfig,
    pub(crate) element_id: String,
    pub(crate) dragster: Dragster,
    pub(crate) dragging_over: bool,
    pub(crate) scroller: AutoScroller,
    pub(crate) on_drop: DropCallback,
}

impl fmt::Debug for DroppableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableEntry")
            .field("config", &self.config)
            .field("element_id", &self.element_id)
            .field("dragster", &self.dragster)
            .field("dragging_over", &self.dragging_over)
            .field("scroller", &self.scroller)
            .field("on_drop", &"<callback>")
            .finish()
    }
}

impl DroppableEntry {
    /// Clear per-gesture flags.
    pub(crate) fn reset(&mut self) {
        self.dragster.reset();
        self.dragging_over = false;
        self.scroller.stop();
    }
}

#[derive(Debug)]
pub(crate) struct DraggableEntry {
    pub(crate) config: DraggableConfig,
    pub(crate) element_id: String,
    pub(crate) handle_armed: bool,
    pub(crate) key_pressed: bool,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct Registry {
    root_id: u64,
    droppables: Vec<DroppableEntry>,
    draggables: BTreeMap<String, DraggableEntry>,
    next_element: u64,
}

impl Registry {
    pub(crate) fn new(root_id: u64) -> Self {
        Self {
            root_id,
            droppables: Vec::new(),
            draggables: BTreeMap::new(),
            next_element: 0,
        }
    }

    fn element_id(&mut self, kind: &str) -> String {
        self.next_element += 1;
        format!("treedrop-{}-{kind}-{}", self.root_id, self.next_element)
    }

    pub(crate) fn check_root(&self, binding_root: u64) -> Result<(), ConfigError> {
        if binding_root == self.root_id {
            Ok(())
        } else {
            Err(ConfigError::ForeignBinding {
                binding_root,
                session_root: self.root_id,
            })
        }
    }

    pub(crate) fn add_droppable(
        &mut self,
        config: DroppableConfig,
        on_drop: DropCallback,
    ) -> Result<DroppableBinding, ConfigError> {
        if self.droppable_by_id(&config.droppable_id).is_some() {
            return Err(ConfigError::DuplicateDroppable(config.droppable_id));
        }
        if let Err(errors) = config.auto_scroll.validate()
            && let Some(first) = errors.into_iter().next()
        {
            return Err(first);
        }
        let binding = DroppableBinding {
            root_id: self.root_id,
            droppable_id: config.droppable_id.clone(),
        };
        let element_id = self.element_id("droppable");
        self.droppables.push(DroppableEntry {
            dragster: Dragster::new(config.accepts.clone()),
            config,
            element_id,
            dragging_over: false,
            scroller: AutoScroller::default(),
            on_drop,
        });
        Ok(binding)
    }

    pub(crate) fn remove_droppable(&mut self, binding: &DroppableBinding) -> Result<DroppableConfig, ConfigError> {
        self.check_root(binding.root_id)?;
        let position = self
            .droppables
            .iter()
            .position(|d| d.config.droppable_id == binding.droppable_id)
            .ok_or_else(|| ConfigError::UnknownDroppable(binding.droppable_id.clone()))?;
        Ok(self.droppables.remove(position).config)
    }

    pub(crate) fn add_draggable(&mut self, config: DraggableConfig) -> Result<DraggableBinding, ConfigError> {
        if self.draggables.contains_key(&config.drag_id) {
            return Err(ConfigError::DuplicateDraggable(config.drag_id));
        }
        if self.droppable_by_id(&config.droppable_id).is_none() {
            return Err(ConfigError::UnknownDroppable(config.droppable_id));
        }
        let binding = DraggableBinding {
            root_id: self.root_id,
            drag_id: config.drag_id.clone(),
        };
        let element_id = self.element_id("draggable");
        self.draggables.insert(
            config.drag_id.clone(),
            DraggableEntry {
                config,
                element_id,
                handle_armed: false,
                key_pressed: false,
            },
        );
        Ok(binding)
    }

    pub(crate) fn remove_draggable(&mut self, binding: &DraggableBinding) -> Result<DraggableConfig, ConfigError> {
        self.check_root(binding.root_id)?;
        self.draggables
            .remove(&binding.drag_id)
            .map(|entry| entry.config)
            .ok_or_else(|| ConfigError::UnknownDraggable(binding.drag_id.clone()))
    }

    pub(crate) fn droppable(&self, binding: &DroppableBinding) -> Result<&DroppableEntry, ConfigError> {
        self.check_root(binding.root_id)?;
        self.droppable_by_id(&binding.droppable_id)
            .ok_or_else(|| ConfigError::UnknownDroppable(binding.droppable_id.clone()))
    }

    pub(crate) fn droppable_mut(&mut self, binding: &DroppableBinding) -> Result<&mut DroppableEntry, ConfigError> {
        self.check_root(binding.root_id)?;
        self.droppable_by_id_mut(&binding.droppable_id)
            .ok_or_else(|| ConfigError::UnknownDroppable(binding.droppable_id.clone()))
    }

    pub(crate) fn draggable(&self, binding: &DraggableBinding) -> Result<&DraggableEntry, ConfigError> {
        self.check_root(binding.root_id)?;
        self.draggables
            .get(&binding.drag_id)
            .ok_or_else(|| ConfigError::UnknownDraggable(binding.drag_id.clone()))
    }

    pub(crate) fn draggable_mut(&mut self, binding: &DraggableBinding) -> Result<&mut DraggableEntry, ConfigError> {
        self.check_root(binding.root_id)?;
        self.draggables
            .get_mut(&binding.drag_id)
            .ok_or_else(|| ConfigError::UnknownDraggable(binding.drag_id.clone()))
    }

    pub(crate) fn droppable_by_id(&self, id: &str) -> Option<&DroppableEntry> {
        self.droppables.iter().find(|d| d.config.droppable_id == id)
    }

    pub(crate) fn droppable_by_id_mut(&mut self, id: &str) -> Option<&mut DroppableEntry> {
        self.droppables.iter_mut().find(|d| d.config.droppable_id == id)
    }

    pub(crate) fn droppables(&self) -> &[DroppableEntry] {
        &self.droppables
    }

    pub(crate) fn droppables_mut(&mut self) -> &mut [DroppableEntry] {
        &mut self.droppables
    }

    pub(crate) fn draggables_mut(&mut self) -> impl Iterator<Item = &mut DraggableEntry> {
        self.draggables.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> DropCallback {
        Box::new(|_| {})
    }

    #[test]
    fn registration_order_is_kept() {
        let mut r = Registry::new(1);
        for id in ["c", "a", "b"] {
            r.add_droppable(DroppableConfig::new(id, TypeSet::parse("task")), noop())
                .unwrap();
        }
        let ids: Vec<_> = r.droppables().iter().map(|d| d.config.droppable_id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut r = Registry::new(1);
        r.add_droppable(DroppableConfig::new("a", TypeSet::new()), noop()).unwrap();
        assert_eq!(
            r.add_droppable(DroppableConfig::new("a", TypeSet::new()), noop())
                .unwrap_err(),
            ConfigError::DuplicateDroppable("a".into())
        );
        r.add_draggable(DraggableConfig::new("x", "a", [DraggableType::new("task")]))
            .unwrap();
        assert_eq!(
            r.add_draggable(DraggableConfig::new("x", "a", [])).unwrap_err(),
            ConfigError::DuplicateDraggable("x".into())
        );
    }

    #[test]
    fn draggable_needs_known_droppable() {
        let mut r = Registry::new(1);
        assert_eq!(
            r.add_draggable(DraggableConfig::new("x", "nowhere", [])).unwrap_err(),
            ConfigError::UnknownDroppable("nowhere".into())
        );
    }

    #[test]
    fn foreign_bindings_are_rejected() {
        let mut mine = Registry::new(1);
        let mut theirs = Registry::new(2);
        let b = theirs
            .add_droppable(DroppableConfig::new("a", TypeSet::new()), noop())
            .unwrap();
        mine.add_droppable(DroppableConfig::new("a", TypeSet::new()), noop())
            .unwrap();
        assert_eq!(
            mine.droppable(&b).unwrap_err(),
            ConfigError::ForeignBinding {
                binding_root: 2,
                session_root: 1
            }
        );
    }

    #[test]
    fn invalid_auto_scroll_is_rejected() {
        let mut r = Registry::new(1);
        let cfg = DroppableConfig::new("a", TypeSet::new())
            .with_auto_scroll(AutoScrollConfig::enabled().with_distance(-1.0));
        assert!(matches!(
            r.add_droppable(cfg, noop()),
            Err(ConfigError::InvalidValue { field: "auto_scroll.distance", .. })
        ));
    }

    #[test]
    fn element_ids_are_unique_and_scoped() {
        let mut r = Registry::new(7);
        r.add_droppable(DroppableConfig::new("a", TypeSet::new()), noop()).unwrap();
        r.add_draggable(DraggableConfig::new("x", "a", [])).unwrap();
        assert_eq!(r.droppables()[0].element_id, "treedrop-7-droppable-1");
        let b = DraggableBinding { root_id: 7, drag_id: "x".into() };
        assert_eq!(r.draggable(&b).unwrap().element_id, "treedrop-7-draggable-2");
    }

    #[test]
    fn attribute_pairs() {
        let attrs = DraggableAttributes {
            id: "e".into(),
            droppable_id: "col".into(),
            tab_index: 0,
            role: "treeitem",
            aria_grabbed: false,
            draggable: true,
        };
        let pairs = attrs.pairs();
        assert!(pairs.contains(&("data-draggable-in-column-id", "col".to_string())));
        assert!(pairs.contains(&("aria-grabbed", "false".to_string())));
    }
}
