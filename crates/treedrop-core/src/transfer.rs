#![forbid(unsafe_code)]

//! Drag transfer metadata.
//!
//! A [`DragTransfer`] models the key/value store a platform attaches to a
//! native drag. At drag start the session writes the payload id, the origin
//! location and one entry per type tag; droppables read the advertised tag
//! keys while the drag is in flight and the full entries at drop.
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `application/draggable-id` | payload id |
//! | `application/draggable-from-columnid` | origin droppable id |
//! | `application/draggable-from-index` | origin index, decimal |
//! | `application/draggable-type-<key>` | tag value or `"true"` |
//!
//! Platforms hide values (but not keys) until drop, so compatibility checks
//! during Over only use [`DragTransfer::advertised_types`].

use std::collections::BTreeMap;

use crate::location::Location;
use crate::tags::{DraggableType, TypeSet};

/// Key carrying the payload id.
pub const DRAGGABLE_ID_KEY: &str = "application/draggable-id";
/// Key carrying the origin droppable id.
pub const FROM_DROPPABLE_KEY: &str = "application/draggable-from-columnid";
/// Key carrying the origin index.
pub const FROM_INDEX_KEY: &str = "application/draggable-from-index";
/// Prefix of per-tag keys.
pub const TYPE_KEY_PREFIX: &str = "application/draggable-type-";

/// Transfer key for a type tag.
#[must_use]
pub fn type_key(tag: &str) -> String {
    format!("{TYPE_KEY_PREFIX}{tag}")
}

/// The operation a drop performs, as reported to the platform cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropEffect {
    /// Drop not allowed.
    None,
    /// Copy the payload.
    Copy,
    /// Move the payload.
    #[default]
    Move,
    /// Link to the payload.
    Link,
}

impl DropEffect {
    /// Platform spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        }
    }
}

/// The set of drop effects the drag source permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectAllowed {
    /// Nothing.
    None,
    /// Copy only.
    Copy,
    /// Move only.
    #[default]
    Move,
    /// Link only.
    Link,
    /// Copy or move.
    CopyMove,
    /// Copy or link.
    CopyLink,
    /// Link or move.
    LinkMove,
    /// Any effect.
    All,
}

impl EffectAllowed {
    /// Whether `effect` is permitted.
    #[must_use]
    pub const fn permits(self, effect: DropEffect) -> bool {
        match effect {
            DropEffect::None => true,
            DropEffect::Copy => matches!(self, Self::Copy | Self::CopyMove | Self::CopyLink | Self::All),
            DropEffect::Move => matches!(self, Self::Move | Self::CopyMove | Self::LinkMove | Self::All),
            DropEffect::Link => matches!(self, Self::Link | Self::CopyLink | Self::LinkMove | Self::All),
        }
    }

    /// Platform spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
            Self::CopyMove => "copyMove",
            Self::CopyLink => "copyLink",
            Self::LinkMove => "linkMove",
            Self::All => "all",
        }
    }
}

/// Key/value metadata attached to an in-flight drag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragTransfer {
    entries: BTreeMap<String, String>,
    /// Effect shown to the user while hovering.
    pub drop_effect: DropEffect,
    /// Effects the source allows.
    pub effect_allowed: EffectAllowed,
}

impl DragTransfer {
    /// An empty transfer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfer for a draggable picked up at `origin`.
    #[must_use]
    pub fn for_payload(drag_id: &str, origin: &Location, types: &[DraggableType]) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(DRAGGABLE_ID_KEY, drag_id);
        transfer.set_data(FROM_DROPPABLE_KEY, &origin.droppable_id);
        transfer.set_data(FROM_INDEX_KEY, origin.index.to_string());
        for tag in types {
            transfer.set_data(type_key(&tag.key), tag.value.as_deref().unwrap_or("true"));
        }
        transfer
    }

    /// Set the effects (builder form).
    #[must_use]
    pub fn with_effects(mut self, drop_effect: DropEffect, effect_allowed: EffectAllowed) -> Self {
        self.drop_effect = drop_effect;
        self.effect_allowed = effect_allowed;
        self
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All keys, in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Tag keys advertised by the per-tag entries.
    #[must_use]
    pub fn advertised_types(&self) -> TypeSet {
        self.types()
            .filter_map(|key| key.strip_prefix(TYPE_KEY_PREFIX))
            .collect()
    }

    /// The payload id, if written.
    #[must_use]
    pub fn payload_id(&self) -> Option<&str> {
        self.get_data(DRAGGABLE_ID_KEY)
    }

    /// The origin location. `None` if either half is missing or the index
    /// does not parse.
    #[must_use]
    pub fn origin(&self) -> Option<Location> {
        let droppable_id = self.get_data(FROM_DROPPABLE_KEY)?;
        let index = self.get_data(FROM_INDEX_KEY)?.parse().ok()?;
        Some(Location::new(droppable_id, index))
    }

    /// Drop every entry and restore default effects.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
