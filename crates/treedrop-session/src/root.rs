#![forbid(unsafe_code)]

//! The drag-and-drop root: owns the session while mounted.
//!
//! Helpers used outside a mounted root fail with
//! [`ConfigError::MissingContext`]. Each root gets a process-unique id, and
//! bindings carry it so they cannot be used against a different root.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use treedrop_core::{ConfigError, DraggableType, DropResult, ElementSnapshot};

use crate::config::SessionConfig;
use crate::keyboard::KeyBindingMap;
use crate::registry::{DraggableBinding, DraggableConfig, DroppableBinding, DroppableConfig};
use crate::session::Session;

static NEXT_ROOT_ID: AtomicU64 = AtomicU64::new(1);

/// Renders the placeholder for a picked-up element.
pub type PlaceholderFn<P> = Rc<dyn Fn(&ElementSnapshot, &[DraggableType]) -> P>;

/// Scope for one drag-and-drop area.
pub struct DragDropRoot<P = ()> {
    id: u64,
    config: SessionConfig,
    placeholder: Option<PlaceholderFn<P>>,
    session: Option<Session<P>>,
}

impl<P> fmt::Debug for DragDropRoot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropRoot")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("has_placeholder", &self.placeholder.is_some())
            .field("session", &self.session)
            .finish()
    }
}

impl<P> DragDropRoot<P> {
    /// An unmounted root.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: NEXT_ROOT_ID.fetch_add(1, Ordering::Relaxed),
            config,
            placeholder: None,
            session: None,
        }
    }

    /// Set the placeholder renderer. Takes effect on the next mount.
    #[must_use]
    pub fn with_placeholder(mut self, render: impl Fn(&ElementSnapshot, &[DraggableType]) -> P + 'static) -> Self {
        self.placeholder = Some(Rc::new(render));
        self
    }

    /// Replace the key bindings. Takes effect on the next mount.
    #[must_use]
    pub fn with_key_bindings(mut self, bindings: KeyBindingMap) -> Self {
        self.config.key_bindings = bindings;
        self
    }

    /// Process-unique root id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Configuration used for the next mount.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mount, creating the session. Mounting twice returns the live session.
    ///
    /// Fails with the first violation if the configuration is invalid.
    pub fn mount(&mut self) -> Result<&mut Session<P>, ConfigError> {
        if self.session.is_none() {
            if let Err(errors) = self.config.validate()
                && let Some(first) = errors.into_iter().next()
            {
                return Err(first);
            }
            debug!(root = self.id, "drag root mounted");
        }
        let session = self
            .session
            .get_or_insert_with(|| Session::new(self.id, self.config.clone(), self.placeholder.clone()));
        Ok(session)
    }

    /// Tear down the session. Returns false if the root was not mounted.
    pub fn unmount(&mut self) -> bool {
        let mounted = self.session.take().is_some();
        if mounted {
            debug!(root = self.id, "drag root unmounted");
        }
        mounted
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// The live session.
    pub fn context(&self) -> Result<&Session<P>, ConfigError> {
        self.session
            .as_ref()
            .ok_or(ConfigError::MissingContext { helper: "context" })
    }

    /// The live session, mutably.
    pub fn context_mut(&mut self) -> Result<&mut Session<P>, ConfigError> {
        self.session
            .as_mut()
            .ok_or(ConfigError::MissingContext { helper: "context" })
    }

    /// Register a draggable in the live session.
    pub fn draggable(&mut self, config: DraggableConfig) -> Result<DraggableBinding, ConfigError> {
        self.session
            .as_mut()
            .ok_or(ConfigError::MissingContext { helper: "draggable" })?
            .register_draggable(config)
    }

    /// Register a droppable in the live session.
    pub fn droppable(
        &mut self,
        config: DroppableConfig,
        on_drop: impl FnMut(&DropResult) + 'static,
    ) -> Result<DroppableBinding, ConfigError> {
        self.session
            .as_mut()
            .ok_or(ConfigError::MissingContext { helper: "droppable" })?
            .register_droppable(config, on_drop)
    }
}
