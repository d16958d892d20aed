//! Draw-cache invalidation gateway.
//!
//! The renderer owns the batch cache of a groom. The core only forwards two
//! signals to it, through hooks injected into the asset: "this groom changed
//! (for this reason)" and "release your cache". Both are dropped silently when
//! no cache is attached.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GroomError;
use crate::groom::Groom;

/// Why a draw cache has to be refreshed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirtyMode {
    /// Geometry changed; rebuild everything.
    All,
    /// Only selection state changed.
    Select,
}

impl DirtyMode {
    /// Numeric reason code as exchanged with the renderer.
    pub fn code(self) -> i32 {
        match self {
            DirtyMode::All => 0,
            DirtyMode::Select => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, GroomError> {
        match code {
            0 => Ok(DirtyMode::All),
            1 => Ok(DirtyMode::Select),
            _ => Err(GroomError::UnknownDirtyMode { code }),
        }
    }
}

impl TryFrom<i32> for DirtyMode {
    type Error = GroomError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Callbacks implemented by the draw-cache owner.
pub trait DrawCacheHooks: Send + Sync {
    fn on_dirty(&self, groom: &Groom, mode: DirtyMode);
    fn on_free_requested(&self, groom: &Groom);
}

/// Per-asset handle: the injected hooks plus whether a cache is attached.
#[derive(Clone, Default)]
pub(crate) struct DrawCacheSlot {
    hooks: Option<Arc<dyn DrawCacheHooks>>,
    attached: bool,
}

impl DrawCacheSlot {
    pub(crate) fn new(hooks: Option<Arc<dyn DrawCacheHooks>>) -> Self {
        Self {
            hooks,
            attached: false,
        }
    }

    pub(crate) fn set_hooks(&mut self, hooks: Arc<dyn DrawCacheHooks>) {
        self.hooks = Some(hooks);
    }

    pub(crate) fn hooks(&self) -> Option<&Arc<dyn DrawCacheHooks>> {
        self.hooks.as_ref()
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.attached
    }

    /// Hooks to call, if a cache is attached.
    pub(crate) fn active_hooks(&self) -> Option<&Arc<dyn DrawCacheHooks>> {
        if self.attached {
            self.hooks.as_ref()
        } else {
            None
        }
    }
}

impl fmt::Debug for DrawCacheSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCacheSlot")
            .field("hooks", &self.hooks.is_some())
            .field("attached", &self.attached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_mode_codes_round_trip() {
        for mode in [DirtyMode::All, DirtyMode::Select] {
            assert_eq!(DirtyMode::from_code(mode.code()), Ok(mode));
        }
        assert_eq!(
            DirtyMode::try_from(7),
            Err(GroomError::UnknownDirtyMode { code: 7 })
        );
    }

    #[test]
    fn detached_slot_has_no_active_hooks() {
        struct Nop;
        impl DrawCacheHooks for Nop {
            fn on_dirty(&self, _: &Groom, _: DirtyMode) {}
            fn on_free_requested(&self, _: &Groom) {}
        }
        let mut slot = DrawCacheSlot::new(Some(Arc::new(Nop)));
        assert!(slot.active_hooks().is_none());
        slot.set_attached(true);
        assert!(slot.active_hooks().is_some());
    }
}
