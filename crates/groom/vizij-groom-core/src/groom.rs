//! Groom asset: settings, bundles, optional edit session and cached bounds.
//!
//! Which bundle list is live is carried by [`EditState`]: outside an edit
//! session it is the base list, during one it is the overlay. All cache and
//! geometry operations act on the live list only.

use std::collections::HashSet;
use std::sync::Arc;

use crate::Result;
use crate::bounds::{minmax, BoundBox, BoundingVolume};
use crate::cache::{clear_bundles, evaluate_bundles};
use crate::config::{validate_curve_resolution, Config};
use crate::data::Bundle;
use crate::draw_cache::{DirtyMode, DrawCacheHooks, DrawCacheSlot};
use crate::error::GroomError;
use crate::ids::{BundleId, IdAllocator};
use crate::math::Mat3;

/// Bundles of an in-progress edit session.
#[derive(Clone, Debug, Default)]
pub struct EditGroom {
    pub bundles: Vec<Bundle>,
}

/// Edit mode of an asset.
#[derive(Clone, Debug, Default)]
pub enum EditState {
    /// The base bundle list is live.
    #[default]
    Base,
    /// The overlay is live; the base list is stale until the session ends.
    Editing(EditGroom),
}

/// Groom curves for creating hair styles.
#[derive(Debug)]
pub struct Groom {
    name: String,
    curve_resolution: u32,
    base_frame: Mat3,
    bound_box: Option<BoundBox>,
    bundles: Vec<Bundle>,
    edit: EditState,
    ids: IdAllocator,
    draw_cache: DrawCacheSlot,
}

impl Groom {
    /// Create an empty groom with the given settings.
    pub fn new(name: impl Into<String>, cfg: Config) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            name: name.into(),
            curve_resolution: cfg.curve_resolution,
            base_frame: cfg.base_frame,
            bound_box: None,
            bundles: Vec::new(),
            edit: EditState::Base,
            ids: IdAllocator::new(),
            draw_cache: DrawCacheSlot::default(),
        })
    }

    /// Create a groom owning `bundles` as its base list.
    pub fn from_bundles(
        name: impl Into<String>,
        cfg: Config,
        bundles: Vec<Bundle>,
    ) -> Result<Self> {
        let mut groom = Self::new(name, cfg)?;
        let mut seen = HashSet::with_capacity(bundles.len());
        for bundle in &bundles {
            bundle.validate_basic()?;
            if !seen.insert(bundle.id) {
                return Err(GroomError::DuplicateBundle { id: bundle.id });
            }
        }
        groom.ids = IdAllocator::after(bundles.iter().map(|b| b.id));
        groom.bundles = bundles;
        Ok(groom)
    }

    /// Inject the draw-cache owner's hooks.
    pub fn with_draw_cache_hooks(mut self, hooks: Arc<dyn DrawCacheHooks>) -> Self {
        self.draw_cache.set_hooks(hooks);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curve_resolution(&self) -> u32 {
        self.curve_resolution
    }

    /// Change the number of curve steps per segment. Live caches become stale.
    pub fn set_curve_resolution(&mut self, value: u32) -> Result<()> {
        validate_curve_resolution(value)?;
        if value != self.curve_resolution {
            self.curve_resolution = value;
            self.live_bundles_mut().iter_mut().for_each(Bundle::mark_stale);
        }
        Ok(())
    }

    pub fn base_frame(&self) -> &Mat3 {
        &self.base_frame
    }

    pub fn set_base_frame(&mut self, frame: Mat3) {
        self.base_frame = frame;
        self.live_bundles_mut().iter_mut().for_each(Bundle::mark_stale);
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing(_))
    }

    /// The live bundle list.
    pub fn bundles(&self) -> &[Bundle] {
        match &self.edit {
            EditState::Base => &self.bundles,
            EditState::Editing(edit) => &edit.bundles,
        }
    }

    pub fn bundles_mut(&mut self) -> &mut [Bundle] {
        self.live_bundles_mut()
    }

    fn live_bundles_mut(&mut self) -> &mut Vec<Bundle> {
        match &mut self.edit {
            EditState::Base => &mut self.bundles,
            EditState::Editing(edit) => &mut edit.bundles,
        }
    }

    /// The base bundle list, regardless of edit state.
    pub fn base_bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles().iter().find(|b| b.id == id)
    }

    pub fn bundle_mut(&mut self, id: BundleId) -> Option<&mut Bundle> {
        self.live_bundles_mut().iter_mut().find(|b| b.id == id)
    }

    /// Append an empty bundle to the live list.
    pub fn add_bundle(&mut self, name: impl Into<String>) -> BundleId {
        let id = self.ids.alloc_bundle();
        self.live_bundles_mut().push(Bundle::new(id, name));
        self.geometry_changed();
        id
    }

    /// Remove a bundle from the live list.
    pub fn remove_bundle(&mut self, id: BundleId) -> Result<Bundle> {
        let bundles = self.live_bundles_mut();
        let index = bundles
            .iter()
            .position(|b| b.id == id)
            .ok_or(GroomError::UnknownBundle { id })?;
        let bundle = bundles.remove(index);
        self.geometry_changed();
        Ok(bundle)
    }

    /// Start an edit session on a deep copy of the base bundles.
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.is_editing() {
            log::warn!("groom '{}': edit session already active", self.name);
            return Err(GroomError::AlreadyEditing);
        }
        self.edit = EditState::Editing(EditGroom {
            bundles: self.bundles.clone(),
        });
        self.geometry_changed();
        Ok(())
    }

    /// End the edit session, making the overlay the new base list.
    pub fn apply_edit(&mut self) -> Result<()> {
        match std::mem::take(&mut self.edit) {
            EditState::Editing(edit) => {
                self.bundles = edit.bundles;
                self.geometry_changed();
                Ok(())
            }
            EditState::Base => {
                log::warn!("groom '{}': no edit session to apply", self.name);
                Err(GroomError::NotEditing)
            }
        }
    }

    /// End the edit session, discarding the overlay.
    pub fn cancel_edit(&mut self) -> Result<()> {
        match std::mem::take(&mut self.edit) {
            EditState::Editing(_) => {
                self.geometry_changed();
                Ok(())
            }
            EditState::Base => {
                log::warn!("groom '{}': no edit session to cancel", self.name);
                Err(GroomError::NotEditing)
            }
        }
    }

    /// Independent copy of the asset. The copy starts outside any edit
    /// session and without an attached draw cache.
    pub fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            curve_resolution: self.curve_resolution,
            base_frame: self.base_frame,
            bound_box: self.bound_box,
            bundles: self.bundles.clone(),
            edit: EditState::Base,
            ids: self.ids.clone(),
            draw_cache: DrawCacheSlot::new(self.draw_cache.hooks().cloned()),
        }
    }

    /* Curve cache */

    /// Rebuild the curve cache of every live bundle.
    pub fn evaluate_curve_cache(&mut self) {
        log::debug!(
            "evaluate curve cache on '{}' ({})",
            self.name,
            if self.is_editing() { "edit" } else { "base" }
        );
        let resolution = self.curve_resolution;
        let base_frame = self.base_frame;
        evaluate_bundles(self.live_bundles_mut(), resolution, &base_frame);
    }

    /// Free the curve cache of every live bundle.
    pub fn clear_curve_cache(&mut self) {
        clear_bundles(self.live_bundles_mut());
    }

    /* Bounds */

    pub fn bound_box(&self) -> Option<&BoundBox> {
        self.bound_box.as_ref()
    }

    pub fn mark_bounds_dirty(&mut self) {
        if let Some(bb) = self.bound_box.as_mut() {
            bb.dirty = true;
        }
    }

    /// Recompute and cache the bounding box.
    ///
    /// Returns the box as center/half-size and whether an extent was found;
    /// `false` means the unit-cube fallback was used.
    pub fn compute_bounding_volume(&mut self) -> (BoundingVolume, bool) {
        let (bb, found) = match minmax(self.bundles()) {
            Some((min, max)) => (BoundBox::from_minmax(min, max), true),
            None => (BoundBox::unit(), false),
        };
        self.bound_box = Some(bb);
        (bb.volume(), found)
    }

    /// Geometry pass: recompute the bounds if missing or dirty.
    pub fn eval_geometry(&mut self) {
        log::debug!("eval geometry on '{}'", self.name);
        if self.bound_box.map_or(true, |bb| bb.dirty) {
            self.compute_bounding_volume();
        }
    }

    /* Draw cache */

    /// Record that the renderer built a batch cache for this groom.
    pub fn attach_draw_cache(&mut self) {
        self.draw_cache.set_attached(true);
    }

    pub fn detach_draw_cache(&mut self) {
        self.draw_cache.set_attached(false);
    }

    pub fn has_draw_cache(&self) -> bool {
        self.draw_cache.is_attached()
    }

    /// Tell the draw cache owner its data is out of date.
    pub fn notify_dirty(&self, mode: DirtyMode) {
        if let Some(hooks) = self.draw_cache.active_hooks() {
            hooks.on_dirty(self, mode);
        }
    }

    /// Ask the draw cache owner to release its cache.
    pub fn request_draw_cache_free(&mut self) {
        if let Some(hooks) = self.draw_cache.active_hooks().cloned() {
            hooks.on_free_requested(self);
            self.draw_cache.set_attached(false);
        }
    }

    fn geometry_changed(&mut self) {
        self.mark_bounds_dirty();
        self.notify_dirty(DirtyMode::All);
    }
}

impl Drop for Groom {
    fn drop(&mut self) {
        self.request_draw_cache_free();
    }
}
