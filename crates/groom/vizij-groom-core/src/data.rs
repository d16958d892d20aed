//! Groom data model: bundles, their sections and section-loop vertices.
//!
//! A bundle owns every sequence it refers to. Cloning a bundle deep-copies
//! sections, loop vertices and the curve cache, so a duplicate can be resized
//! or dropped independently of its source.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::GroomError;
use crate::ids::BundleId;
use crate::math::{Mat3, Vec3, MAT3_IDENTITY};

fn identity_frame() -> Mat3 {
    MAT3_IDENTITY
}

/// Vertex of the closed outline of a section, in section-plane coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionVertex {
    #[serde(default)]
    pub selected: bool,
    pub co: [f32; 2],
}

impl SectionVertex {
    pub fn new(co: [f32; 2]) -> Self {
        Self {
            selected: false,
            co,
        }
    }
}

/// Cross-section of a bundle at one point along its spine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub selected: bool,
    pub center: Vec3,
    /// Local coordinate frame. Overwritten by curve cache evaluation.
    #[serde(default = "identity_frame")]
    pub frame: Mat3,
}

impl Section {
    pub fn new(center: Vec3) -> Self {
        Self {
            selected: false,
            center,
            frame: MAT3_IDENTITY,
        }
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new([0.0; 3])
    }
}

/// One interpolated step along a bundle curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub co: Vec3,
    pub frame: Mat3,
}

/// Where a bundle's curve cache stands relative to its sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// No cache buffer.
    Uncached,
    /// Cache matches the sections it was built from.
    Cached,
    /// Sections were edited after the last rebuild.
    Stale,
}

/// Number of curve cache samples for `total_sections` sections.
#[inline]
pub fn cache_len(total_sections: usize, curve_resolution: u32) -> usize {
    if total_sections == 0 {
        0
    } else {
        (total_sections - 1) * curve_resolution as usize + 1
    }
}

/// Bundle of strands following one guide curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: BundleId,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    /// Vertices per section loop.
    #[serde(default)]
    num_loop_verts: usize,
    #[serde(default)]
    pub(crate) sections: Vec<Section>,
    /// Loop vertices of all sections, `num_loop_verts` per section in section order.
    #[serde(default)]
    verts: Vec<SectionVertex>,
    #[serde(skip)]
    pub(crate) curve_cache: Vec<CurveSample>,
    #[serde(skip)]
    pub(crate) cache_stale: bool,
}

impl Bundle {
    pub fn new(id: BundleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selected: false,
            num_loop_verts: 0,
            sections: Vec::new(),
            verts: Vec::new(),
            curve_cache: Vec::new(),
            cache_stale: false,
        }
    }

    /// Build a bundle from section centers, without loop vertices.
    pub fn from_centers(id: BundleId, name: impl Into<String>, centers: &[Vec3]) -> Self {
        let mut bundle = Self::new(id, name);
        bundle.sections = centers.iter().copied().map(Section::new).collect();
        bundle
    }

    #[inline]
    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn total_vertices(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn num_loop_verts(&self) -> usize {
        self.num_loop_verts
    }

    #[inline]
    pub fn total_cache_samples(&self) -> usize {
        self.curve_cache.len()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable access to the sections. Invalidates the curve cache.
    pub fn sections_mut(&mut self) -> &mut [Section] {
        self.mark_stale();
        &mut self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Append a section; its loop is copied from the previous last section.
    pub fn push_section(&mut self, center: Vec3) -> usize {
        let index = self.sections.len();
        let template = index.checked_sub(1);
        self.insert_loop(index, template);
        self.sections.push(Section::new(center));
        self.mark_stale();
        index
    }

    /// Insert a section before `index` (or at the end when `index == len`).
    pub fn insert_section(&mut self, index: usize, section: Section) -> Result<()> {
        let len = self.sections.len();
        if index > len {
            return Err(GroomError::SectionOutOfRange { index, len });
        }
        let template = if index < len {
            Some(index)
        } else {
            index.checked_sub(1)
        };
        self.insert_loop(index, template);
        self.sections.insert(index, section);
        self.mark_stale();
        Ok(())
    }

    /// Remove a section together with its loop vertices.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        let len = self.sections.len();
        if index >= len {
            return Err(GroomError::SectionOutOfRange { index, len });
        }
        let n = self.num_loop_verts;
        let end = ((index + 1) * n).min(self.verts.len());
        let start = (index * n).min(end);
        self.verts.drain(start..end);
        self.mark_stale();
        Ok(self.sections.remove(index))
    }

    fn insert_loop(&mut self, index: usize, template: Option<usize>) {
        let n = self.num_loop_verts;
        if n == 0 {
            return;
        }
        let template_loop = template.and_then(|t| self.verts.get(t * n..(t + 1) * n));
        let new_loop: Vec<SectionVertex> = match template_loop {
            Some(src) => src.iter().map(|v| SectionVertex::new(v.co)).collect(),
            None => vec![SectionVertex::default(); n],
        };
        let at = (index * n).min(self.verts.len());
        self.verts.splice(at..at, new_loop);
    }

    pub fn loop_verts(&self) -> &[SectionVertex] {
        &self.verts
    }

    pub fn loop_verts_mut(&mut self) -> &mut [SectionVertex] {
        &mut self.verts
    }

    /// Loop vertices belonging to one section.
    pub fn section_loop(&self, index: usize) -> Option<&[SectionVertex]> {
        if index >= self.sections.len() {
            return None;
        }
        let n = self.num_loop_verts;
        self.verts.get(index * n..(index + 1) * n)
    }

    /// Replace all loop vertices; `verts` holds `num_loop_verts` entries per section.
    pub fn set_section_loops(
        &mut self,
        num_loop_verts: usize,
        verts: Vec<SectionVertex>,
    ) -> Result<()> {
        let expected = num_loop_verts * self.sections.len();
        if verts.len() != expected {
            return Err(GroomError::LoopVertexMismatch {
                expected,
                actual: verts.len(),
            });
        }
        self.num_loop_verts = num_loop_verts;
        self.verts = verts;
        Ok(())
    }

    /// Check that the loop vertex buffer covers every section.
    pub fn validate_basic(&self) -> Result<()> {
        let expected = self.num_loop_verts * self.sections.len();
        if self.verts.len() != expected {
            return Err(GroomError::LoopVertexMismatch {
                expected,
                actual: self.verts.len(),
            });
        }
        Ok(())
    }

    pub fn curve_cache(&self) -> &[CurveSample] {
        &self.curve_cache
    }

    pub fn cache_state(&self) -> CacheState {
        if self.curve_cache.is_empty() {
            CacheState::Uncached
        } else if self.cache_stale {
            CacheState::Stale
        } else {
            CacheState::Cached
        }
    }

    /// Flag the curve cache as out of date. No effect on an uncached bundle.
    pub fn mark_stale(&mut self) {
        if !self.curve_cache.is_empty() {
            self.cache_stale = true;
        }
    }

    /// Verify the cache length against the section count.
    pub fn check_curve_cache(&self, curve_resolution: u32) -> Result<()> {
        let expected = cache_len(self.sections.len(), curve_resolution);
        let actual = self.curve_cache.len();
        if expected != actual {
            return Err(GroomError::StructuralInconsistency {
                bundle: self.id,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Set the selection flag of the bundle, its sections and loop vertices.
    pub fn select_all(&mut self, select: bool) {
        self.selected = select;
        for section in &mut self.sections {
            section.selected = select;
        }
        for vert in &mut self.verts {
            vert.selected = select;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_loop() -> Vec<SectionVertex> {
        [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]
            .into_iter()
            .map(SectionVertex::new)
            .collect()
    }

    #[test]
    fn cache_len_formula() {
        assert_eq!(cache_len(0, 12), 0);
        assert_eq!(cache_len(1, 12), 1);
        assert_eq!(cache_len(2, 1), 2);
        assert_eq!(cache_len(4, 2), 7);
    }

    #[test]
    fn push_section_copies_previous_loop() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3]]);
        b.set_section_loops(4, square_loop()).unwrap();
        b.push_section([0.0, 0.0, 1.0]);
        assert_eq!(b.total_sections(), 2);
        assert_eq!(b.total_vertices(), 8);
        assert_eq!(b.section_loop(1), b.section_loop(0));
        assert!(b.validate_basic().is_ok());
    }

    #[test]
    fn remove_section_drops_its_loop() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3], [1.0, 0.0, 0.0]]);
        let mut verts = square_loop();
        verts.extend(
            square_loop()
                .into_iter()
                .map(|v| SectionVertex::new([v.co[0] * 2.0, v.co[1]])),
        );
        b.set_section_loops(4, verts).unwrap();

        let removed = b.remove_section(0).unwrap();
        assert_eq!(removed.center, [0.0; 3]);
        assert_eq!(b.total_vertices(), 4);
        assert_eq!(b.section_loop(0).unwrap()[1].co, [2.0, -1.0]);
        assert_eq!(
            b.remove_section(3),
            Err(GroomError::SectionOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn insert_section_validates_index() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3]]);
        assert!(b.insert_section(0, Section::new([1.0, 0.0, 0.0])).is_ok());
        assert_eq!(b.sections()[0].center, [1.0, 0.0, 0.0]);
        assert!(matches!(
            b.insert_section(5, Section::default()),
            Err(GroomError::SectionOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn loop_vertex_count_must_cover_sections() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3], [1.0, 0.0, 0.0]]);
        assert_eq!(
            b.set_section_loops(4, square_loop()),
            Err(GroomError::LoopVertexMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn clone_is_independent() {
        let mut a = Bundle::from_centers(BundleId(0), "a", &[[0.0; 3], [1.0, 0.0, 0.0]]);
        a.curve_cache = vec![CurveSample::default(); 3];
        let mut b = a.clone();
        b.sections_mut()[0].center = [5.0, 5.0, 5.0];
        b.push_section([2.0, 0.0, 0.0]);
        b.curve_cache.clear();

        assert_eq!(a.sections()[0].center, [0.0; 3]);
        assert_eq!(a.total_sections(), 2);
        assert_eq!(a.total_cache_samples(), 3);
    }

    #[test]
    fn select_all_reaches_sections_and_verts() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3]]);
        b.set_section_loops(4, square_loop()).unwrap();
        b.select_all(true);
        assert!(b.selected);
        assert!(b.sections().iter().all(|s| s.selected));
        assert!(b.loop_verts().iter().all(|v| v.selected));
    }

    #[test]
    fn sections_mut_marks_cached_bundle_stale() {
        let mut b = Bundle::from_centers(BundleId(0), "b", &[[0.0; 3]]);
        assert_eq!(b.cache_state(), CacheState::Uncached);
        b.sections_mut()[0].center = [1.0; 3];
        assert_eq!(b.cache_state(), CacheState::Uncached);

        b.curve_cache = vec![CurveSample::default()];
        assert_eq!(b.cache_state(), CacheState::Cached);
        b.sections_mut()[0].center = [2.0; 3];
        assert_eq!(b.cache_state(), CacheState::Stale);
    }
}
