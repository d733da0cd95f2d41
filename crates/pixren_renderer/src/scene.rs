//! Scene container: primitives plus the materials they reference.

use crate::{
    hittable::{closest_hit, HitRecord, Hittable},
    Material, MaterialId, Primitive, RenderError,
};
use pixren_math::{Interval, Ray};

/// Brute-force scene: every ray is tested against every primitive.
///
/// Materials live in an arena owned by the scene and are shared by handle,
/// so any number of primitives can use the same one.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and get the handle primitives use to refer to it.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId::from_index(self.materials.len() - 1)
    }

    /// Look up a material. Handles are validated on insertion, so this only
    /// panics for a handle issued by a different scene.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Append a primitive, returning its index.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> Result<usize, RenderError> {
        let primitive = primitive.into();
        self.check_material(primitive.material())?;
        self.primitives.push(primitive);
        Ok(self.primitives.len() - 1)
    }

    /// Swap the primitive at `index` for a new one, returning the old one.
    ///
    /// Used between frames for animated objects.
    pub fn replace(
        &mut self,
        index: usize,
        primitive: impl Into<Primitive>,
    ) -> Result<Primitive, RenderError> {
        let primitive = primitive.into();
        self.check_material(primitive.material())?;
        let len = self.primitives.len();
        let slot = self
            .primitives
            .get_mut(index)
            .ok_or(RenderError::PrimitiveIndex { index, len })?;
        Ok(std::mem::replace(slot, primitive))
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn check_material(&self, id: MaterialId) -> Result<(), RenderError> {
        if id.index() < self.materials.len() {
            Ok(())
        } else {
            Err(RenderError::UnknownMaterial(id))
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        closest_hit(&self.primitives, ray, ray_t)
    }
}
