use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec3};
use gravwell_core::{DrawableId, Material};

/// Latitude/longitude resolution of generated spheres
const SPHERE_STEPS: u32 = 32;

/// Geometry the renderer should build for a drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
}

/// Everything needed to create a drawable
#[derive(Debug, Clone)]
pub struct DrawableDesc {
    pub shape: Shape,
    pub translation: Vec3,
    pub material: Material,
}

/// Renderer-side object table. Bodies only ever hold a `DrawableId`;
/// transforms and materials live here.
///
/// Setters on an unknown id are ignored.
pub trait DrawableStore {
    fn create(&mut self, desc: DrawableDesc) -> DrawableId;
    /// Returns false if the id was unknown
    fn remove(&mut self, id: DrawableId) -> bool;
    fn translation(&self, id: DrawableId) -> Option<Vec3>;
    fn set_translation(&mut self, id: DrawableId, translation: Vec3);
    fn rotate(&mut self, id: DrawableId, axis: Vec3, angle: f32);
    fn material(&self, id: DrawableId) -> Option<&Material>;
    fn set_material(&mut self, id: DrawableId, material: Material);
    /// Flat `[x, y, z, x, y, z, ...]` local-space vertex positions
    fn vertices(&self, id: DrawableId) -> &[f32];
}

/// One entry of a `DrawableTable`
#[derive(Debug, Clone)]
pub struct Drawable {
    pub shape: Shape,
    pub translation: Vec3,
    pub rotation: Quat,
    pub material: Material,
    pub vertices: Vec<f32>,
}

/// In-memory `DrawableStore`. Ids are never reused.
#[derive(Debug, Default)]
pub struct DrawableTable {
    entries: HashMap<DrawableId, Drawable>,
    next_id: u64,
}

impl DrawableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (scene reset); ids keep counting up
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DrawableStore for DrawableTable {
    fn create(&mut self, desc: DrawableDesc) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        let vertices = match desc.shape {
            Shape::Sphere { radius } => sphere_vertices(radius, SPHERE_STEPS),
        };
        self.entries.insert(
            id,
            Drawable {
                shape: desc.shape,
                translation: desc.translation,
                rotation: Quat::IDENTITY,
                material: desc.material,
                vertices,
            },
        );
        id
    }

    fn remove(&mut self, id: DrawableId) -> bool {
        self.entries.remove(&id).is_some()
    }

    fn translation(&self, id: DrawableId) -> Option<Vec3> {
        self.entries.get(&id).map(|d| d.translation)
    }

    fn set_translation(&mut self, id: DrawableId, translation: Vec3) {
        if let Some(d) = self.entries.get_mut(&id) {
            d.translation = translation;
        }
    }

    fn rotate(&mut self, id: DrawableId, axis: Vec3, angle: f32) {
        if let Some(d) = self.entries.get_mut(&id) {
            let axis = axis.normalize_or_zero();
            if axis != Vec3::ZERO {
                d.rotation = (Quat::from_axis_angle(axis, angle) * d.rotation).normalize();
            }
        }
    }

    fn material(&self, id: DrawableId) -> Option<&Material> {
        self.entries.get(&id).map(|d| &d.material)
    }

    fn set_material(&mut self, id: DrawableId, material: Material) {
        if let Some(d) = self.entries.get_mut(&id) {
            d.material = material;
        }
    }

    fn vertices(&self, id: DrawableId) -> &[f32] {
        match self.entries.get(&id) {
            Some(d) => &d.vertices,
            None => &[],
        }
    }
}

/// UV sphere centered at the origin: bottom pole, `steps / 2 - 1` latitude
/// rings of `steps` vertices, top pole.
pub fn sphere_vertices(radius: f32, steps: u32) -> Vec<f32> {
    let steps = steps.max(4);
    let bands = steps / 2;
    let mut vertices = vec![0.0, -radius, 0.0];
    for band in 1..bands {
        let latitude = -FRAC_PI_2 + PI * band as f32 / bands as f32;
        let ring_radius = latitude.cos() * radius;
        let y = latitude.sin() * radius;
        for step in 0..steps {
            let longitude = TAU * step as f32 / steps as f32;
            vertices.extend_from_slice(&[
                -ring_radius * longitude.sin(),
                y,
                ring_radius * longitude.cos(),
            ]);
        }
    }
    vertices.extend_from_slice(&[0.0, radius, 0.0]);
    vertices
}
