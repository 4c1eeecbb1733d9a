use std::fmt;

use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drawable::{Drawable, DrawableId, Primitive, QueryMode};
use crate::error::EditorResult;
use crate::geometry::distance_to_rect;
use crate::style::StyleUpdate;
use crate::surface::{RasterSurface, Snapshot};

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raster surface of the stack plus the drawables painted onto it.
///
/// The visible pixels are always `base` with every drawable rasterized on top
/// in insertion order. `base` holds pixels that no drawable accounts for:
/// restored history snapshots and opened images.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer takes part in compositing
    pub visible: bool,
    drawables: Vec<Drawable>,
    base: RasterSurface,
    surface: RasterSurface,
}

impl Layer {
    /// An empty, transparent, visible layer.
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        let base = RasterSurface::new(width, height);
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            drawables: Vec::new(),
            surface: base.clone(),
            base,
        }
    }

    /// A layer whose base pixels are `image`.
    pub fn from_image(name: &str, image: RgbaImage) -> Self {
        let base = RasterSurface::from_image(image);
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            drawables: Vec::new(),
            surface: base.clone(),
            base,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Drawables in paint order, back to front.
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn drawable(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.iter().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.drawable(id).is_some()
    }

    /// The current visible pixels of this layer.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty() && self.base.image().pixels().all(|p| p.0[3] == 0)
    }

    /// Place a drawable on top of the layer and return its handle.
    pub fn add_drawable(&mut self, drawable: Drawable) -> DrawableId {
        let id = drawable.id();
        // Painting on top only needs the new drawable rasterized
        drawable.rasterize(&mut self.surface);
        self.drawables.push(drawable);
        id
    }

    pub fn remove_drawable(&mut self, id: DrawableId) -> Option<Drawable> {
        let index = self.drawables.iter().position(|d| d.id() == id)?;
        let removed = self.drawables.remove(index);
        self.render();
        Some(removed)
    }

    /// Remove every drawable matched by `region`. Returns the removed handles.
    pub fn remove_matching(&mut self, region: Rect, mode: QueryMode) -> Vec<DrawableId> {
        let mut removed = Vec::new();
        self.drawables.retain(|d| {
            if d.matches(region, mode) {
                removed.push(d.id());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            self.render();
        }
        removed
    }

    /// Handles of the drawables matched by `region`, in paint order.
    pub fn query(&self, region: Rect, mode: QueryMode) -> Vec<DrawableId> {
        self.drawables
            .iter()
            .filter(|d| d.matches(region, mode))
            .map(|d| d.id())
            .collect()
    }

    /// The drawable closest to `point`. Ties go to the top-most one.
    pub fn nearest(&self, point: Pos2) -> Option<DrawableId> {
        let mut best: Option<(f32, DrawableId)> = None;
        // Walk front to back so the top-most drawable wins ties
        for drawable in self.drawables.iter().rev() {
            let distance = distance_to_rect(point, drawable.bounds());
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, drawable.id()));
            }
        }
        best.map(|(_, id)| id)
    }

    pub fn translate_drawable(&mut self, id: DrawableId, delta: Vec2) -> bool {
        let Some(drawable) = self.drawables.iter_mut().find(|d| d.id() == id) else {
            return false;
        };
        drawable.translate(delta);
        self.render();
        true
    }

    /// Apply a partial style to the listed drawables. Returns how many changed.
    pub fn set_style(&mut self, ids: &[DrawableId], update: &StyleUpdate) -> usize {
        let mut changed = 0;
        for drawable in self.drawables.iter_mut().filter(|d| ids.contains(&d.id())) {
            drawable.apply_style(update);
            changed += 1;
        }
        if changed > 0 {
            self.render();
        }
        changed
    }

    /// Apply a partial style to every drawable of the layer.
    pub fn set_style_all(&mut self, update: &StyleUpdate) -> usize {
        for drawable in &mut self.drawables {
            drawable.apply_style(update);
        }
        if !self.drawables.is_empty() {
            self.render();
        }
        self.drawables.len()
    }

    pub fn capture(&self) -> EditorResult<Snapshot> {
        self.surface.capture()
    }

    /// Replace the layer's pixels with the snapshot. Drawables are dropped:
    /// after a restore the pixels are no longer backed by vector data.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.drawables.clear();
        self.base.restore(snapshot);
        self.surface = self.base.clone();
    }

    /// Drop every drawable and reset the pixels to transparent.
    pub fn clear(&mut self) {
        self.drawables.clear();
        self.base.clear();
        self.surface = self.base.clone();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.base.resize(width, height);
        self.surface.resize(width, height);
        self.render();
    }

    /// Rebuild the visible pixels from the base and the drawables.
    fn render(&mut self) {
        self.surface = self.base.clone();
        for drawable in &self.drawables {
            drawable.rasterize(&mut self.surface);
        }
    }
}
