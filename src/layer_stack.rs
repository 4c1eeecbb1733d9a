use egui::Color32;
use image::{Rgba, RgbaImage};

use crate::drawable::{Drawable, DrawableId};
use crate::error::{EditorError, EditorResult};
use crate::history::CanvasSnapshot;
use crate::layer::{Layer, LayerId};
use crate::style::StyleUpdate;
use crate::surface::raster::alpha_over;

/// Ordered layers, bottom (index 0) to top.
///
/// The stack is never empty and exactly one layer is active at any time.
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: usize,
    width: u32,
    height: u32,
    /// Used to name new layers "Layer N"
    created: usize,
}

impl LayerStack {
    /// A stack holding a single empty layer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layers: vec![Layer::new("Layer 1", width, height)],
            active: 0,
            width,
            height,
            created: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Position in z-order, 0 being the bottom.
    pub fn index_of(&self, id: LayerId) -> EditorResult<usize> {
        self.layers
            .iter()
            .position(|l| l.id() == id)
            .ok_or(EditorError::UnknownLayer(id))
    }

    pub fn active(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    pub fn active_id(&self) -> LayerId {
        self.active().id()
    }

    pub fn set_active(&mut self, id: LayerId) -> EditorResult<()> {
        self.active = self.index_of(id)?;
        Ok(())
    }

    /// Append a new empty layer at the top and make it active.
    pub fn add_layer(&mut self) -> LayerId {
        self.created += 1;
        let layer = Layer::new(&format!("Layer {}", self.created), self.width, self.height);
        let id = layer.id();
        self.layers.push(layer);
        self.active = self.layers.len() - 1;
        id
    }

    /// Remove a layer and everything on it. Deleting the only layer fails
    /// with [`EditorError::LastLayerProtected`] and changes nothing.
    pub fn delete_layer(&mut self, id: LayerId) -> EditorResult<Layer> {
        let index = self.index_of(id)?;
        if self.layers.len() == 1 {
            return Err(EditorError::LastLayerProtected);
        }

        let was_active = index == self.active;
        let removed = self.layers.remove(index);
        if was_active {
            self.active = self.layers.len() - 1;
        } else if index < self.active {
            self.active -= 1;
        }
        Ok(removed)
    }

    /// Swap with the layer above. Returns false at the top.
    pub fn move_up(&mut self, id: LayerId) -> EditorResult<bool> {
        let index = self.index_of(id)?;
        if index + 1 >= self.layers.len() {
            return Ok(false);
        }
        self.swap(index, index + 1);
        Ok(true)
    }

    /// Swap with the layer below. Returns false at the bottom.
    pub fn move_down(&mut self, id: LayerId) -> EditorResult<bool> {
        let index = self.index_of(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap(index, index - 1);
        Ok(true)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.layers.swap(a, b);
        // The active marker follows its layer, not its slot
        if self.active == a {
            self.active = b;
        } else if self.active == b {
            self.active = a;
        }
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> EditorResult<()> {
        let layer = self.get_mut(id).ok_or(EditorError::UnknownLayer(id))?;
        layer.visible = visible;
        Ok(())
    }

    /// Add a drawable to a specific layer.
    pub fn add_drawable(&mut self, layer: LayerId, drawable: Drawable) -> EditorResult<DrawableId> {
        let layer = self.get_mut(layer).ok_or(EditorError::UnknownLayer(layer))?;
        Ok(layer.add_drawable(drawable))
    }

    /// Remove a drawable from whichever layer holds it.
    pub fn remove_drawable(&mut self, id: DrawableId) -> Option<Drawable> {
        self.layers.iter_mut().find_map(|layer| layer.remove_drawable(id))
    }

    /// The drawable with this handle and the layer holding it.
    pub fn find_drawable(&self, id: DrawableId) -> Option<(LayerId, &Drawable)> {
        self.layers
            .iter()
            .find_map(|layer| layer.drawable(id).map(|d| (layer.id(), d)))
    }

    /// Apply a partial style to the listed drawables, wherever they live.
    pub fn set_style(&mut self, ids: &[DrawableId], update: &StyleUpdate) -> usize {
        if update.is_empty() {
            return 0;
        }
        self.layers.iter_mut().map(|layer| layer.set_style(ids, update)).sum()
    }

    /// Apply a partial style to every drawable of every layer.
    pub fn set_style_all(&mut self, update: &StyleUpdate) -> usize {
        if update.is_empty() {
            return 0;
        }
        self.layers.iter_mut().map(|layer| layer.set_style_all(update)).sum()
    }

    /// Blend the visible layers bottom to top over `background`.
    pub fn composite(&self, background: Color32) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(
            self.width,
            self.height,
            Rgba(background.to_srgba_unmultiplied()),
        );
        for layer in self.layers.iter().filter(|l| l.visible) {
            alpha_over(&mut image, layer.surface().image());
        }
        image
    }

    /// Capture every layer's pixels.
    pub fn capture_all(&self) -> EditorResult<CanvasSnapshot> {
        let layers = self
            .layers
            .iter()
            .map(|layer| Ok((layer.id(), layer.capture()?)))
            .collect::<EditorResult<Vec<_>>>()?;
        Ok(CanvasSnapshot::new(layers))
    }

    /// Put every layer back to its captured pixels. Layers created after the
    /// capture are cleared; captured layers that were deleted since are skipped.
    pub fn restore_all(&mut self, snapshot: &CanvasSnapshot) {
        for layer in &mut self.layers {
            match snapshot.get(layer.id()) {
                Some(pixels) => layer.restore(pixels),
                None => layer.clear(),
            }
        }
    }

    /// Drop every layer and start over with a single layer holding `image`.
    /// The canvas takes the image's size.
    pub fn replace_with_image(&mut self, image: RgbaImage) -> LayerId {
        self.width = image.width();
        self.height = image.height();
        let layer = Layer::from_image("Background", image);
        let id = layer.id();
        self.layers = vec![layer];
        self.active = 0;
        self.created = 1;
        id
    }

    /// Clear every layer, keeping the layers themselves.
    pub fn clear_all(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        for layer in &mut self.layers {
            layer.resize(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{Primitive, factory};
    use crate::style::Style;
    use egui::pos2;

    #[test]
    fn test_add_layer_goes_on_top_and_becomes_active() {
        let mut stack = LayerStack::new(10, 10);
        let first = stack.active_id();
        let second = stack.add_layer();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.active_id(), second);
        assert_eq!(stack.index_of(first).unwrap(), 0);
        assert_eq!(stack.index_of(second).unwrap(), 1);
        assert_eq!(stack.active().name, "Layer 2");
    }

    #[test]
    fn test_delete_active_falls_back_to_top() {
        let mut stack = LayerStack::new(10, 10);
        let bottom = stack.active_id();
        let middle = stack.add_layer();
        let top = stack.add_layer();

        stack.set_active(middle).unwrap();
        stack.delete_layer(middle).unwrap();
        assert_eq!(stack.active_id(), top);

        stack.delete_layer(top).unwrap();
        assert_eq!(stack.active_id(), bottom);
        assert!(matches!(stack.delete_layer(bottom), Err(EditorError::LastLayerProtected)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_deleting_below_active_keeps_active_layer() {
        let mut stack = LayerStack::new(10, 10);
        let bottom = stack.active_id();
        let top = stack.add_layer();
        stack.delete_layer(bottom).unwrap();
        assert_eq!(stack.active_id(), top);
    }

    #[test]
    fn test_move_is_noop_at_boundaries() {
        let mut stack = LayerStack::new(10, 10);
        let bottom = stack.active_id();
        let top = stack.add_layer();

        assert!(!stack.move_up(top).unwrap());
        assert!(!stack.move_down(bottom).unwrap());

        assert!(stack.move_up(bottom).unwrap());
        assert_eq!(stack.index_of(bottom).unwrap(), 1);
        assert_eq!(stack.index_of(top).unwrap(), 0);
        // The active layer is still the same layer
        assert_eq!(stack.active_id(), top);
    }

    #[test]
    fn test_unknown_layer_is_reported() {
        let mut stack = LayerStack::new(10, 10);
        let other = LayerStack::new(10, 10).active_id();
        assert!(matches!(stack.set_visible(other, false), Err(EditorError::UnknownLayer(_))));
        assert!(matches!(stack.move_up(other), Err(EditorError::UnknownLayer(_))));
    }

    #[test]
    fn test_composite_respects_order_and_visibility() {
        let mut stack = LayerStack::new(10, 10);
        let bottom = stack.active_id();
        stack
            .add_drawable(bottom, factory::create_rectangle(pos2(0.0, 0.0), pos2(9.0, 9.0), Style::solid(Color32::RED, 1)))
            .unwrap();
        let top = stack.add_layer();
        stack
            .add_drawable(top, factory::create_rectangle(pos2(0.0, 0.0), pos2(9.0, 9.0), Style::solid(Color32::BLUE, 1)))
            .unwrap();

        assert_eq!(stack.composite(Color32::WHITE).get_pixel(5, 5).0, [0, 0, 255, 255]);

        stack.set_visible(top, false).unwrap();
        assert_eq!(stack.composite(Color32::WHITE).get_pixel(5, 5).0, [255, 0, 0, 255]);

        stack.set_visible(bottom, false).unwrap();
        assert_eq!(stack.composite(Color32::WHITE).get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_restore_all_clears_layers_missing_from_snapshot() {
        let mut stack = LayerStack::new(10, 10);
        let snapshot = stack.capture_all().unwrap();

        let added = stack.add_layer();
        stack
            .add_drawable(added, factory::create_dot(pos2(5.0, 5.0), 2.0, Style::default()))
            .unwrap();

        stack.restore_all(&snapshot);
        assert!(stack.get(added).unwrap().is_empty());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_set_style_touches_only_listed_drawables() {
        let mut stack = LayerStack::new(40, 40);
        let bottom = stack.active_id();
        let styled_bottom = stack
            .add_drawable(bottom, factory::create_rectangle(pos2(2.0, 2.0), pos2(10.0, 10.0), Style::solid(Color32::RED, 2)))
            .unwrap();
        let untouched = stack
            .add_drawable(bottom, factory::create_line(pos2(20.0, 20.0), pos2(30.0, 30.0), Style::solid(Color32::RED, 2)))
            .unwrap();
        let top = stack.add_layer();
        let styled_top = stack
            .add_drawable(top, factory::create_dot(pos2(30.0, 5.0), 3.0, Style::solid(Color32::RED, 2)))
            .unwrap();

        // An empty update changes nothing
        assert_eq!(stack.set_style(&[styled_bottom], &StyleUpdate::default()), 0);
        assert_eq!(stack.set_style_all(&StyleUpdate::default()), 0);

        let changed = stack.set_style(&[styled_bottom, styled_top], &StyleUpdate::stroke_color(Color32::GREEN));
        assert_eq!(changed, 2);

        for id in [styled_bottom, styled_top] {
            let (_, drawable) = stack.find_drawable(id).unwrap();
            // Fields missing from the update keep their values
            assert_eq!(*drawable.style(), Style::new(Color32::GREEN, Some(Color32::RED), 2));
        }
        let (layer, drawable) = stack.find_drawable(untouched).unwrap();
        assert_eq!(layer, bottom);
        assert_eq!(*drawable.style(), Style::solid(Color32::RED, 2));
    }

    #[test]
    fn test_remove_drawable_from_inactive_layer() {
        let mut stack = LayerStack::new(40, 40);
        let bottom = stack.active_id();
        let id = stack
            .add_drawable(bottom, factory::create_rectangle(pos2(0.0, 0.0), pos2(9.0, 9.0), Style::solid(Color32::BLUE, 1)))
            .unwrap();
        stack.add_layer();
        assert_ne!(stack.active_id(), bottom);

        let removed = stack.remove_drawable(id).unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(removed.kind(), "rectangle");
        assert!(stack.find_drawable(id).is_none());
        assert!(stack.get(bottom).unwrap().is_empty());
        assert_eq!(stack.composite(Color32::WHITE).get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert!(stack.remove_drawable(id).is_none());
    }

    #[test]
    fn test_capture_fails_on_zero_area() {
        let stack = LayerStack::new(0, 0);
        assert!(matches!(stack.capture_all(), Err(EditorError::SurfaceUnavailable { .. })));
    }
}
