use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in canvas coordinates (origin at the canvas top-left)
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

impl InputLocation {
    /// A location inside the canvas, for callers that already work in
    /// canvas coordinates.
    pub fn canvas(position: Pos2) -> Self {
        Self {
            position,
            is_in_canvas: true,
        }
    }
}

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn primary_down(position: Pos2) -> Self {
        InputEvent::PointerDown {
            location: InputLocation::canvas(position),
            button: PointerButton::Primary,
        }
    }

    pub fn primary_up(position: Pos2) -> Self {
        InputEvent::PointerUp {
            location: InputLocation::canvas(position),
            button: PointerButton::Primary,
        }
    }

    /// A move with the primary button held.
    pub fn primary_drag(position: Pos2) -> Self {
        InputEvent::PointerMove {
            location: InputLocation::canvas(position),
            held_buttons: vec![PointerButton::Primary],
        }
    }
}

const BUTTONS: [PointerButton; 3] = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle];

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Screen rectangle the canvas image is painted into
    canvas_rect: Rect,
    /// Whether the canvas widget is hovered, i.e. not covered by a menu or window
    canvas_hovered: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: Rect::NOTHING,
            canvas_hovered: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect, hovered: bool) {
        self.canvas_rect = rect;
        self.canvas_hovered = hovered;
    }

    /// Creates an InputLocation from a screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: Pos2::ZERO + (pos - self.canvas_rect.min),
            is_in_canvas: self.canvas_hovered && self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = BUTTONS
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }
            }
            self.last_pointer_pos = hover;

            // A release may happen outside the window, so fall back to the
            // last position we saw
            let release_pos = hover.or(input.pointer.interact_pos());
            for button in BUTTONS {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = hover {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    if let Some(pos) = release_pos {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_locations_are_relative_to_canvas() {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 250.0)), true);

        let inside = handler.make_location(pos2(110.0, 60.0));
        assert_eq!(inside.position, pos2(10.0, 10.0));
        assert!(inside.is_in_canvas);

        let outside = handler.make_location(pos2(10.0, 10.0));
        assert!(!outside.is_in_canvas);
    }

    #[test]
    fn test_no_canvas_before_first_layout() {
        let handler = InputHandler::default();
        assert!(!handler.make_location(pos2(0.0, 0.0)).is_in_canvas);
        assert!(!handler.make_location(pos2(10.0, 10.0)).is_in_canvas);
    }

    #[test]
    fn test_covered_canvas_is_not_in_canvas() {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)), false);
        assert!(!handler.make_location(pos2(10.0, 10.0)).is_in_canvas);
    }
}
