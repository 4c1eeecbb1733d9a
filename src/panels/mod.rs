mod central_panel;
mod layers_panel;
mod menu_bar;

pub use central_panel::central_panel;
pub use layers_panel::layers_panel;
pub use menu_bar::{menu_bar, status_bar};
