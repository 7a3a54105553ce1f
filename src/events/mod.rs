mod pointer;
mod ui;

pub use pointer::{wire_input_handlers, InputWiring};
pub use ui::{wire_ui_controls, UiWiring};
