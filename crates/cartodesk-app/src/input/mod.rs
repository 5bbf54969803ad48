pub mod keyboard;
pub mod pointer;

pub use keyboard::{handle_key, Modifiers};
pub use pointer::{handle_pointer_button, handle_pointer_motion, PointerButton};
