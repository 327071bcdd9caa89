//! Reactive page state: active section, scrolling, typewriter, caret, fades.

pub mod blink;
pub mod fade;
pub mod section;
pub mod typewriter;
pub mod viewport;
