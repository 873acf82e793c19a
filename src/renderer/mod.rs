//! Render passes.
//!
//! The only geometry pass is [`sprite_pass::SpritePass`]; the helpers in
//! `pipeline_util` keep target and depth state in one place so offscreen
//! and surface rendering agree.

pub(crate) mod pipeline_util;
pub mod sprite_pass;
