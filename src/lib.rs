// Library exports for linktext

pub mod config;
pub mod draw_context;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod interaction;
pub mod layout;
pub mod link_label;
pub mod links;
pub mod markdown;
pub mod styled_text;
pub mod svg;

pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use link_label::LinkLabel;
pub use styled_text::{Attribute, LinkTarget, StyledText};
