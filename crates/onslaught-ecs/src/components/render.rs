use serde::{Deserialize, Serialize};

/// Broad draw category; decides which snapshot bucket a record lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderType {
    Player,
    Enemy,
    Projectile,
    Other,
}

/// Packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xff_ff_ff);
    pub const GREEN: Color = Color(0x00_ff_00);
    pub const RED: Color = Color(0xff_00_00);
    pub const YELLOW: Color = Color(0xff_ff_00);

    /// Split into `(r, g, b)` channels.
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// Draw hints copied into the render snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Render {
    pub render_type: RenderType,
    /// Paint order, ascending.
    pub z_index: i32,
    /// Hidden entities are left out of the snapshot.
    pub visible: bool,
    pub color: Option<Color>,
    pub opacity: Option<f32>,
}

impl Render {
    /// Visible, with no color or opacity override.
    pub fn new(render_type: RenderType, z_index: i32) -> Self {
        Self {
            render_type,
            z_index,
            visible: true,
            color: None,
            opacity: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}
