use super::components::Sprite;

/// A destination rectangle in canvas pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// A drawing surface. Hosts implement this over whatever backend they render with.
pub trait Canvas {
    /// The drawable area as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Draw `sprite` into `dest`.
    fn draw(&mut self, sprite: &Sprite, dest: Rect);
}
