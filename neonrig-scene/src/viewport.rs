//! Container size tracking and the boundary to whatever draws the scene

use crate::error::Result;
use crate::three_d::Scene3D;

/// Size of the host container in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Width over height; a zero height yields 1.0 so the projection stays finite
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Backing-store size in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f64) * self.pixel_ratio).round().max(0.0) as u32;
        (scale(self.width), scale(self.height))
    }
}

/// Something that can present the scene: the WebGL renderer in the browser, a recorder
/// in tests
pub trait RenderSurface {
    /// Resize the output to the container size
    fn set_size(&mut self, viewport: Viewport);

    /// Current output size
    fn size(&self) -> Viewport;

    /// Draw one frame
    fn render(&mut self, scene: &Scene3D) -> Result<()>;
}

/// Propagate a container resize to the camera and the output surface
pub fn handle_resize<S: RenderSurface + ?Sized>(scene: &mut Scene3D, surface: &mut S, viewport: Viewport) {
    if viewport.height == 0 {
        log::debug!("Container collapsed to zero height, keeping aspect {}", scene.camera.aspect_ratio);
    } else {
        scene.camera.set_aspect_ratio(viewport.width as f32 / viewport.height as f32);
    }
    surface.set_size(viewport);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_buffer_scales_with_pixel_ratio() {
        let viewport = Viewport::new(640, 360, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), (1280, 720));
        assert_eq!(Viewport::new(101, 51, 1.5).drawing_buffer_size(), (152, 77));
    }

    #[test]
    fn test_zero_height_aspect_is_finite() {
        assert_eq!(Viewport::new(300, 0, 1.0).aspect_ratio(), 1.0);
    }
}
