/// ASCII rasterizer for shaded fan frames
use crate::camera::Camera;
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fan3d_core::{MeshGroup, RenderableFrame, Rgba};
use nalgebra::Matrix4;
use std::io::Write;

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Depth-buffered terminal rasterizer.
///
/// Consumes the core's shaded face lists as-is: glyph and color come from
/// the per-face RGBA the lighting engine produced, no shading happens here.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    pub fn render_frame(
        &mut self,
        frame: &RenderableFrame,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        for group in &frame.groups {
            self.render_group(group, model_matrix, camera);
        }
    }

    fn render_group(&mut self, group: &MeshGroup, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for (face, color) in group.mesh.faces.iter().zip(&group.colors) {
            // Project the quad's corners; skip the face if any corner clips
            let mut screen = [(0.0f32, 0.0f32, 0.0f32); 4];
            let mut visible = true;
            for (corner, &index) in screen.iter_mut().zip(face.0.iter()) {
                match camera.project_to_screen(
                    &group.mesh.vertices[index],
                    model_matrix,
                    self.width as u32,
                    self.height as u32,
                ) {
                    Some(coords) => *corner = coords,
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if !visible {
                continue;
            }

            let (character, cell_color) = cell_style(color);

            // Split the quad into two triangles; faces encoding a
            // triangle repeat their last index and the second half
            // collapses to zero area.
            self.rasterize_triangle(&[screen[0], screen[1], screen[2]], character, cell_color);
            if face.0[2] != face.0[3] {
                self.rasterize_triangle(&[screen[0], screen[2], screen[3]], character, cell_color);
            }
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a shaded face color to a glyph from the luminosity ramp and a
/// terminal color. Translucent faces (the cage) pick dimmer glyphs.
fn cell_style(color: &Rgba) -> (char, Color) {
    let luminance = (0.299 * color.r + 0.587 * color.g + 0.114 * color.b) * color.a;
    let index = ((luminance * (LUMINOSITY_RAMP.len() - 1) as f32) as usize)
        .min(LUMINOSITY_RAMP.len() - 1);
    let cell_color = Color::Rgb {
        r: (color.r * 255.0) as u8,
        g: (color.g * 255.0) as u8,
        b: (color.b * 255.0) as u8,
    };
    (LUMINOSITY_RAMP[index], cell_color)
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
