use bytemuck::{Pod, Zeroable};

/// One output pixel, 8 bits per channel.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Rgb {
        red: 0,
        green: 0,
        blue: 0,
    };
}

/// A dense row-major image, owned uniquely by the renderer while it is
/// being populated and handed to the caller on return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Rgb) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize] = colour;
    }

    /// Rows as disjoint slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// The whole image as one mutable slice. The parallel renderer chunks
    /// this into disjoint rows, one mutable slice per worker, which is
    /// what makes the shared buffer safe without a lock.
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_starts_black() {
        let buffer = PixelBuffer::new(4, 3);
        assert_eq!(buffer.pixels().len(), 12);
        assert!(buffer.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn set_pixel_is_row_major() {
        let mut buffer = PixelBuffer::new(4, 3);
        let colour = Rgb {
            red: 1,
            green: 2,
            blue: 3,
        };
        buffer.set_pixel(2, 1, colour);
        assert_eq!(buffer.pixel(2, 1), colour);
        assert_eq!(buffer.pixels()[1 * 4 + 2], colour);
    }

    #[test]
    fn rows_are_width_sized() {
        let buffer = PixelBuffer::new(5, 2);
        let rows: Vec<_> = buffer.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 5));
    }
}
