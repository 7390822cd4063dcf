//! # TGA Codec
//!
//! Decoder for uncompressed true-color TGA images (type 2, 24 or 32 bpp)
//! and the matching encoder used by the texture generator.
//!
//! ## Header (18 bytes, little-endian)
//!
//! ```text
//! 0   u8   id length
//! 1   u8   color map type
//! 2   u8   image type            (2 = uncompressed true-color)
//! 3   u16  color map origin
//! 5   u16  color map length
//! 7   u8   color map depth       (bits per entry)
//! 8   u16  x origin
//! 10  u16  y origin
//! 12  u16  width
//! 14  u16  height
//! 16  u8   bits per pixel
//! 17  u8   image descriptor      (bit 5 set = top-left origin)
//! ```
//!
//! Pixels start after the header, the id field and any color map. Stored
//! channel order is BGR(A); decoded order is RGB(A). Rows are returned in
//! the order they are stored; [`DecodedImage::origin`] says which corner
//! the first row belongs to.

use crate::error::{ImageError, ImageResult};

/// Size of the fixed header.
pub const HEADER_LEN: usize = 18;

/// Uncompressed true-color image type.
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

/// Corner the first stored row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// First row is the bottom of the image (TGA default).
    BottomLeft,
    /// First row is the top of the image.
    TopLeft,
}

/// Parsed TGA header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TgaHeader {
    /// Length of the id field following the header.
    pub id_length: u8,
    /// Non-zero if a color map is present.
    pub color_map_type: u8,
    /// Image type code.
    pub image_type: u8,
    /// First color map entry index.
    pub color_map_origin: u16,
    /// Number of color map entries.
    pub color_map_length: u16,
    /// Bits per color map entry.
    pub color_map_depth: u8,
    /// Horizontal screen origin.
    pub x_origin: u16,
    /// Vertical screen origin.
    pub y_origin: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Bits per pixel.
    pub bits_per_pixel: u8,
    /// Alpha depth and origin flags.
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Parses the first 18 bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::HeaderTooShort`] if fewer than 18 bytes exist.
    pub fn parse(bytes: &[u8]) -> ImageResult<Self> {
        let Some(h) = bytes.get(..HEADER_LEN) else {
            return Err(ImageError::HeaderTooShort { len: bytes.len() });
        };
        let u16_at = |i: usize| u16::from_le_bytes([h[i], h[i + 1]]);

        Ok(Self {
            id_length: h[0],
            color_map_type: h[1],
            image_type: h[2],
            color_map_origin: u16_at(3),
            color_map_length: u16_at(5),
            color_map_depth: h[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            bits_per_pixel: h[16],
            image_descriptor: h[17],
        })
    }

    /// Appends the 18 header bytes to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.push(self.id_length);
        out.push(self.color_map_type);
        out.push(self.image_type);
        out.extend_from_slice(&self.color_map_origin.to_le_bytes());
        out.extend_from_slice(&self.color_map_length.to_le_bytes());
        out.push(self.color_map_depth);
        out.extend_from_slice(&self.x_origin.to_le_bytes());
        out.extend_from_slice(&self.y_origin.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.bits_per_pixel);
        out.push(self.image_descriptor);
    }

    /// Offset of the first pixel byte.
    #[must_use]
    pub fn data_offset(&self) -> usize {
        let color_map = if self.color_map_type == 0 {
            0
        } else {
            usize::from(self.color_map_length) * usize::from(self.color_map_depth / 8)
        };
        HEADER_LEN + usize::from(self.id_length) + color_map
    }

    /// Corner of the first stored row.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        if self.image_descriptor & DESCRIPTOR_TOP_LEFT != 0 {
            Origin::TopLeft
        } else {
            Origin::BottomLeft
        }
    }
}

/// Decoded pixel buffer in RGB(A) order, rows as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    bits_per_pixel: u8,
    origin: Origin,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// 24 or 32.
    #[must_use]
    pub const fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    /// 3 or 4.
    #[must_use]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Corner the first row belongs to.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Raw RGB(A) bytes, `width * height * bytes_per_pixel` long.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Channels of the pixel at stored column `x`, stored row `y`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.pixels.get(start..start + bpp)
    }
}

/// Decodes an uncompressed true-color TGA.
///
/// # Errors
///
/// Returns an [`ImageError`] for a short header, an unsupported image type
/// or bit depth, or a pixel block shorter than the declared dimensions.
pub fn decode(bytes: &[u8]) -> ImageResult<DecodedImage> {
    let header = TgaHeader::parse(bytes)?;

    if header.image_type != IMAGE_TYPE_TRUE_COLOR {
        return Err(ImageError::UnsupportedImageType(header.image_type));
    }
    if !matches!(header.bits_per_pixel, 24 | 32) {
        return Err(ImageError::UnsupportedBitDepth(header.bits_per_pixel));
    }

    let bpp = usize::from(header.bits_per_pixel / 8);
    let expected = usize::from(header.width) * usize::from(header.height) * bpp;
    let start = header.data_offset();
    let Some(stored) = bytes.get(start..start + expected) else {
        return Err(ImageError::PixelDataTruncated {
            expected,
            actual: bytes.len().saturating_sub(start),
        });
    };

    let mut pixels = stored.to_vec();
    for px in pixels.chunks_exact_mut(bpp) {
        px.swap(0, 2);
    }

    Ok(DecodedImage {
        width: u32::from(header.width),
        height: u32::from(header.height),
        bits_per_pixel: header.bits_per_pixel,
        origin: header.origin(),
        pixels,
    })
}

/// Encodes RGB(A) pixels as an uncompressed bottom-left TGA.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedBitDepth`] unless `bits_per_pixel` is
/// 24 or 32, or [`ImageError::PixelCountMismatch`] if `pixels` does not
/// hold exactly `width * height` pixels.
pub fn encode(width: u16, height: u16, bits_per_pixel: u8, pixels: &[u8]) -> ImageResult<Vec<u8>> {
    if !matches!(bits_per_pixel, 24 | 32) {
        return Err(ImageError::UnsupportedBitDepth(bits_per_pixel));
    }
    let bpp = usize::from(bits_per_pixel / 8);
    let expected = usize::from(width) * usize::from(height) * bpp;
    if pixels.len() != expected {
        return Err(ImageError::PixelCountMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let header = TgaHeader {
        image_type: IMAGE_TYPE_TRUE_COLOR,
        width,
        height,
        bits_per_pixel,
        ..TgaHeader::default()
    };

    let mut out = Vec::with_capacity(HEADER_LEN + expected);
    header.write(&mut out);
    for px in pixels.chunks_exact(bpp) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
        if bpp == 4 {
            out.push(px[3]);
        }
    }
    Ok(out)
}
