//! Placeholder image generation: a solid random background with the start of
//! the prompt written on top, shipped as a PNG data URI.

mod font;

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use rand::Rng;

pub const SIZE: u32 = 512;
pub const TEXT_ORIGIN: (u32, u32) = (10, 10);
pub const MAX_PROMPT_CHARS: usize = 50;
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

const CHANNEL_MIN: u8 = 50;
const CHANNEL_MAX: u8 = 200;
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Draws the placeholder for `prompt` without encoding it.
pub fn render<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> RgbImage {
    let background = Rgb([
        rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
    ]);

    let mut img = RgbImage::from_pixel(SIZE, SIZE, background);
    draw_text(&mut img, prompt, TEXT_ORIGIN);
    img
}

fn draw_text(img: &mut RgbImage, text: &str, (x0, y0): (u32, u32)) {
    let mut cursor = x0;

    for c in text.chars().take(MAX_PROMPT_CHARS) {
        if cursor >= img.width() {
            break;
        }
        if let Some(glyph) = font::glyph(c) {
            for (dx, dy) in font::lit_pixels(glyph) {
                let (x, y) = (cursor + dx, y0 + dy);
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, TEXT_COLOR);
                }
            }
        }
        cursor += font::ADVANCE;
    }
}

pub fn encode_data_uri(img: &RgbImage) -> Result<String, image::ImageError> {
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)?;

    Ok(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png.into_inner())))
}

/// Renders and encodes the placeholder for `prompt`.
pub fn generate<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> Result<String, image::ImageError> {
    encode_data_uri(&render(prompt, rng))
}
