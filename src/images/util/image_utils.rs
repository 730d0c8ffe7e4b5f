use std::{collections::HashSet, io::Cursor, path::Path};

use image::{imageops::FilterType, ImageFormat, Rgb, RgbImage};

use crate::{
    app::util::multipart::models::file_properties::FileProperties,
    images::{errors::ImagesApiError, models::mask_coordinates::MaskCoordinates},
};

pub const MAX_IMAGE_PIXELS: u64 = 178_956_970;

const MASK_KEEP: Rgb<u8> = Rgb([0, 0, 0]);
const MASK_FILL: Rgb<u8> = Rgb([255, 255, 255]);

lazy_static! {
    pub static ref ALLOWED_EXTENSIONS: HashSet<&'static str> =
        ["png", "jpg", "jpeg", "bmp", "webp"].into_iter().collect();
}

pub fn allowed_extensions_list() -> String {
    let mut extensions: Vec<&str> = ALLOWED_EXTENSIONS.iter().copied().collect();
    extensions.sort_unstable();
    extensions.join(", ")
}

fn has_allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| ALLOWED_EXTENSIONS.contains(extension.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn validate_image(file: &FileProperties) -> Result<RgbImage, ImagesApiError> {
    if !has_allowed_extension(&file.file_name) {
        return Err(ImagesApiError::InvalidFileType);
    }

    let Ok(size) = imagesize::blob_size(&file.data) else {
        return Err(ImagesApiError::InvalidImage(
            "unrecognized image header".to_string(),
        ));
    };

    let pixels = size.width as u64 * size.height as u64;
    if pixels > MAX_IMAGE_PIXELS {
        return Err(ImagesApiError::InvalidImage(format!(
            "{}x{} exceeds the limit of {} pixels",
            size.width, size.height, MAX_IMAGE_PIXELS
        )));
    }

    match image::load_from_memory(&file.data) {
        Ok(image) => Ok(image.to_rgb8()),
        Err(e) => Err(ImagesApiError::InvalidImage(e.to_string())),
    }
}

pub fn resize_to_divisible_by_8(image: RgbImage) -> Result<RgbImage, ImagesApiError> {
    let (width, height) = image.dimensions();
    let new_width = width - width % 8;
    let new_height = height - height % 8;

    if new_width == 0 || new_height == 0 {
        return Err(ImagesApiError::ImageTooSmall { width, height });
    }

    if new_width == width && new_height == height {
        return Ok(image);
    }

    Ok(image::imageops::resize(
        &image,
        new_width,
        new_height,
        FilterType::Lanczos3,
    ))
}

pub fn create_mask_from_coordinates(
    (width, height): (u32, u32),
    coordinates: &MaskCoordinates,
) -> RgbImage {
    let mut mask = RgbImage::from_pixel(width, height, MASK_KEEP);

    if width == 0 || height == 0 {
        return mask;
    }

    let top = scale(height, coordinates.top).max(0);
    let bottom = scale(height, coordinates.bottom).min(height as i64 - 1);
    let left = scale(width, coordinates.left).max(0);
    let right = scale(width, coordinates.right).min(width as i64 - 1);

    if left > right || top > bottom {
        return mask;
    }

    for y in top..=bottom {
        for x in left..=right {
            mask.put_pixel(x as u32, y as u32, MASK_FILL);
        }
    }

    mask
}

fn scale(extent: u32, fraction: f64) -> i64 {
    // truncates toward zero; NaN lands on 0
    (extent as f64 * fraction) as i64
}

pub fn convert_to_grayscale(image: &RgbImage) -> RgbImage {
    let mut grayscale = image.clone();

    for pixel in grayscale.pixels_mut() {
        let luma = luma(pixel);
        *pixel = Rgb([luma, luma, luma]);
    }

    grayscale
}

fn luma(&Rgb([r, g, b]): &Rgb<u8>) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
