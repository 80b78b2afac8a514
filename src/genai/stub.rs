//! Test double for [`GenerativeBackend`].

use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::{GenAiError, GenerativeBackend, InlineData, Part};

/// Answers with canned text and images, and records every instruction.
pub(crate) struct StubBackend {
    pub(crate) concept: Result<String, String>,
    pub(crate) product_parts: Result<Vec<Part>, String>,
    pub(crate) model_parts: Result<Vec<Part>, String>,
    pub(crate) seen: Mutex<Vec<String>>,
}

impl StubBackend {
    pub(crate) fn new(concept: &str) -> Self {
        Self {
            concept: Ok(concept.to_string()),
            product_parts: Ok(vec![image_part(&sample_image(4, 3, [200, 10, 10, 255]))]),
            model_parts: Ok(vec![image_part(&sample_image(3, 5, [10, 10, 200, 255]))]),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn instructions(&self) -> Vec<String> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    fn record(&self, instruction: &str) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(instruction.to_string());
        }
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn synthesize_text(
        &self,
        _image: &InlineData,
        instruction: &str,
    ) -> Result<String, GenAiError> {
        self.record(instruction);
        self.concept.clone().map_err(GenAiError::EmptyResponse)
    }

    async fn synthesize_image(
        &self,
        _image: &InlineData,
        instruction: &str,
    ) -> Result<Vec<Part>, GenAiError> {
        self.record(instruction);
        let answer = if instruction.contains("realistic human model") {
            &self.model_parts
        } else {
            &self.product_parts
        };
        answer.clone().map_err(GenAiError::EmptyResponse)
    }
}

pub(crate) fn sample_image(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba(pixel));
    img.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
    DynamicImage::ImageRgba8(img)
}

pub(crate) fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}

pub(crate) fn image_part(img: &DynamicImage) -> Part {
    Part::InlineData {
        inline_data: InlineData::from_bytes("image/png", &png_bytes(img)),
    }
}
