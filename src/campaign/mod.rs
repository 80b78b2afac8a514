//! The campaign pipeline: concept first, then one ad image per focus mode.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::error::AdStudioError;
use crate::genai::{GenerativeBackend, InlineData, Part};

mod prompts;

pub use prompts::{FocusMode, ad_instruction, concept_instruction};

/// Formats the model API accepts as-is; anything else is re-encoded to PNG.
const PASSTHROUGH_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// A decoded upload, ready to send to a model.
#[derive(Clone, Debug)]
pub struct SourceImage {
    inline: InlineData,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Decodes uploaded bytes, failing when they are not an image.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(ImageError::IoError)?;
        let format = reader.format();
        let image = reader.decode()?;

        let inline = match format {
            Some(format) if PASSTHROUGH_FORMATS.contains(&format) => {
                InlineData::from_bytes(format.to_mime_type(), bytes)
            }
            _ => {
                debug!("Re-encoding {:?} upload as PNG", format);
                InlineData::from_bytes(ImageFormat::Png.to_mime_type(), &encode_png(&image)?)
            }
        };

        Ok(Self {
            inline,
            width: image.width(),
            height: image.height(),
        })
    }

    /// The payload sent to the models
    pub fn inline_data(&self) -> &InlineData {
        &self.inline
    }

    /// MIME type of the payload
    pub fn mime_type(&self) -> &str {
        &self.inline.mime_type
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A validated campaign request.
#[derive(Clone, Debug)]
pub struct CampaignRequest {
    /// Product photo
    pub image: SourceImage,
    /// Who the ad is for, never empty
    pub target_audience: String,
    /// Where it runs, empty when not given
    pub channel: String,
    /// Style descriptors in the order given, never empty
    pub style_tags: Vec<String>,
}

/// What `POST /generate` answers with.
#[derive(Clone, Debug, Serialize)]
pub struct CampaignResponse {
    /// The text model's answer, verbatim
    pub concept: String,
    /// Base64 PNG of the product-only ad
    pub product_ad: Option<String>,
    /// Base64 PNG of the model-holding-product ad
    pub model_ad: Option<String>,
}

/// Splits a single comma-separated value into trimmed tokens.
///
/// Anything other than exactly one value containing a comma is returned as-is.
pub fn normalize_styles(styles: Vec<String>) -> Vec<String> {
    match styles.as_slice() {
        [single] if single.contains(',') => single
            .split(',')
            .map(|style| style.trim().to_string())
            .collect(),
        _ => styles,
    }
}

/// Asks the text model for the ad concept.
#[instrument(skip_all, fields(audience = %request.target_audience))]
pub async fn generate_concept(
    backend: &dyn GenerativeBackend,
    request: &CampaignRequest,
) -> Result<String, AdStudioError> {
    let instruction = concept_instruction(
        &request.target_audience,
        &request.channel,
        &request.style_tags,
    );
    let concept = backend
        .synthesize_text(request.image.inline_data(), &instruction)
        .await?;
    debug!("Concept: {concept}");
    Ok(concept)
}

/// Returns the first part carrying inline image data.
pub fn first_inline_image(parts: &[Part]) -> Option<&InlineData> {
    parts.iter().find_map(Part::inline_image)
}

/// Renders one ad image. Failures are logged and come back as `None`.
#[instrument(skip_all, fields(mode = %mode))]
pub async fn generate_ad_image(
    backend: &dyn GenerativeBackend,
    source: &SourceImage,
    concept: &str,
    target_audience: &str,
    mode: FocusMode,
) -> Option<DynamicImage> {
    let instruction = ad_instruction(concept, target_audience, mode);
    let parts = match backend
        .synthesize_image(source.inline_data(), &instruction)
        .await
    {
        Ok(parts) => parts,
        Err(err) => {
            error!("Error generating {mode} image: {err}");
            return None;
        }
    };

    let Some(inline) = first_inline_image(&parts) else {
        error!(
            "Error generating {mode} image: no image in {} returned parts",
            parts.len()
        );
        return None;
    };

    let decoded = inline
        .decode()
        .map_err(|err| err.to_string())
        .and_then(|bytes| image::load_from_memory(&bytes).map_err(|err| err.to_string()));
    match decoded {
        Ok(img) => {
            info!("Generated {mode} image {}x{}", img.width(), img.height());
            Some(img)
        }
        Err(err) => {
            error!("Error decoding {mode} image: {err}");
            None
        }
    }
}

/// Encodes a bitmap as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Encodes a bitmap as base64 PNG text.
pub fn image_to_base64(image: &DynamicImage) -> Result<String, ImageError> {
    Ok(general_purpose::STANDARD.encode(encode_png(image)?))
}

/// Runs the whole pipeline for one request.
///
/// A failed concept call fails the request; failed ad images come back as `None`.
#[instrument(skip_all)]
pub async fn run_campaign(
    backend: &dyn GenerativeBackend,
    request: &CampaignRequest,
) -> Result<CampaignResponse, AdStudioError> {
    let concept = generate_concept(backend, request).await?;

    let (product, model) = tokio::join!(
        generate_ad_image(
            backend,
            &request.image,
            &concept,
            &request.target_audience,
            FocusMode::Product,
        ),
        generate_ad_image(
            backend,
            &request.image,
            &concept,
            &request.target_audience,
            FocusMode::Model,
        ),
    );

    Ok(CampaignResponse {
        product_ad: product.as_ref().map(image_to_base64).transpose()?,
        model_ad: model.as_ref().map(image_to_base64).transpose()?,
        concept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::stub::{StubBackend, image_part, png_bytes, sample_image};

    fn request() -> CampaignRequest {
        let bytes = png_bytes(&sample_image(8, 8, [0, 255, 0, 255]));
        CampaignRequest {
            image: SourceImage::decode(&bytes).expect("decode sample"),
            target_audience: "women 25-35".to_string(),
            channel: "Instagram".to_string(),
            style_tags: vec!["bold".to_string(), "vibrant".to_string()],
        }
    }

    fn decode_b64(value: &str) -> DynamicImage {
        let bytes = general_purpose::STANDARD
            .decode(value)
            .expect("valid base64");
        image::load_from_memory(&bytes).expect("valid png")
    }

    #[test]
    fn single_comma_value_is_split_and_trimmed() {
        assert_eq!(
            normalize_styles(vec!["bold, vibrant".to_string()]),
            vec!["bold".to_string(), "vibrant".to_string()]
        );
    }

    #[test]
    fn multiple_values_are_kept_in_order() {
        let styles = vec!["vibrant".to_string(), "bold, loud".to_string()];
        assert_eq!(normalize_styles(styles.clone()), styles);
        assert_eq!(
            normalize_styles(vec!["minimal".to_string()]),
            vec!["minimal".to_string()]
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(SourceImage::decode(b"This is not an image.").is_err());
        assert!(SourceImage::decode(&[]).is_err());
    }

    #[test]
    fn png_upload_passes_through() {
        let bytes = png_bytes(&sample_image(5, 2, [9, 9, 9, 255]));
        let source = SourceImage::decode(&bytes).expect("decode");
        assert_eq!(source.mime_type(), "image/png");
        assert_eq!(source.dimensions(), (5, 2));
        assert_eq!(source.inline_data().decode().expect("b64"), bytes);
    }

    #[test]
    fn bmp_upload_is_reencoded_as_png() {
        let img = DynamicImage::ImageRgb8(sample_image(3, 3, [50, 60, 70, 255]).to_rgb8());
        let mut bmp = Cursor::new(Vec::new());
        img.write_to(&mut bmp, ImageFormat::Bmp).expect("encode bmp");
        let source = SourceImage::decode(bmp.get_ref()).expect("decode");
        assert_eq!(source.mime_type(), "image/png");
        let round = image::load_from_memory(&source.inline_data().decode().expect("b64"))
            .expect("png");
        assert_eq!(round.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn first_inline_image_skips_text_parts() {
        let first = sample_image(1, 1, [1, 1, 1, 255]);
        let second = sample_image(2, 2, [2, 2, 2, 255]);
        let parts = vec![
            Part::text("here is your image"),
            Part::InlineData {
                inline_data: InlineData::from_bytes("text/plain", b"nope"),
            },
            image_part(&first),
            image_part(&second),
        ];
        let found = first_inline_image(&parts).expect("an image part");
        assert_eq!(found.decode().expect("b64"), png_bytes(&first));
        assert!(first_inline_image(&[Part::text("sorry")]).is_none());
    }

    #[tokio::test]
    async fn concept_is_returned_verbatim() {
        let backend = StubBackend::new("  A *dreamy* pastel set.\n");
        let response = run_campaign(&backend, &request()).await.expect("run");
        assert_eq!(response.concept, "  A *dreamy* pastel set.\n");

        let seen = backend.instructions();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].contains("**Style/Mood**: bold, vibrant"));
        assert!(seen[1..].iter().all(|i| i.starts_with("  A *dreamy* pastel set.\n")));
    }

    #[tokio::test]
    async fn images_round_trip_pixel_identical() {
        let product = sample_image(4, 3, [200, 10, 10, 255]);
        let model = sample_image(3, 5, [10, 10, 200, 255]);
        let backend = StubBackend::new("concept");
        let response = run_campaign(&backend, &request()).await.expect("run");

        let product_ad = response.product_ad.expect("product ad");
        let model_ad = response.model_ad.expect("model ad");
        assert_eq!(decode_b64(&product_ad).to_rgba8(), product.to_rgba8());
        assert_eq!(decode_b64(&model_ad).to_rgba8(), model.to_rgba8());
    }

    #[tokio::test]
    async fn failed_model_image_is_none() {
        let mut backend = StubBackend::new("concept");
        backend.model_parts = Err("quota exceeded".to_string());
        let response = run_campaign(&backend, &request()).await.expect("run");
        assert!(response.product_ad.is_some());
        assert!(response.model_ad.is_none());
    }

    #[tokio::test]
    async fn text_only_answer_is_none() {
        let mut backend = StubBackend::new("concept");
        backend.product_parts = Ok(vec![Part::text("I can't do that")]);
        backend.model_parts = Ok(vec![Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "bm90IGEgcG5n".to_string(),
            },
        }]);
        let response = run_campaign(&backend, &request()).await.expect("run");
        assert!(response.product_ad.is_none());
        assert!(response.model_ad.is_none());
    }

    #[tokio::test]
    async fn concept_failure_fails_the_request() {
        let mut backend = StubBackend::new("unused");
        backend.concept = Err("boom".to_string());
        let err = run_campaign(&backend, &request())
            .await
            .expect_err("concept failure is fatal");
        assert!(matches!(err, AdStudioError::Generation(_)));
        assert_eq!(backend.instructions().len(), 1);
    }
}
