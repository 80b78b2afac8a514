use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use tracing::{debug, info, instrument};

use super::AppState;
use crate::campaign::{CampaignRequest, CampaignResponse, SourceImage, normalize_styles, run_campaign};
use crate::constants::{MSG_MISSING_FIELDS, MSG_NO_IMAGE};
use crate::error::AdStudioError;

/// Raw form values as they came off the wire.
#[derive(Debug, Default)]
pub(crate) struct CampaignForm {
    image: Option<Vec<u8>>,
    target: Option<String>,
    channel: Option<String>,
    styles: Vec<String>,
}

impl CampaignForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AdStudioError> {
        let mut form = CampaignForm::default();
        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "image" => {
                    let bytes = field.bytes().await?;
                    form.image = Some(bytes.to_vec());
                }
                "target" => {
                    let value = field.text().await?;
                    if form.target.is_none() {
                        form.target = Some(value);
                    }
                }
                "channel" => {
                    let value = field.text().await?;
                    if form.channel.is_none() {
                        form.channel = Some(value);
                    }
                }
                "styles" => form.styles.push(field.text().await?),
                other => debug!("Ignoring form field {other:?}"),
            }
        }
        Ok(form)
    }

    /// Validates the form and decodes the upload.
    ///
    /// Only absent or empty values are missing; everything else reaches the
    /// prompt as sent. An empty file is left to the decoder.
    pub(crate) fn into_request(self) -> Result<CampaignRequest, AdStudioError> {
        let image = self
            .image
            .ok_or(AdStudioError::MissingField(MSG_NO_IMAGE))?;

        let target_audience = self
            .target
            .filter(|target| !target.is_empty())
            .ok_or(AdStudioError::MissingField(MSG_MISSING_FIELDS))?;

        let style_tags = normalize_styles(self.styles);
        if style_tags.is_empty() {
            return Err(AdStudioError::MissingField(MSG_MISSING_FIELDS));
        }

        let image = SourceImage::decode(&image).map_err(AdStudioError::ImageDecode)?;

        Ok(CampaignRequest {
            image,
            target_audience,
            channel: self.channel.unwrap_or_default(),
            style_tags,
        })
    }
}

/// handles the /generate POST
#[instrument(skip_all)]
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CampaignResponse>, AdStudioError> {
    let request = CampaignForm::read(multipart?).await?.into_request()?;
    let (width, height) = request.image.dimensions();
    info!(
        "Campaign for {:?} on {:?} ({}), {}x{} {}",
        request.target_audience,
        request.channel,
        request.style_tags.join(", "),
        width,
        height,
        request.image.mime_type()
    );

    let response = run_campaign(state.backend.as_ref(), &request).await?;
    Ok(Json(response))
}
