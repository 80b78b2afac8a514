//! Instruction templates sent to the models.

/// Which composition an ad image is rendered for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FocusMode {
    /// The product alone on an elegant surface
    Product,
    /// A human model holding the product
    Model,
}

impl FocusMode {
    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            FocusMode::Product => "product",
            FocusMode::Model => "model",
        }
    }
}

impl std::fmt::Display for FocusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const PRODUCT_FOCUS: &str = " Focus solely on the product. The product should be the hero of the image, placed on an elegant surface or background.";

const PRODUCT_UNCHANGED: &str = " CRITICAL: The product in the image MUST be identical to the product in the input image. Do not change the product's shape, color, logo, or text. The product must be the exact same item, just placed in a new environment/context. If the product has text on it, it must remain legible and unchanged.";

fn model_focus(target_audience: &str) -> String {
    format!(
        " The image MUST be a high-quality upper body portrait of a realistic human model ({target_audience}) HOLDING the product. The model should be holding the product up, potentially near their face or chest, ensuring the product is the focal point while the model's face is also clearly visible and engaging. The pose should be natural, elegant, and professional, typical of high-end beauty campaigns. The lighting should be soft and flattering, highlighting both the model's skin texture and the product details."
    )
}

/// Instruction asking the text model for an ad concept.
pub fn concept_instruction(target_audience: &str, channel: &str, styles: &[String]) -> String {
    let styles = styles.join(", ");
    format!(
        r#"
You are a creative director for a high-end cosmetic brand.
Analyze the provided product image.
Create a detailed image generation prompt for an advertisement based on the following constraints:

- **Target Audience**: {target_audience}
- **Channel**: {channel}
- **Style/Mood**: {styles}

**CRITICAL INSTRUCTIONS**:
1. The goal is to use this prompt to edit the background and props while KEEPING THE PRODUCT AND LOGO EXACTLY AS IS.
2. Describe a scene that fits the style and channel.
3. Lighting should be flattering for cosmetics.
4. Output ONLY the prompt text, no other conversational text.
"#
    )
}

/// Concept plus the focus suffix plus the product-unchanged clause.
pub fn ad_instruction(concept: &str, target_audience: &str, mode: FocusMode) -> String {
    let mut instruction = String::from(concept);
    match mode {
        FocusMode::Product => instruction.push_str(PRODUCT_FOCUS),
        FocusMode::Model => instruction.push_str(&model_focus(target_audience)),
    }
    instruction.push_str(PRODUCT_UNCHANGED);
    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_interpolates_fields() {
        let styles = vec!["bold".to_string(), "vibrant".to_string()];
        let text = concept_instruction("women 25-35", "Instagram", &styles);
        assert!(text.contains("creative director for a high-end cosmetic brand"));
        assert!(text.contains("**Target Audience**: women 25-35"));
        assert!(text.contains("**Channel**: Instagram"));
        assert!(text.contains("**Style/Mood**: bold, vibrant"));
        assert!(text.contains("KEEPING THE PRODUCT AND LOGO EXACTLY AS IS"));
        assert!(text.contains("Output ONLY the prompt text"));
    }

    #[test]
    fn empty_channel_stays_empty() {
        let text = concept_instruction("teens", "", &["minimal".to_string()]);
        assert!(text.contains("**Channel**: \n"));
        assert!(!text.contains("None"));
    }

    #[test]
    fn product_mode_suffix() {
        let text = ad_instruction("A marble bathroom.", "teens", FocusMode::Product);
        assert!(text.starts_with("A marble bathroom. Focus solely on the product."));
        assert!(!text.contains("human model"));
        assert!(text.ends_with(PRODUCT_UNCHANGED));
    }

    #[test]
    fn model_mode_suffix_names_audience() {
        let text = ad_instruction("A marble bathroom.", "men over 40", FocusMode::Model);
        assert!(text.starts_with("A marble bathroom. The image MUST be"));
        assert!(text.contains("realistic human model (men over 40) HOLDING the product"));
        assert!(!text.contains("Focus solely on the product"));
        assert!(text.ends_with(PRODUCT_UNCHANGED));
    }

    #[test]
    fn focus_mode_names() {
        assert_eq!(FocusMode::Product.to_string(), "product");
        assert_eq!(FocusMode::Model.to_string(), "model");
    }
}
