//! # Variant Catalog
//!
//! Immutable registry of widget variants.
//!
//! The catalog is constructed once at startup with [`Catalog::builtin`] and
//! handed by reference to everything that needs it: the editing session
//! (default configs on insert, field schemas), the renderer (dispatch) and
//! the CLI palette listing. There is no process-wide instance.

use crate::descriptor::{Category, VariantDescriptor, VariantKind};
use crate::schema::{FieldKind, FieldSchema};
use crate::variants::*;
use pagekit_common::ConfigMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown widget variant: {0}")]
    UnknownVariant(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Registry of variant descriptors, looked up by tag
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: Vec<VariantDescriptor>,
    by_tag: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Build a catalog from explicit descriptors. Later duplicates of a tag are ignored.
    pub fn new(descriptors: Vec<VariantDescriptor>) -> Self {
        let mut by_tag = HashMap::new();
        let mut kept = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if by_tag.contains_key(descriptor.tag()) {
                continue;
            }
            by_tag.insert(descriptor.tag(), kept.len());
            kept.push(descriptor);
        }

        Self {
            descriptors: kept,
            by_tag,
        }
    }

    /// Catalog of every built-in variant
    pub fn builtin() -> Self {
        Self::new(VariantKind::ALL.iter().map(|kind| builtin_descriptor(*kind)).collect())
    }

    pub fn describe(&self, tag: &str) -> CatalogResult<&VariantDescriptor> {
        self.by_tag
            .get(tag)
            .map(|index| &self.descriptors[*index])
            .ok_or_else(|| CatalogError::UnknownVariant(tag.to_string()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Default config for `tag`; always succeeds for catalog members
    pub fn default_config(&self, tag: &str) -> CatalogResult<ConfigMap> {
        self.describe(tag).map(|d| (d.default_config)())
    }

    /// Categories in palette order
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    pub fn variants(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Variants grouped by category for the insertion palette.
    /// Empty categories are omitted.
    pub fn palette(&self) -> Vec<(Category, Vec<&VariantDescriptor>)> {
        self.categories()
            .iter()
            .map(|category| {
                let members = self
                    .descriptors
                    .iter()
                    .filter(|d| d.category == *category)
                    .collect::<Vec<_>>();
                (*category, members)
            })
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// Field schemas

const ALIGN_CHOICES: &[&str] = &["left", "center", "right"];

const HERO_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("headline", "Headline", FieldKind::Text),
    FieldSchema::new("subheadline", "Subheadline", FieldKind::LongText),
    FieldSchema::new("imageUrl", "Background image", FieldKind::Image),
    FieldSchema::new("buttonText", "Button text", FieldKind::Text),
    FieldSchema::new("ctaType", "Button action", FieldKind::Cta),
];

const TEXT_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("body", "Body", FieldKind::LongText),
    FieldSchema::new("align", "Alignment", FieldKind::Choice(ALIGN_CHOICES)),
];

const FAQ_ITEM_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("question", "Question", FieldKind::Text),
    FieldSchema::new("answer", "Answer", FieldKind::LongText),
];

const FAQ_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new(
        "items",
        "Questions",
        FieldKind::List {
            item_fields: FAQ_ITEM_FIELDS,
            keyed: false,
            template: template_of::<FaqItem>,
        },
    ),
];

const STEP_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("title", "Title", FieldKind::Text),
    FieldSchema::new("description", "Description", FieldKind::LongText),
];

const STEPS_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new(
        "steps",
        "Steps",
        FieldKind::List {
            item_fields: STEP_FIELDS,
            keyed: false,
            template: template_of::<Step>,
        },
    ),
];

const CHECKLIST_ITEM_FIELDS: &[FieldSchema] =
    &[FieldSchema::new("text", "Text", FieldKind::Text)];

const CHECKLIST_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new(
        "items",
        "Items",
        FieldKind::List {
            item_fields: CHECKLIST_ITEM_FIELDS,
            keyed: false,
            template: template_of::<ChecklistItem>,
        },
    ),
];

const INGREDIENT_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("quantity", "Quantity", FieldKind::Text),
    FieldSchema::new("unit", "Unit", FieldKind::Text).optional(),
    FieldSchema::new("name", "Name", FieldKind::Text),
];

const INGREDIENTS_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("servings", "Servings", FieldKind::Number),
    FieldSchema::new(
        "ingredients",
        "Ingredients",
        FieldKind::List {
            item_fields: INGREDIENT_FIELDS,
            keyed: false,
            template: template_of::<Ingredient>,
        },
    ),
];

const IMAGE_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("imageUrl", "Image", FieldKind::Image),
    FieldSchema::new("alt", "Alt text", FieldKind::Text),
    FieldSchema::new("caption", "Caption", FieldKind::Text),
];

const GALLERY_IMAGE_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("url", "Image", FieldKind::Image),
    FieldSchema::new("alt", "Alt text", FieldKind::Text),
    FieldSchema::new("caption", "Caption", FieldKind::Text).optional(),
];

const GALLERY_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("columns", "Columns", FieldKind::Number),
    FieldSchema::new(
        "images",
        "Images",
        FieldKind::List {
            item_fields: GALLERY_IMAGE_FIELDS,
            keyed: false,
            template: template_of::<GalleryImage>,
        },
    ),
];

const VIDEO_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("videoUrl", "Video URL", FieldKind::Url),
    FieldSchema::new("caption", "Caption", FieldKind::Text),
    FieldSchema::new("autoplay", "Autoplay", FieldKind::Toggle),
];

const QUOTE_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("text", "Quote", FieldKind::LongText),
    FieldSchema::new("author", "Author", FieldKind::Text),
    FieldSchema::new("role", "Role", FieldKind::Text).optional(),
    FieldSchema::new("imageUrl", "Photo", FieldKind::Image).optional(),
];

const TESTIMONIALS_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("autoplay", "Rotate quotes", FieldKind::Toggle),
    FieldSchema::new(
        "quotes",
        "Quotes",
        FieldKind::List {
            item_fields: QUOTE_FIELDS,
            keyed: true,
            template: template_of::<Quote>,
        },
    ),
];

const REVIEW_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("name", "Name", FieldKind::Text),
    FieldSchema::new("rating", "Rating", FieldKind::Number),
    FieldSchema::new("text", "Review", FieldKind::LongText),
    FieldSchema::new("image", "Photo", FieldKind::Image).optional(),
];

const REVIEWS_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("showAverage", "Show average", FieldKind::Toggle),
    FieldSchema::new(
        "reviews",
        "Reviews",
        FieldKind::List {
            item_fields: REVIEW_FIELDS,
            keyed: false,
            template: template_of::<Review>,
        },
    ),
];

const AUTHOR_BIO_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("name", "Name", FieldKind::Text),
    FieldSchema::new("bio", "Bio", FieldKind::LongText),
    FieldSchema::new("imageUrl", "Photo", FieldKind::Image),
];

const GIFT_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("title", "Title", FieldKind::Text),
    FieldSchema::new("value", "Value", FieldKind::Text).optional(),
];

const TIER_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("name", "Name", FieldKind::Text),
    FieldSchema::new("price", "Price", FieldKind::Text),
    FieldSchema::new("period", "Billing period", FieldKind::Text),
    FieldSchema::new("features", "Features", FieldKind::StringList),
    FieldSchema::new(
        "gifts",
        "Gifts",
        FieldKind::List {
            item_fields: GIFT_FIELDS,
            keyed: false,
            template: template_of::<Gift>,
        },
    ),
    FieldSchema::new("highlighted", "Highlight", FieldKind::Toggle),
    FieldSchema::new("buttonText", "Button text", FieldKind::Text),
    FieldSchema::new("ctaType", "Button action", FieldKind::Cta),
];

const PRICING_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new(
        "tiers",
        "Tiers",
        FieldKind::List {
            item_fields: TIER_FIELDS,
            keyed: false,
            template: template_of::<PricingTier>,
        },
    ),
];

const COMPARISON_ROW_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("feature", "Feature", FieldKind::Text),
    FieldSchema::new("us", "We have it", FieldKind::Toggle),
    FieldSchema::new("them", "They have it", FieldKind::Toggle),
];

const COMPARISON_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("heading", "Heading", FieldKind::Text),
    FieldSchema::new("usLabel", "Our label", FieldKind::Text),
    FieldSchema::new("themLabel", "Their label", FieldKind::Text),
    FieldSchema::new(
        "rows",
        "Rows",
        FieldKind::List {
            item_fields: COMPARISON_ROW_FIELDS,
            keyed: false,
            template: template_of::<ComparisonRow>,
        },
    ),
];

const COUNTDOWN_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("headline", "Headline", FieldKind::Text),
    FieldSchema::new("timer", "Duration (minutes)", FieldKind::Number),
    FieldSchema::new("expiredText", "Expired message", FieldKind::Text),
    FieldSchema::new("buttonText", "Button text", FieldKind::Text),
    FieldSchema::new("ctaType", "Button action", FieldKind::Cta),
];

const CTA_BANNER_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("headline", "Headline", FieldKind::Text),
    FieldSchema::new("description", "Description", FieldKind::LongText).optional(),
    FieldSchema::new("buttonText", "Button text", FieldKind::Text),
    FieldSchema::new("ctaType", "Button action", FieldKind::Cta),
];

const LEAD_FORM_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("headline", "Headline", FieldKind::Text),
    FieldSchema::new("description", "Description", FieldKind::LongText).optional(),
    FieldSchema::new("buttonText", "Button text", FieldKind::Text),
    FieldSchema::new("successMessage", "Success message", FieldKind::Text),
    FieldSchema::new("collectName", "Ask for name", FieldKind::Toggle),
];

const SPACER_FIELDS: &[FieldSchema] = &[FieldSchema::new("height", "Height (px)", FieldKind::Number)];

fn builtin_descriptor(kind: VariantKind) -> VariantDescriptor {
    let (display_name, category, description, default_config, fields): (
        &'static str,
        Category,
        &'static str,
        fn() -> ConfigMap,
        &'static [FieldSchema],
    ) = match kind {
        VariantKind::Hero => (
            "Hero",
            Category::Header,
            "Large headline with an optional background image and button",
            defaults_of::<HeroConfig>,
            HERO_FIELDS,
        ),
        VariantKind::Text => (
            "Text",
            Category::Content,
            "Heading and body copy",
            defaults_of::<TextConfig>,
            TEXT_FIELDS,
        ),
        VariantKind::Faq => (
            "FAQ",
            Category::Content,
            "Questions and answers",
            defaults_of::<FaqConfig>,
            FAQ_FIELDS,
        ),
        VariantKind::Steps => (
            "Timeline Steps",
            Category::Content,
            "Numbered sequence of steps",
            defaults_of::<StepsConfig>,
            STEPS_FIELDS,
        ),
        VariantKind::Checklist => (
            "Checklist",
            Category::Content,
            "List of ticked items",
            defaults_of::<ChecklistConfig>,
            CHECKLIST_FIELDS,
        ),
        VariantKind::Ingredients => (
            "Ingredients",
            Category::Content,
            "Recipe ingredient list",
            defaults_of::<IngredientsConfig>,
            INGREDIENTS_FIELDS,
        ),
        VariantKind::Image => (
            "Image",
            Category::Media,
            "Single image with caption",
            defaults_of::<ImageConfig>,
            IMAGE_FIELDS,
        ),
        VariantKind::Gallery => (
            "Gallery",
            Category::Media,
            "Grid of images",
            defaults_of::<GalleryConfig>,
            GALLERY_FIELDS,
        ),
        VariantKind::Video => (
            "Video",
            Category::Media,
            "Embedded video",
            defaults_of::<VideoConfig>,
            VIDEO_FIELDS,
        ),
        VariantKind::Testimonials => (
            "Testimonial Carousel",
            Category::SocialProof,
            "Rotating customer quotes",
            defaults_of::<TestimonialsConfig>,
            TESTIMONIALS_FIELDS,
        ),
        VariantKind::Reviews => (
            "Reviews",
            Category::SocialProof,
            "Star-rated reviews",
            defaults_of::<ReviewsConfig>,
            REVIEWS_FIELDS,
        ),
        VariantKind::AuthorBio => (
            "Author Bio",
            Category::SocialProof,
            "Author photo and biography",
            defaults_of::<AuthorBioConfig>,
            AUTHOR_BIO_FIELDS,
        ),
        VariantKind::Pricing => (
            "Pricing Table",
            Category::Conversion,
            "Pricing tiers with features and bonus gifts",
            defaults_of::<PricingConfig>,
            PRICING_FIELDS,
        ),
        VariantKind::Comparison => (
            "Comparison Table",
            Category::Conversion,
            "Feature-by-feature comparison",
            defaults_of::<ComparisonConfig>,
            COMPARISON_FIELDS,
        ),
        VariantKind::CountdownTimer => (
            "Countdown Timer",
            Category::Conversion,
            "Urgency timer with a button",
            defaults_of::<CountdownTimerConfig>,
            COUNTDOWN_FIELDS,
        ),
        VariantKind::CtaBanner => (
            "Call to Action",
            Category::Conversion,
            "Banner with a single button",
            defaults_of::<CtaBannerConfig>,
            CTA_BANNER_FIELDS,
        ),
        VariantKind::LeadForm => (
            "Lead Form",
            Category::Conversion,
            "Email capture form",
            defaults_of::<LeadFormConfig>,
            LEAD_FORM_FIELDS,
        ),
        VariantKind::Spacer => (
            "Spacer",
            Category::Layout,
            "Vertical whitespace",
            defaults_of::<SpacerConfig>,
            SPACER_FIELDS,
        ),
    };

    VariantDescriptor {
        kind,
        display_name,
        category,
        description,
        default_config,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_kind() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), VariantKind::ALL.len());

        for kind in VariantKind::ALL {
            let descriptor = catalog.describe(kind.tag()).unwrap();
            assert_eq!(descriptor.kind, kind);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.describe("marquee").unwrap_err(),
            CatalogError::UnknownVariant("marquee".to_string())
        );
        assert!(catalog.default_config("marquee").is_err());
    }

    #[test]
    fn test_palette_follows_category_order() {
        let catalog = Catalog::builtin();
        let palette = catalog.palette();

        let order = palette.iter().map(|(c, _)| *c).collect::<Vec<_>>();
        assert_eq!(order, Category::ALL.to_vec());

        let total: usize = palette.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_palette_skips_empty_categories() {
        let catalog = Catalog::new(vec![builtin_descriptor(VariantKind::Spacer)]);
        let palette = catalog.palette();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].0, Category::Layout);
    }

    #[test]
    fn test_duplicate_tags_keep_first() {
        let mut second = builtin_descriptor(VariantKind::Spacer);
        second.display_name = "Other";
        let catalog = Catalog::new(vec![builtin_descriptor(VariantKind::Spacer), second]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.describe("spacer").unwrap().display_name, "Spacer");
    }
}
