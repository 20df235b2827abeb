//! Typed configuration records, one per variant.
//!
//! At rest a widget's config is an untyped JSON object so the editor can
//! move, duplicate and patch it generically. Renderers and validators read
//! it through [`VariantConfig`], a tagged union with one record per variant.
//!
//! Every record derives `Default` with the variant's documented defaults and
//! is `#[serde(default)]`, so absent fields always resolve.

use crate::descriptor::VariantKind;
use pagekit_common::{resolve_cta, ConfigMap, ResolvedCta};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

fn s(text: &str) -> String {
    text.to_string()
}

/// Serialize a record into a config map
pub fn to_config<T: Serialize>(record: &T) -> ConfigMap {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => ConfigMap::new(),
    }
}

/// Default config of a record type, used as the catalog's factory
pub fn defaults_of<T: Serialize + Default>() -> ConfigMap {
    to_config(&T::default())
}

/// Default list item of a record type, used as a sub-list template
pub fn template_of<T: Serialize + Default>() -> Value {
    serde_json::to_value(T::default()).unwrap_or(Value::Null)
}

/// Decode a config, keeping every well-formed field.
///
/// A value with the wrong shape is repaired rather than replaced: malformed
/// keys of an object are dropped (and take their defaults), and malformed
/// items of a list are repaired or dropped one by one. A list the user
/// authored is never swapped for the default list.
pub fn decode_lenient<T: DeserializeOwned + Default>(config: &ConfigMap) -> T {
    let fits = |candidate: &Value| serde_json::from_value::<T>(candidate.clone()).is_ok();

    repair(&Value::Object(config.clone()), &fits)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Largest well-formed part of `value`, where `fits` reports whether a
/// candidate decodes in `value`'s place.
fn repair(value: &Value, fits: &dyn Fn(&Value) -> bool) -> Option<Value> {
    if fits(value) {
        return Some(value.clone());
    }

    match value {
        Value::Object(map) => {
            let mut kept = ConfigMap::new();
            for (key, field) in map {
                let fits_field = |candidate: &Value| {
                    let mut next = kept.clone();
                    next.insert(key.clone(), candidate.clone());
                    fits(&Value::Object(next))
                };
                match repair(field, &fits_field) {
                    Some(field) => {
                        kept.insert(key.clone(), field);
                    }
                    None => debug!(field = %key, "Dropping malformed config field"),
                }
            }
            let repaired = Value::Object(kept);
            fits(&repaired).then_some(repaired)
        }
        Value::Array(items) => {
            let mut kept: Vec<Value> = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let fits_item = |candidate: &Value| {
                    let mut next = kept.clone();
                    next.push(candidate.clone());
                    fits(&Value::Array(next))
                };
                match repair(item, &fits_item) {
                    Some(item) => kept.push(item),
                    None => debug!(index, "Dropping malformed list item"),
                }
            }
            let repaired = Value::Array(kept);
            fits(&repaired).then_some(repaired)
        }
        _ => None,
    }
}

/// CTA fields shared by every variant with a button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaFields {
    pub cta_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_widget_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Default for CtaFields {
    fn default() -> Self {
        Self {
            cta_type: s("external"),
            cta_url: None,
            button_url: None,
            anchor_widget_id: None,
            target: None,
        }
    }
}

impl CtaFields {
    pub fn resolve(&self) -> ResolvedCta {
        resolve_cta(&to_config(self))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    pub headline: String,
    pub subheadline: String,
    pub image_url: String,
    pub button_text: String,
    #[serde(flatten)]
    pub cta: CtaFields,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            headline: s("Welcome to our page"),
            subheadline: s("Tell visitors what makes you different"),
            image_url: String::new(),
            button_text: s("Get started"),
            cta: CtaFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    pub heading: String,
    pub body: String,
    pub align: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            heading: String::new(),
            body: s("Start writing here..."),
            align: s("left"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl Default for FaqItem {
    fn default() -> Self {
        Self {
            question: s("New question"),
            answer: s("Answer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqConfig {
    pub heading: String,
    pub items: Vec<FaqItem>,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            heading: s("Frequently asked questions"),
            items: vec![FaqItem {
                question: s("How does it work?"),
                answer: s("Explain it here."),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    pub description: String,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            title: s("New step"),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepsConfig {
    pub heading: String,
    pub steps: Vec<Step>,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            heading: s("How it works"),
            steps: (1..=3)
                .map(|n| Step {
                    title: format!("Step {}", n),
                    description: String::new(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistItem {
    pub text: String,
}

impl Default for ChecklistItem {
    fn default() -> Self {
        Self { text: s("New item") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistConfig {
    pub heading: String,
    pub items: Vec<ChecklistItem>,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            heading: s("What you get"),
            items: vec![ChecklistItem::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ingredient {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl Default for Ingredient {
    fn default() -> Self {
        Self {
            quantity: s("1"),
            unit: String::new(),
            name: s("Ingredient"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngredientsConfig {
    pub heading: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}

impl Default for IngredientsConfig {
    fn default() -> Self {
        Self {
            heading: s("Ingredients"),
            servings: 4,
            ingredients: vec![Ingredient::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageConfig {
    pub image_url: String,
    pub alt: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    pub heading: String,
    pub columns: u32,
    pub images: Vec<GalleryImage>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            heading: String::new(),
            columns: 3,
            images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoConfig {
    pub video_url: String,
    pub caption: String,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub role: String,
    pub image_url: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            id: String::new(),
            text: s("This changed everything for us."),
            author: s("Happy customer"),
            role: String::new(),
            image_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsConfig {
    pub heading: String,
    pub autoplay: bool,
    pub quotes: Vec<Quote>,
}

impl Default for TestimonialsConfig {
    fn default() -> Self {
        Self {
            heading: s("What our customers say"),
            autoplay: true,
            quotes: vec![Quote {
                id: s("quote-1"),
                ..Quote::default()
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Review {
    pub name: String,
    pub rating: f64,
    pub text: String,
    pub image: String,
}

impl Default for Review {
    fn default() -> Self {
        Self {
            name: s("Reviewer"),
            rating: 5.0,
            text: s("Great experience."),
            image: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewsConfig {
    pub heading: String,
    pub show_average: bool,
    pub reviews: Vec<Review>,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            heading: s("Reviews"),
            show_average: true,
            reviews: vec![Review::default()],
        }
    }
}

/// Author bio falls back to the site's brand image when `image_url` is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorBioConfig {
    pub name: String,
    pub bio: String,
    pub image_url: String,
}

impl Default for AuthorBioConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: s("A few words about the author."),
            image_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Gift {
    pub title: String,
    pub value: String,
}

impl Default for Gift {
    fn default() -> Self {
        Self {
            title: s("Bonus"),
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingTier {
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    pub gifts: Vec<Gift>,
    pub highlighted: bool,
    pub button_text: String,
    #[serde(flatten)]
    pub cta: CtaFields,
}

impl Default for PricingTier {
    fn default() -> Self {
        Self {
            name: s("Plan"),
            price: s("$0"),
            period: s("month"),
            features: vec![s("Feature")],
            gifts: Vec::new(),
            highlighted: false,
            button_text: s("Choose plan"),
            cta: CtaFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingConfig {
    pub heading: String,
    pub tiers: Vec<PricingTier>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            heading: s("Choose your plan"),
            tiers: vec![
                PricingTier {
                    name: s("Basic"),
                    price: s("$9"),
                    ..PricingTier::default()
                },
                PricingTier {
                    name: s("Pro"),
                    price: s("$29"),
                    highlighted: true,
                    ..PricingTier::default()
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonRow {
    pub feature: String,
    pub us: bool,
    pub them: bool,
}

impl Default for ComparisonRow {
    fn default() -> Self {
        Self {
            feature: s("Feature"),
            us: true,
            them: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonConfig {
    pub heading: String,
    pub us_label: String,
    pub them_label: String,
    pub rows: Vec<ComparisonRow>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            heading: s("How we compare"),
            us_label: s("Us"),
            them_label: s("Others"),
            rows: vec![ComparisonRow::default()],
        }
    }
}

/// `timer` is a duration in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownTimerConfig {
    pub headline: String,
    pub timer: u32,
    pub expired_text: String,
    pub button_text: String,
    #[serde(flatten)]
    pub cta: CtaFields,
}

impl Default for CountdownTimerConfig {
    fn default() -> Self {
        Self {
            headline: s("Offer ends soon"),
            timer: 15,
            expired_text: s("This offer has expired"),
            button_text: s("Claim offer"),
            cta: CtaFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaBannerConfig {
    pub headline: String,
    pub description: String,
    pub button_text: String,
    #[serde(flatten)]
    pub cta: CtaFields,
}

impl Default for CtaBannerConfig {
    fn default() -> Self {
        Self {
            headline: s("Ready to get started?"),
            description: String::new(),
            button_text: s("Let's go"),
            cta: CtaFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadFormConfig {
    pub headline: String,
    pub description: String,
    pub button_text: String,
    pub success_message: String,
    pub collect_name: bool,
}

impl Default for LeadFormConfig {
    fn default() -> Self {
        Self {
            headline: s("Join the list"),
            description: String::new(),
            button_text: s("Subscribe"),
            success_message: s("Thanks for signing up!"),
            collect_name: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerConfig {
    pub height: u32,
}

impl Default for SpacerConfig {
    fn default() -> Self {
        Self { height: 48 }
    }
}

/// Typed view of a widget config
#[derive(Debug, Clone, PartialEq)]
pub enum VariantConfig {
    Hero(HeroConfig),
    Text(TextConfig),
    Faq(FaqConfig),
    Steps(StepsConfig),
    Checklist(ChecklistConfig),
    Ingredients(IngredientsConfig),
    Image(ImageConfig),
    Gallery(GalleryConfig),
    Video(VideoConfig),
    Testimonials(TestimonialsConfig),
    Reviews(ReviewsConfig),
    AuthorBio(AuthorBioConfig),
    Pricing(PricingConfig),
    Comparison(ComparisonConfig),
    CountdownTimer(CountdownTimerConfig),
    CtaBanner(CtaBannerConfig),
    LeadForm(LeadFormConfig),
    Spacer(SpacerConfig),
}

impl VariantConfig {
    /// Decode a config for `kind`. Never fails.
    pub fn decode(kind: VariantKind, config: &ConfigMap) -> Self {
        match kind {
            VariantKind::Hero => VariantConfig::Hero(decode_lenient(config)),
            VariantKind::Text => VariantConfig::Text(decode_lenient(config)),
            VariantKind::Faq => VariantConfig::Faq(decode_lenient(config)),
            VariantKind::Steps => VariantConfig::Steps(decode_lenient(config)),
            VariantKind::Checklist => VariantConfig::Checklist(decode_lenient(config)),
            VariantKind::Ingredients => VariantConfig::Ingredients(decode_lenient(config)),
            VariantKind::Image => VariantConfig::Image(decode_lenient(config)),
            VariantKind::Gallery => VariantConfig::Gallery(decode_lenient(config)),
            VariantKind::Video => VariantConfig::Video(decode_lenient(config)),
            VariantKind::Testimonials => VariantConfig::Testimonials(decode_lenient(config)),
            VariantKind::Reviews => VariantConfig::Reviews(decode_lenient(config)),
            VariantKind::AuthorBio => VariantConfig::AuthorBio(decode_lenient(config)),
            VariantKind::Pricing => VariantConfig::Pricing(decode_lenient(config)),
            VariantKind::Comparison => VariantConfig::Comparison(decode_lenient(config)),
            VariantKind::CountdownTimer => VariantConfig::CountdownTimer(decode_lenient(config)),
            VariantKind::CtaBanner => VariantConfig::CtaBanner(decode_lenient(config)),
            VariantKind::LeadForm => VariantConfig::LeadForm(decode_lenient(config)),
            VariantKind::Spacer => VariantConfig::Spacer(decode_lenient(config)),
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            VariantConfig::Hero(_) => VariantKind::Hero,
            VariantConfig::Text(_) => VariantKind::Text,
            VariantConfig::Faq(_) => VariantKind::Faq,
            VariantConfig::Steps(_) => VariantKind::Steps,
            VariantConfig::Checklist(_) => VariantKind::Checklist,
            VariantConfig::Ingredients(_) => VariantKind::Ingredients,
            VariantConfig::Image(_) => VariantKind::Image,
            VariantConfig::Gallery(_) => VariantKind::Gallery,
            VariantConfig::Video(_) => VariantKind::Video,
            VariantConfig::Testimonials(_) => VariantKind::Testimonials,
            VariantConfig::Reviews(_) => VariantKind::Reviews,
            VariantConfig::AuthorBio(_) => VariantKind::AuthorBio,
            VariantConfig::Pricing(_) => VariantKind::Pricing,
            VariantConfig::Comparison(_) => VariantKind::Comparison,
            VariantConfig::CountdownTimer(_) => VariantKind::CountdownTimer,
            VariantConfig::CtaBanner(_) => VariantKind::CtaBanner,
            VariantConfig::LeadForm(_) => VariantKind::LeadForm,
            VariantConfig::Spacer(_) => VariantKind::Spacer,
        }
    }
}
