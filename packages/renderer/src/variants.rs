//! Per-variant rendering rules.
//!
//! Each rule turns a decoded config into the children of the widget's
//! `<section>`. Rules are pure: same config and context, same nodes.

use crate::context::PageContext;
use crate::vdom::VNode;
use pagekit_catalog::variants::*;
use pagekit_catalog::VariantConfig;
use pagekit_common::{LinkTarget, ResolvedCta};

pub(crate) fn render_variant(config: &VariantConfig, ctx: &PageContext, block_id: &str) -> Vec<VNode> {
    match config {
        VariantConfig::Hero(c) => hero(c, ctx),
        VariantConfig::Text(c) => text(c),
        VariantConfig::Faq(c) => faq(c),
        VariantConfig::Steps(c) => steps(c),
        VariantConfig::Checklist(c) => checklist(c),
        VariantConfig::Ingredients(c) => ingredients(c),
        VariantConfig::Image(c) => image(c),
        VariantConfig::Gallery(c) => gallery(c),
        VariantConfig::Video(c) => video(c),
        VariantConfig::Testimonials(c) => testimonials(c, ctx),
        VariantConfig::Reviews(c) => reviews(c),
        VariantConfig::AuthorBio(c) => author_bio(c, ctx),
        VariantConfig::Pricing(c) => pricing(c),
        VariantConfig::Comparison(c) => comparison(c),
        VariantConfig::CountdownTimer(c) => countdown_timer(c),
        VariantConfig::CtaBanner(c) => cta_banner(c),
        VariantConfig::LeadForm(c) => lead_form(c, ctx, block_id),
        VariantConfig::Spacer(c) => spacer(c),
    }
}

// Shared pieces

fn heading(tag: &str, content: &str) -> Option<VNode> {
    (!content.is_empty()).then(|| VNode::text_element(tag, content))
}

fn paragraph(content: &str) -> Option<VNode> {
    heading("p", content)
}

fn img(src: &str, alt: &str) -> VNode {
    VNode::element("img").with_attr("src", src).with_attr("alt", alt)
}

/// Link styled as a button, pointing wherever the CTA resolves
pub(crate) fn button(label: &str, cta: &ResolvedCta) -> VNode {
    let link = VNode::text_element("a", label)
        .with_class("widget-button")
        .with_attr("href", cta.href.as_str());

    match &cta.target {
        LinkTarget::SameTab => link,
        LinkTarget::NewTab => link
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener noreferrer"),
        LinkTarget::Named(name) => link.with_attr("target", name.as_str()),
    }
}

fn list(tag: &str, class: &str, items: impl IntoIterator<Item = VNode>) -> VNode {
    VNode::element(tag).with_class(class).with_children(items)
}

// Rules

fn hero(c: &HeroConfig, ctx: &PageContext) -> Vec<VNode> {
    let mut nodes = Vec::new();
    if let Some(src) = ctx.image_or_brand(&c.image_url) {
        nodes.push(img(src, "").with_class("hero-image"));
    }
    nodes.extend(heading("h1", &c.headline));
    nodes.extend(paragraph(&c.subheadline));
    if !c.button_text.is_empty() {
        nodes.push(button(&c.button_text, &c.cta.resolve()));
    }
    nodes
}

fn text(c: &TextConfig) -> Vec<VNode> {
    let paragraphs = c
        .body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| VNode::text_element("p", p));

    let body = VNode::element("div")
        .with_class(format!("text-body text-align-{}", c.align))
        .with_children(paragraphs);

    heading("h2", &c.heading).into_iter().chain([body]).collect()
}

fn faq(c: &FaqConfig) -> Vec<VNode> {
    let items = c.items.iter().map(|item| {
        VNode::element("details")
            .with_child(VNode::text_element("summary", &item.question))
            .with_optional_child(paragraph(&item.answer))
    });

    heading("h2", &c.heading)
        .into_iter()
        .chain([list("div", "faq-items", items)])
        .collect()
}

fn steps(c: &StepsConfig) -> Vec<VNode> {
    let items = c.steps.iter().map(|step| {
        VNode::element("li")
            .with_child(VNode::text_element("h3", &step.title))
            .with_optional_child(paragraph(&step.description))
    });

    heading("h2", &c.heading)
        .into_iter()
        .chain([list("ol", "steps", items)])
        .collect()
}

fn checklist(c: &ChecklistConfig) -> Vec<VNode> {
    let items = c.items.iter().map(|item| VNode::text_element("li", &item.text));

    heading("h2", &c.heading)
        .into_iter()
        .chain([list("ul", "checklist", items)])
        .collect()
}

fn ingredients(c: &IngredientsConfig) -> Vec<VNode> {
    let items = c.ingredients.iter().map(|ingredient| {
        let line = [ingredient.quantity.as_str(), ingredient.unit.as_str(), ingredient.name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        VNode::text_element("li", line)
    });

    let mut nodes: Vec<VNode> = heading("h2", &c.heading).into_iter().collect();
    nodes.push(VNode::text_element("p", format!("Serves {}", c.servings)).with_class("servings"));
    nodes.push(list("ul", "ingredients", items));
    nodes
}

fn figure(src: &str, alt: &str, caption: &str) -> VNode {
    VNode::element("figure")
        .with_child(img(src, alt))
        .with_optional_child(heading("figcaption", caption))
}

fn image(c: &ImageConfig) -> Vec<VNode> {
    if c.image_url.is_empty() {
        return vec![VNode::comment("image not set")];
    }
    vec![figure(&c.image_url, &c.alt, &c.caption)]
}

fn gallery(c: &GalleryConfig) -> Vec<VNode> {
    let figures = c
        .images
        .iter()
        .filter(|image| !image.url.is_empty())
        .map(|image| figure(&image.url, &image.alt, &image.caption));

    let grid = list("div", "gallery-grid", figures).with_attr("data-columns", c.columns.max(1).to_string());
    heading("h2", &c.heading).into_iter().chain([grid]).collect()
}

fn video(c: &VideoConfig) -> Vec<VNode> {
    if c.video_url.is_empty() {
        return vec![VNode::comment("video not set")];
    }

    let mut player = VNode::element("video")
        .with_attr("src", c.video_url.as_str())
        .with_attr("controls", "");
    if c.autoplay {
        player = player.with_attr("autoplay", "").with_attr("muted", "");
    }

    vec![VNode::element("figure")
        .with_child(player)
        .with_optional_child(heading("figcaption", &c.caption))]
}

fn testimonials(c: &TestimonialsConfig, ctx: &PageContext) -> Vec<VNode> {
    let quotes = c.quotes.iter().map(|quote| {
        let author = if quote.role.is_empty() {
            quote.author.clone()
        } else {
            format!("{}, {}", quote.author, quote.role)
        };

        let mut node = VNode::element("blockquote")
            .with_optional_child(ctx.image_or_brand(&quote.image_url).map(|src| img(src, &quote.author)))
            .with_child(VNode::text_element("p", &quote.text))
            .with_child(VNode::text_element("cite", author));
        if !quote.id.is_empty() {
            node = node.with_key(quote.id.as_str());
        }
        node
    });

    let carousel = list("div", "testimonials", quotes).with_attr("data-autoplay", c.autoplay.to_string());
    heading("h2", &c.heading).into_iter().chain([carousel]).collect()
}

fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn reviews(c: &ReviewsConfig) -> Vec<VNode> {
    let mut nodes: Vec<VNode> = heading("h2", &c.heading).into_iter().collect();

    if c.show_average && !c.reviews.is_empty() {
        let average = c.reviews.iter().map(|r| r.rating).sum::<f64>() / c.reviews.len() as f64;
        nodes.push(
            VNode::text_element("p", format!("{:.1} / 5 ({} reviews)", average, c.reviews.len()))
                .with_class("reviews-average"),
        );
    }

    let cards = c.reviews.iter().map(|review| {
        VNode::element("article")
            .with_class("review")
            .with_optional_child((!review.image.is_empty()).then(|| img(&review.image, &review.name)))
            .with_child(VNode::text_element("strong", &review.name))
            .with_child(
                VNode::text_element("span", stars(review.rating))
                    .with_class("rating")
                    .with_attr("aria-label", format!("{} out of 5", review.rating)),
            )
            .with_optional_child(paragraph(&review.text))
    });

    nodes.push(list("div", "reviews", cards));
    nodes
}

fn author_bio(c: &AuthorBioConfig, ctx: &PageContext) -> Vec<VNode> {
    let name = if c.name.is_empty() { &ctx.site_name } else { &c.name };

    let mut nodes = Vec::new();
    if let Some(src) = ctx.image_or_brand(&c.image_url) {
        nodes.push(img(src, name).with_class("author-photo"));
    }
    nodes.extend(heading("h3", name));
    nodes.extend(paragraph(&c.bio));
    nodes
}

fn pricing(c: &PricingConfig) -> Vec<VNode> {
    let tiers = c.tiers.iter().map(|tier| {
        let class = if tier.highlighted {
            "pricing-tier highlighted"
        } else {
            "pricing-tier"
        };
        let price = if tier.period.is_empty() {
            tier.price.clone()
        } else {
            format!("{} / {}", tier.price, tier.period)
        };

        let features = tier.features.iter().map(|f| VNode::text_element("li", f));
        let gifts = tier.gifts.iter().map(|gift| {
            let label = if gift.value.is_empty() {
                gift.title.clone()
            } else {
                format!("{} ({})", gift.title, gift.value)
            };
            VNode::text_element("li", label)
        });

        VNode::element("div")
            .with_class(class)
            .with_child(VNode::text_element("h3", &tier.name))
            .with_child(VNode::text_element("p", price).with_class("price"))
            .with_child(list("ul", "features", features))
            .with_optional_child((!tier.gifts.is_empty()).then(|| list("ul", "gifts", gifts)))
            .with_child(button(&tier.button_text, &tier.cta.resolve()))
    });

    heading("h2", &c.heading)
        .into_iter()
        .chain([list("div", "pricing-tiers", tiers)])
        .collect()
}

fn comparison(c: &ComparisonConfig) -> Vec<VNode> {
    let mark = |yes: bool| VNode::text_element("td", if yes { "✓" } else { "✗" });

    let head = VNode::element("thead").with_child(
        VNode::element("tr")
            .with_child(VNode::element("th"))
            .with_child(VNode::text_element("th", &c.us_label))
            .with_child(VNode::text_element("th", &c.them_label)),
    );

    let rows = c.rows.iter().map(|row| {
        VNode::element("tr")
            .with_child(VNode::text_element("th", &row.feature))
            .with_child(mark(row.us))
            .with_child(mark(row.them))
    });

    let table = VNode::element("table")
        .with_class("comparison")
        .with_child(head)
        .with_child(VNode::element("tbody").with_children(rows));

    heading("h2", &c.heading).into_iter().chain([table]).collect()
}

fn countdown_timer(c: &CountdownTimerConfig) -> Vec<VNode> {
    let timer = VNode::element("div")
        .with_class("countdown")
        .with_attr("data-minutes", c.timer.to_string())
        .with_attr("data-expired-text", c.expired_text.as_str())
        .with_child(VNode::text(format!("{}:00", c.timer)));

    let mut nodes: Vec<VNode> = heading("h2", &c.headline).into_iter().collect();
    nodes.push(timer);
    if !c.button_text.is_empty() {
        nodes.push(button(&c.button_text, &c.cta.resolve()));
    }
    nodes
}

fn cta_banner(c: &CtaBannerConfig) -> Vec<VNode> {
    let mut nodes: Vec<VNode> = heading("h2", &c.headline).into_iter().collect();
    nodes.extend(paragraph(&c.description));
    nodes.push(button(&c.button_text, &c.cta.resolve()));
    nodes
}

fn lead_form(c: &LeadFormConfig, ctx: &PageContext, block_id: &str) -> Vec<VNode> {
    let field = |kind: &str, name: &str, label: &str| {
        VNode::element("input")
            .with_attr("type", kind)
            .with_attr("name", name)
            .with_attr("placeholder", label)
            .with_attr("required", "")
    };

    let mut form = VNode::element("form")
        .with_attr("id", format!("lead-form-{}-{}", ctx.site_id, block_id))
        .with_attr("data-site-id", ctx.site_id.as_str())
        .with_attr("method", "post");
    if c.collect_name {
        form = form.with_child(field("text", "name", "Your name"));
    }
    form = form
        .with_child(field("email", "email", "Email address"))
        .with_child(
            VNode::text_element("button", &c.button_text).with_attr("type", "submit"),
        );

    let mut nodes: Vec<VNode> = heading("h2", &c.headline).into_iter().collect();
    nodes.extend(paragraph(&c.description));
    nodes.push(form);
    nodes.push(
        VNode::text_element("p", &c.success_message)
            .with_class("lead-form-success")
            .with_attr("hidden", ""),
    );
    nodes
}

fn spacer(c: &SpacerConfig) -> Vec<VNode> {
    vec![VNode::element("div")
        .with_class("spacer")
        .with_attr("style", format!("height: {}px", c.height))
        .with_attr("aria-hidden", "true")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_targets() {
        let same = button(
            "Go",
            &ResolvedCta {
                href: "#widget-a".to_string(),
                target: LinkTarget::SameTab,
            },
        );
        assert_eq!(same.attr("target"), None);

        let new_tab = button(
            "Go",
            &ResolvedCta {
                href: "https://x".to_string(),
                target: LinkTarget::NewTab,
            },
        );
        assert_eq!(new_tab.attr("target"), Some("_blank"));
        assert_eq!(new_tab.attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(4.4), "★★★★☆");
        assert_eq!(stars(9.0), "★★★★★");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn test_ingredient_line_skips_empty_unit() {
        let config = IngredientsConfig::default();
        let nodes = ingredients(&config);
        let list = nodes.last().unwrap();
        assert_eq!(list.children()[0].text_content(), "1 Ingredient");
    }
}
