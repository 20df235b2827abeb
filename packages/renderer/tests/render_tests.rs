//! End-to-end rendering tests

use pagekit_catalog::{Catalog, VariantKind};
use pagekit_common::ConfigMap;
use pagekit_editor::{BlockCollection, BlockInstance, IdGenerator};
use pagekit_renderer::{
    to_html, to_html_document, DiagnosticKind, HtmlOptions, PageContext, Renderer,
};
use serde_json::{json, Value};

fn config(value: Value) -> ConfigMap {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn context() -> PageContext {
    PageContext::new("Acme Bakery", "acme").with_brand_image("https://cdn.acme/logo.png")
}

fn every_variant() -> BlockCollection {
    let catalog = Catalog::builtin();
    let mut ids = IdGenerator::from_seed("w");
    let mut collection = BlockCollection::new();
    for kind in VariantKind::ALL {
        collection.insert(&catalog, &mut ids, kind.tag(), None).unwrap();
    }
    collection
}

#[test]
fn test_every_variant_renders_with_defaults() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);
    let blocks = every_variant();

    let page = renderer.render_page(blocks.blocks(), &context());

    assert_eq!(page.nodes.len(), VariantKind::ALL.len());
    assert!(page.diagnostics.is_empty(), "{:?}", page.diagnostics);

    for (node, block) in page.nodes.iter().zip(blocks.blocks()) {
        assert_eq!(node.attr("id"), Some(format!("widget-{}", block.id).as_str()));
        assert_eq!(node.attr("data-widget-type"), Some(block.block_type()));
    }
}

#[test]
fn test_render_is_idempotent() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);
    let blocks = every_variant();
    let ctx = context();

    let first = to_html(&renderer.render_page(blocks.blocks(), &ctx).nodes, &HtmlOptions::default());
    let second = to_html(&renderer.render_page(blocks.blocks(), &ctx).nodes, &HtmlOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_unknown_variant_does_not_break_page() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let mut legacy = BlockInstance::new("old", "marquee", ConfigMap::new());
    legacy.position = 0;
    let mut text = BlockInstance::new("t", "text", config(json!({ "body": "Hello" })));
    text.position = 1;

    let page = renderer.render_page(&[text, legacy], &context());

    assert_eq!(page.nodes.len(), 1);
    assert_eq!(page.diagnostics.len(), 1);
    assert_eq!(page.diagnostics[0].kind, DiagnosticKind::UnknownVariant);
    assert_eq!(page.diagnostics[0].block_id, "old");
}

#[test]
fn test_page_is_ordered_by_position() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let mut second = BlockInstance::new("b", "spacer", ConfigMap::new());
    second.position = 1;
    let mut first = BlockInstance::new("a", "spacer", ConfigMap::new());
    first.position = 0;

    let page = renderer.render_page(&[second, first], &PageContext::default());
    let ids: Vec<&str> = page.nodes.iter().filter_map(|n| n.attr("id")).collect();
    assert_eq!(ids, vec!["widget-a", "widget-b"]);
}

#[test]
fn test_author_bio_falls_back_to_brand_image() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let bio = BlockInstance::new("bio", "author-bio", config(json!({ "imageUrl": "" })));
    let node = renderer.render(&bio, &context()).unwrap();

    let photo = node.find("img").unwrap();
    assert_eq!(photo.attr("src"), Some("https://cdn.acme/logo.png"));
    assert_eq!(node.find("h3").unwrap().text_content(), "Acme Bakery");

    let own = BlockInstance::new("bio", "author-bio", config(json!({ "imageUrl": "me.jpg" })));
    let node = renderer.render(&own, &context()).unwrap();
    assert_eq!(node.find("img").unwrap().attr("src"), Some("me.jpg"));
}

#[test]
fn test_anchor_cta_links_to_widget() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let mut banner = BlockInstance::new(
        "banner",
        "cta-banner",
        config(json!({ "ctaType": "anchor", "anchorWidgetId": "signup", "buttonText": "Join" })),
    );
    banner.position = 0;
    let mut form = BlockInstance::new("signup", "lead-form", ConfigMap::new());
    form.position = 1;

    let page = renderer.render_page(&[banner, form], &context());
    assert!(page.diagnostics.is_empty());

    let link = page.nodes[0].find("a").unwrap();
    assert_eq!(link.attr("href"), Some("#widget-signup"));
    assert_eq!(link.attr("target"), None);

    let lead_form = page.nodes[1].find("form").unwrap();
    assert_eq!(lead_form.attr("id"), Some("lead-form-acme-signup"));
    assert_eq!(lead_form.attr("data-site-id"), Some("acme"));
}

#[test]
fn test_dangling_anchor_is_reported() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let banner = BlockInstance::new(
        "banner",
        "cta-banner",
        config(json!({ "ctaType": "anchor", "anchorWidgetId": "removed" })),
    );
    let mut hidden = BlockInstance::new("removed", "lead-form", ConfigMap::new());
    hidden.enabled = false;
    hidden.position = 1;

    let page = renderer.render_page(&[banner, hidden], &context());

    assert_eq!(page.nodes.len(), 1);
    assert_eq!(page.diagnostics.len(), 1);
    assert_eq!(page.diagnostics[0].kind, DiagnosticKind::DanglingAnchor);
    // Still a harmless in-page link
    assert_eq!(
        page.nodes[0].find("a").unwrap().attr("href"),
        Some("#widget-removed")
    );
}

#[test]
fn test_external_cta_with_legacy_url() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let hero = BlockInstance::new(
        "h",
        "hero",
        config(json!({ "buttonUrl": "https://old.example", "target": "_blank" })),
    );
    let link = renderer.render(&hero, &context()).unwrap();
    let link = link.find("a").unwrap();

    assert_eq!(link.attr("href"), Some("https://old.example"));
    assert_eq!(link.attr("target"), Some("_blank"));
}

#[test]
fn test_malformed_config_still_renders() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let timer = BlockInstance::new(
        "t",
        "countdown-timer",
        config(json!({ "timer": "soon", "headline": 42, "buttonText": "Buy" })),
    );
    let node = renderer.render(&timer, &context()).unwrap();

    let countdown = node
        .children()
        .iter()
        .find(|n| n.attr("class") == Some("countdown"))
        .unwrap();
    assert_eq!(countdown.attr("data-minutes"), Some("15"));
    assert_eq!(node.find("h2").unwrap().text_content(), "Offer ends soon");
}

#[test]
fn test_malformed_review_keeps_authored_reviews() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);

    let reviews = BlockInstance::new(
        "r",
        "reviews",
        config(json!({
            "reviews": [
                { "name": "Ann", "rating": "5", "text": "Loved it" },
                { "name": "Bob", "rating": 4 }
            ]
        })),
    );
    let html = to_html(&[renderer.render(&reviews, &context()).unwrap()], &HtmlOptions::compact());

    assert!(html.contains("<strong>Ann</strong>"));
    assert!(html.contains("<p>Loved it</p>"));
    assert!(html.contains("<strong>Bob</strong>"));
    assert!(html.contains("4.5 / 5 (2 reviews)"));
    assert!(!html.contains("Reviewer"));
}

#[test]
fn test_html_document_shell() {
    let catalog = Catalog::builtin();
    let renderer = Renderer::new(&catalog);
    let ctx = context();

    let spacer = BlockInstance::new("s", "spacer", ConfigMap::new());
    let page = renderer.render_page(&[spacer], &ctx);
    let html = to_html_document(&page, &ctx, &HtmlOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains("<title>Acme Bakery</title>"));
    assert!(html.contains(
        "<section class=\"widget widget-spacer\" data-widget-type=\"spacer\" id=\"widget-s\">"
    ));
}
