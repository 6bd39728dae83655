//! Integration tests for rendering
//! A document loaded from JSON rendered in both modes

use doc_model::{BlockId, Document};
use pretty_assertions::assert_eq;
use render_model::{
    to_html, DocumentRenderer, RenderContent, RenderMode, SignatureArtifact, SignatureRender,
};
use serde_json::json;

const TEMPLATE: &str = r#"{
  "title": "Site inspection",
  "pageSettings": {
    "margins": {"top": 20, "right": 15, "bottom": 20, "left": 15},
    "header": {"enabled": true, "content": "Inspection {{job.code}}"},
    "footer": {"enabled": true, "content": "Confidential"},
    "pageNumbers": true
  },
  "pages": [
    {
      "blocks": [
        {"id": "title", "type": "title", "text": "Inspection report", "level": "h1",
         "xMm": 15, "yMm": 20, "wMm": 180, "hMm": 14},
        {"id": "client", "type": "text", "bind": "client.name", "label": "Client",
         "xMm": 15, "yMm": 40, "wMm": 90, "hMm": 12},
        {"id": "visited", "type": "dateTime", "bind": "job.visitedAt", "mode": "dateTime",
         "label": "Visited", "xMm": 110, "yMm": 40, "wMm": 85, "hMm": 12},
        {"id": "weight", "type": "number", "bind": "job.weight", "unit": "kg", "decimals": 1,
         "xMm": 15, "yMm": 56, "wMm": 40, "hMm": 10},
        {"id": "urgent", "type": "checkbox", "bind": "job.urgent", "label": "Urgent",
         "xMm": 60, "yMm": 56, "wMm": 40, "hMm": 10},
        {"id": "notes", "type": "paragraph", "html": "<p>Notes for {{client.name}}</p>",
         "visibleIf": "job.kind === 'full'", "xMm": 15, "yMm": 70, "wMm": 180, "hMm": 30}
      ]
    },
    {
      "blocks": [
        {"id": "sig", "type": "signature", "role": "Inspector", "xMm": 15, "yMm": 20, "wMm": 80, "hMm": 30},
        {"id": "due", "type": "dynamicText", "expression": "Due {{formatDate(job.due)}}",
         "xMm": 100, "yMm": 20, "wMm": 80, "hMm": 10}
      ]
    }
  ]
}"#;

fn data() -> serde_json::Value {
    json!({
        "client": {"name": "Acme"},
        "job": {
            "code": "J-7",
            "visitedAt": "2024-03-05T09:30:00+01:00",
            "weight": 12.34,
            "urgent": true,
            "kind": "quick",
            "due": "2024-04-01"
        }
    })
}

fn signatures() -> Vec<SignatureArtifact> {
    vec![SignatureArtifact {
        block_id: BlockId::from("sig"),
        signature_png_url: "https://files.example.com/sig.png".into(),
        signature_hash: "b94d27b9934d3e08a52e52d7da7dabfa".into(),
        signed_at_local: "2024-03-05T17:45:00".into(),
        tz: "Europe/Paris".into(),
    }]
}

fn content<'a>(model: &'a render_model::RenderModel, id: &str) -> &'a RenderContent {
    &model.item(&BlockId::from(id)).unwrap().content
}

#[test]
fn test_instance_render_fills_every_field() {
    let doc = Document::from_json(TEMPLATE).unwrap();
    let model = DocumentRenderer::default().render_instance(&doc, &data(), &signatures());

    assert_eq!(model.mode, RenderMode::Instance);
    assert_eq!(
        content(&model, "client"),
        &RenderContent::FilledField { value: "Acme".into() }
    );
    assert_eq!(
        content(&model, "visited"),
        &RenderContent::FilledField {
            value: "05/03/2024 09:30".into()
        }
    );
    assert_eq!(
        content(&model, "weight"),
        &RenderContent::FilledField {
            value: "12.3 kg".into()
        }
    );
    assert_eq!(content(&model, "urgent"), &RenderContent::Checkbox { checked: true });
    assert_eq!(
        content(&model, "due"),
        &RenderContent::Text {
            text: "Due 01/04/2024".into()
        }
    );
    assert!(model.item(&BlockId::from("notes")).is_none());

    let page = &model.pages[0];
    assert_eq!(page.header.as_ref().map(|h| h.text.as_str()), Some("Inspection J-7"));
    assert_eq!(model.pages[1].page_number.as_ref().map(|p| p.text.as_str()), Some("2 / 2"));

    match content(&model, "sig") {
        RenderContent::Signature(SignatureRender::Signed { signed_at, hash, .. }) => {
            assert_eq!(signed_at, "05/03/2024 17:45 (Europe/Paris)");
            assert_eq!(hash, "b94d27b9934d…");
        }
        other => panic!("expected a signed signature, got {other:?}"),
    }
}

#[test]
fn test_template_render_shows_placeholders() {
    let doc = Document::from_json(TEMPLATE).unwrap();
    let model = DocumentRenderer::default().render_template(&doc);

    assert_eq!(model.mode, RenderMode::Template);
    assert!(matches!(content(&model, "client"), RenderContent::BlankField { .. }));
    assert_eq!(content(&model, "urgent"), &RenderContent::Checkbox { checked: false });
    assert!(model.item(&BlockId::from("notes")).is_some());
    assert_eq!(
        model.pages[0].header.as_ref().map(|h| h.text.as_str()),
        Some("Inspection {{job.code}}")
    );
    assert!(matches!(
        content(&model, "sig"),
        RenderContent::Signature(SignatureRender::Unsigned { .. })
    ));
}

#[test]
fn test_instance_html_print_surface() {
    let doc = Document::from_json(TEMPLATE).unwrap();
    let model = DocumentRenderer::default().render_instance(&doc, &data(), &signatures());
    let html = to_html(&model).unwrap();

    assert_eq!(html.matches("class=\"fw-page\"").count(), 2);
    assert!(html.contains("<div class=\"fw-value\">Acme</div>"));
    assert!(html.contains("src=\"https://files.example.com/sig.png\""));
    assert!(html.contains(">1 / 2<"));
    assert!(!html.contains("Notes for"));
}
