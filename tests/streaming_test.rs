//! Integration tests for streaming renderer.

use lexrender::model::{Document, ListType, Node, UploadNode};
use lexrender::render::streaming::{collect_content, RenderEvent, StreamingRenderer};
use lexrender::render::visitor::SkipUploadsVisitor;
use lexrender::render::{to_html, RenderOptions};

fn create_sample_document() -> Document {
    Document::with_children(vec![
        Node::heading("h1", vec![Node::text("Introduction")]),
        Node::paragraph(vec![Node::text("This is the introduction.")]),
        Node::Upload(UploadNode::new("/media/figure.png").with_alt("Figure 1")),
        Node::List {
            list_type: ListType::Number,
            start: Some(2),
            children: vec![Node::ListItem {
                checked: None,
                children: vec![Node::text("second")],
            }],
        },
        Node::paragraph(vec![]),
    ])
}

#[test]
fn test_streaming_events_order() {
    let doc = create_sample_document();
    let events: Vec<_> = StreamingRenderer::new(&doc, RenderOptions::default()).collect();

    assert_eq!(events.len(), 7);
    assert_eq!(events[0], RenderEvent::DocumentStart { block_count: 5 });
    assert_eq!(events[1].content(), Some("<h1>Introduction</h1>"));
    assert_eq!(events[4].content(), Some("<ol start=\"2\"><li>second</li></ol>"));
    assert_eq!(events[5].content(), Some("<p><br></p>"));
    assert_eq!(events[6], RenderEvent::DocumentEnd);
}

#[test]
fn test_streaming_matches_full_render() {
    let doc = create_sample_document();
    let renderer = StreamingRenderer::new(&doc, RenderOptions::default());
    assert_eq!(collect_content(renderer), to_html(&doc));
}

#[test]
fn test_streaming_with_visitor() {
    let doc = create_sample_document();
    let renderer =
        StreamingRenderer::new(&doc, RenderOptions::default()).with_visitor(SkipUploadsVisitor);

    let blocks: Vec<String> = renderer
        .filter_map(|event| event.content().map(str::to_string))
        .collect();

    assert_eq!(blocks.len(), 4);
    assert!(blocks.iter().all(|block| !block.contains("<figure>")));
}

#[test]
fn test_streaming_renderer_is_done() {
    let doc = create_sample_document();
    let mut renderer = StreamingRenderer::new(&doc, RenderOptions::default());
    assert_eq!(renderer.block_count(), 5);
    assert!(!renderer.is_done());

    for _ in renderer.by_ref() {}
    assert!(renderer.is_done());
    assert!(renderer.next().is_none());
}

#[test]
fn test_absent_document_stream() {
    let doc = Document::new();
    let events: Vec<_> = StreamingRenderer::new(&doc, RenderOptions::default()).collect();

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(RenderEvent::is_document_boundary));
    assert!(events.iter().all(|event| !event.has_content()));
}
