#![recursion_limit = "256"]
//! End-to-end checks over a CDP-loaded page

use dom_query::{extract, query, traversal, DomArena, DomNode, DomService, NodeRef};
use std::cell::RefCell;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn page() -> serde_json::Value {
    serde_json::json!({
        "root": {
            "nodeId": 1, "backendNodeId": 1, "nodeType": 9, "nodeName": "#document",
            "children": [
                { "nodeId": 2, "backendNodeId": 2, "nodeType": 10, "nodeName": "html" },
                { "nodeId": 3, "backendNodeId": 3, "nodeType": 1, "nodeName": "HTML",
                  "children": [{
                    "nodeId": 4, "backendNodeId": 4, "nodeType": 1, "nodeName": "BODY",
                    "attributes": ["class", "page"],
                    "children": [
                        { "nodeId": 5, "backendNodeId": 5, "nodeType": 1, "nodeName": "P",
                          "attributes": ["class", "intro lead intro"],
                          "children": [
                            { "nodeId": 6, "backendNodeId": 6, "nodeType": 3, "nodeName": "#text", "nodeValue": "Hello " },
                            { "nodeId": 7, "backendNodeId": 7, "nodeType": 1, "nodeName": "B",
                              "children": [
                                { "nodeId": 8, "backendNodeId": 8, "nodeType": 3, "nodeName": "#text", "nodeValue": "World" }
                              ] },
                            { "nodeId": 9, "backendNodeId": 9, "nodeType": 3, "nodeName": "#text", "nodeValue": "!" }
                          ] },
                        { "nodeId": 10, "backendNodeId": 10, "nodeType": 8, "nodeName": "#comment", "nodeValue": "lead" },
                        { "nodeId": 11, "backendNodeId": 11, "nodeType": 1, "nodeName": "BUTTON",
                          "attributes": ["disabled", "", "class", "lead"],
                          "children": [
                            { "nodeId": 12, "backendNodeId": 12, "nodeType": 3, "nodeName": "#text", "nodeValue": "Go" }
                          ] }
                    ]
                  }]
                }
            ]
        }
    })
}

fn load() -> DomService {
    init_tracing();
    let mut service = DomService::new();
    service.parse_cdp_dom_tree(&page()).unwrap();
    service
}

#[test]
fn find_all_is_ordered_filter_of_rooted_pre_order() {
    let service = load();
    let root = service.root().unwrap();

    let predicates: Vec<Box<dyn Fn(NodeRef<'_>) -> bool>> = vec![
        Box::new(query::by_tag("b")),
        Box::new(query::by_class("lead")),
        Box::new(|n: NodeRef<'_>| n.is_text()),
        Box::new(|n: NodeRef<'_>| n.node_type() == dom_query::NodeType::Document),
        Box::new(|_: NodeRef<'_>| false),
    ];

    for cond in &predicates {
        let expected: Vec<_> = root.traverse().filter(|n| cond(*n)).collect();
        let found = query::find_all(root, |n| cond(n));
        assert_eq!(found, expected);
        assert_eq!(query::find_first(root, |n| cond(n)), expected.first().copied());
    }
}

#[test]
fn class_search_across_page() {
    let service = load();
    let root = service.root().unwrap();

    let leads: Vec<_> = query::find_all_by_class(root, "lead")
        .iter()
        .filter_map(|n| n.tag_name())
        .collect();
    assert_eq!(leads, vec!["p", "button"]);

    let intro = query::find_by_class(root, "intro").unwrap();
    assert_eq!(extract::class_list(intro), Some(vec!["intro", "lead", "intro"]));
    assert_eq!(extract::class_list(root), None);
}

#[test]
fn find_first_never_looks_past_the_match() {
    let mut arena = DomArena::new();
    let root = arena.add_node(DomNode::element("div"));
    let a = arena.append_element(root, "span", &[("class", "hit")]).unwrap();
    let b = arena.append_element(root, "section", &[]).unwrap();
    arena.append_element(b, "span", &[("class", "hit")]).unwrap();

    let seen = RefCell::new(Vec::new());
    let is_hit = query::by_class("hit");
    let found = query::find_first(arena.node(root).unwrap(), |n| {
        seen.borrow_mut().push(n.id());
        is_hit(n)
    });

    assert_eq!(found.map(|n| n.id()), Some(a));
    assert_eq!(*seen.borrow(), vec![root, a]);
}

#[test]
fn extraction_on_loaded_page() {
    let service = load();
    let root = service.root().unwrap();

    let p = query::find_by_tag(root, "p").unwrap();
    assert_eq!(extract::text_content(p), "Hello World!");

    let button = query::find_by_tag(root, "button").unwrap();
    assert_eq!(extract::attribute(button, "disabled"), Some("true"));
    assert_eq!(extract::attribute(button, "missing"), None);

    let body = query::find_by_tag(root, "body").unwrap();
    assert_eq!(body.text_content(), "Hello World!Go");
    assert_eq!(traversal::children(body).len(), 3);
    let world = query::find_by_tag(root, "b").unwrap().first_child().unwrap();
    assert!(traversal::children(world).is_empty());
}

#[test]
fn markup_covers_only_the_match() {
    let service = load();
    let root = service.root().unwrap();

    let b = query::find_by_tag(root, "b").unwrap();
    assert_eq!(b.to_markup().unwrap(), "<b>World</b>");

    let button = query::find_by_tag(root, "button").unwrap();
    assert_eq!(
        dom_query::to_markup(button).unwrap(),
        "<button disabled=\"\" class=\"lead\">Go</button>"
    );

    let full = root.to_markup().unwrap();
    assert!(full.starts_with("<!DOCTYPE html><html><body class=\"page\">"));
    assert!(full.contains("<!--lead-->"));
    assert!(full.ends_with("</body></html>"));
}

#[test]
fn single_match_visit_policy() {
    let service = load();
    let root = service.root().unwrap();

    let mut texts = Vec::new();
    query::with_first_match(root, query::by_tag("b"), |n| texts.push(n.text_content()));
    query::with_first_match(root, query::by_tag("table"), |n| texts.push(n.text_content()));
    assert_eq!(texts, vec!["World".to_string()]);
}

#[test]
fn concurrent_readers_share_one_tree() {
    let service = load();
    let arena = service.into_arena();

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["p", "b", "button"]
            .into_iter()
            .map(|tag| {
                let arena = &arena;
                scope.spawn(move || {
                    let root = arena.root().unwrap();
                    query::find_all_by_tag(root, tag).len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    });
}
