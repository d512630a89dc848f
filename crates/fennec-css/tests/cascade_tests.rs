//! Integration tests for the cascade and style computation.

use fennec_css::style::{Color, Dimension, Edges, Justify, Length, Paint};
use fennec_css::{Diagnostic, RawRule, StyleSheet, compute_styles, resolve};
use fennec_dom::{ElementData, NodeId, NodeTree, Tag};
use serde_json::{Value, json};

fn rule(selector: &str, declarations: &[(&str, Value)]) -> RawRule {
    declarations
        .iter()
        .fold(RawRule::new(selector), |rule, (name, value)| {
            rule.declare(*name, value.clone())
        })
}

/// A root with one `view#target.card.primary` child.
fn target_tree() -> (NodeTree, NodeId) {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let target = tree.append(
        NodeId::ROOT,
        ElementData::new(Tag::View)
            .with_id("target")
            .with_class_list("card primary"),
    );
    (tree, target)
}

// ========== precedence ==========

#[test]
fn test_id_beats_class_beats_tag() {
    let (tree, target) = target_tree();

    // Declared in reverse precedence order, so source order alone would
    // pick the tag rule.
    let sheet = StyleSheet::new([
        rule("#target", &[("gap", json!(3))]),
        rule(".card", &[("gap", json!(2)), ("flexGrow", json!(2))]),
        rule("view", &[("gap", json!(1)), ("flexGrow", json!(1)), ("opacity", json!(0.5))]),
    ]);
    let styles = compute_styles(&tree, &sheet);
    let style = styles.get(target).unwrap();

    assert!((style.gap - 3.0).abs() < f32::EPSILON);
    assert!((style.flex_grow - 2.0).abs() < f32::EPSILON);
    assert!((style.opacity - 0.5).abs() < f32::EPSILON);
}

#[test]
fn test_later_rule_wins_on_equal_specificity() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([
        rule(".card", &[("justify", json!("end"))]),
        rule(".primary", &[("justify", json!("center"))]),
    ]);
    let styles = compute_styles(&tree, &sheet);
    assert_eq!(styles.get(target).unwrap().justify, Justify::Center);
}

#[test]
fn test_compound_selector_outranks_parts() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([
        rule("view.card.primary", &[("width", json!(30))]),
        rule(".card", &[("width", json!(10))]),
        rule(".primary", &[("width", json!(20))]),
    ]);
    let styles = compute_styles(&tree, &sheet);
    assert_eq!(
        styles.get(target).unwrap().width,
        Dimension::Length(Length::Px(30.0))
    );
}

#[test]
fn test_declarations_merge_per_property() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([
        rule("#target", &[("paddingLeft", json!(5))]),
        rule(".card", &[("padding", json!(10))]),
    ]);
    let styles = compute_styles(&tree, &sheet);
    let padding = styles.get(target).unwrap().padding;
    assert_eq!(padding.left, Length::Px(5.0));
    assert_eq!(padding.top, Length::Px(10.0));
}

// ========== shorthands ==========

#[test]
fn test_padding_all_equals_four_edges() {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View).with_id("a"));
    let b = tree.append(NodeId::ROOT, ElementData::new(Tag::View).with_id("b"));

    let sheet = StyleSheet::new([
        rule("#a", &[("padding", json!({"all": 10}))]),
        rule(
            "#b",
            &[("padding", json!({"top": 10, "right": 10, "bottom": 10, "left": 10}))],
        ),
    ]);
    let styles = compute_styles(&tree, &sheet);
    assert_eq!(styles.get(a), styles.get(b));
    assert_eq!(styles.get(a).unwrap().padding, Edges::uniform(Length::Px(10.0)));
}

#[test]
fn test_padding_all_then_edge_override() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([rule(
        "#target",
        &[("margin", json!({"all": 4, "left": "10%"}))],
    )]);
    let styles = compute_styles(&tree, &sheet);
    let margin = styles.get(target).unwrap().margin;
    assert_eq!(margin.top, Length::Px(4.0));
    assert_eq!(margin.left, Length::Percent(10.0));
}

// ========== inheritance ==========

#[test]
fn test_text_properties_inherit_layout_properties_reset() {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let view = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let text = tree.append(view, ElementData::new(Tag::Text).with_text("hi"));

    let sheet = StyleSheet::new([rule(
        "root",
        &[
            ("color", json!("#336699")),
            ("fontSize", json!(20)),
            ("fontFamily", json!(["Inter", "sans-serif"])),
            ("padding", json!(8)),
            ("background", json!("white")),
        ],
    )]);
    let styles = compute_styles(&tree, &sheet);
    let style = styles.get(text).unwrap();

    assert_eq!(style.color, Color::rgb(0x33, 0x66, 0x99));
    assert!((style.font_size - 20.0).abs() < f32::EPSILON);
    assert_eq!(style.font_family.as_deref(), Some("Inter, sans-serif"));
    assert_eq!(style.padding, Edges::uniform(Length::ZERO));
    assert_eq!(style.background, None);
}

#[test]
fn test_relative_font_size_compounds() {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let outer = tree.append(NodeId::ROOT, ElementData::new(Tag::View).with_class("big"));
    let inner = tree.append(outer, ElementData::new(Tag::View).with_class("big"));

    let sheet = StyleSheet::new([rule(".big", &[("fontSize", json!("1.5em"))])]);
    let styles = compute_styles(&tree, &sheet);
    assert!((styles.get(outer).unwrap().font_size - 24.0).abs() < 1e-4);
    assert!((styles.get(inner).unwrap().font_size - 36.0).abs() < 1e-4);
}

#[test]
fn test_inherit_keyword_on_layout_property() {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let child = tree.append(NodeId::ROOT, ElementData::new(Tag::View));

    let sheet = StyleSheet::new([
        rule("root", &[("gap", json!(12)), ("color", json!("red"))]),
        rule("view", &[("gap", json!("inherit")), ("color", json!("initial"))]),
    ]);
    let styles = compute_styles(&tree, &sheet);
    let style = styles.get(child).unwrap();
    assert!((style.gap - 12.0).abs() < f32::EPSILON);
    assert_eq!(style.color, Color::BLACK);
}

// ========== robustness ==========

#[test]
fn test_resolve_is_idempotent() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([
        rule(".card", &[("background", json!("linear-gradient(90deg, red, blue)"))]),
        rule("#target", &[("fontSize", json!("150%")), ("boxShadow", json!("0 1px 2px black"))]),
    ]);
    let root = resolve(&tree, NodeId::ROOT, &sheet, None);

    let first = resolve(&tree, target, &sheet, Some(&root));
    let second = resolve(&tree, target, &sheet, Some(&root));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_one_bad_color_yields_one_diagnostic() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([rule(
        "#target",
        &[
            ("color", json!("blurple")),
            ("gap", json!(6)),
            ("background", json!("#00ff00")),
        ],
    )]);
    let styles = compute_styles(&tree, &sheet);

    assert_eq!(styles.diagnostics().len(), 1);
    match &styles.diagnostics()[0] {
        Diagnostic::Value(err) => {
            assert_eq!(err.property, "color");
            assert!(err.to_string().contains("blurple"));
        }
        other => panic!("unexpected diagnostic {other:?}"),
    }

    let style = styles.get(target).unwrap();
    assert_eq!(style.color, Color::BLACK);
    assert!((style.gap - 6.0).abs() < f32::EPSILON);
    assert_eq!(
        style.background,
        Some(Paint::Solid {
            color: Color::rgb(0, 255, 0)
        })
    );
}

#[test]
fn test_unknown_properties_carried_through() {
    let (tree, target) = target_tree();
    let sheet = StyleSheet::new([rule("#target", &[("boxShadow", json!("0 2px 4px #0004"))])]);
    let styles = compute_styles(&tree, &sheet);
    let style = styles.get(target).unwrap();
    assert_eq!(style.extra.get("boxShadow"), Some(&json!("0 2px 4px #0004")));

    let serialized = serde_json::to_value(style).unwrap();
    assert_eq!(serialized["extra"]["boxShadow"], json!("0 2px 4px #0004"));
}

#[test]
fn test_every_attached_node_gets_one_style() {
    let mut tree = NodeTree::new(ElementData::new(Tag::Root));
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let _b = tree.append(a, ElementData::new(Tag::Button));
    let _c = tree.append(a, ElementData::new(Tag::Custom("slider".to_string())));

    let styles = compute_styles(&tree, &StyleSheet::default());
    assert_eq!(styles.len(), tree.len());
    assert!(styles.diagnostics().is_empty());
}
