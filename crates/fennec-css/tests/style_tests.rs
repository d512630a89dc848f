//! Integration tests for property values, declaration parsing and
//! stylesheet compilation.

use fennec_css::style::values::{parse_color, parse_length};
use fennec_css::style::{
    Align, AlignContent, Color, ComputedStyle, Corners, Declaration, Dimension, Direction, Edge,
    Justify, Length, Longhand, Overflow, Paint, Property, parse_declaration,
};
use fennec_css::{Diagnostic, RawRule, StyleSheet};
use serde_json::{Value, json};

fn computed(declarations: &[(&str, Value)]) -> ComputedStyle {
    let parent = ComputedStyle::default();
    let mut style = ComputedStyle::default();
    for (name, value) in declarations {
        for declaration in parse_declaration(name, value).unwrap() {
            style.apply_declaration(&declaration, &parent);
        }
    }
    style
}

// ========== colors ==========

#[test]
fn test_color_syntaxes() {
    let cases = [
        ("#f00", Color::rgb(255, 0, 0)),
        ("#00ff00", Color::rgb(0, 255, 0)),
        ("rgb(0, 0, 255)", Color::rgb(0, 0, 255)),
        ("hsl(120, 100%, 50%)", Color::rgb(0, 255, 0)),
        ("rebeccapurple", Color::rgb(102, 51, 153)),
        ("White", Color::WHITE),
    ];
    for (text, expected) in cases {
        assert_eq!(parse_color(text), Some(expected), "{text}");
    }
    assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("blurple"), None);
}

#[test]
fn test_rgba_alpha() {
    let color = parse_color("rgba(10, 20, 30, 0.5)").unwrap();
    assert_eq!((color.r, color.g, color.b), (10, 20, 30));
    assert!(color.a > 120 && color.a < 135);
}

// ========== lengths ==========

#[test]
fn test_length_forms() {
    assert_eq!(parse_length("12"), Some(Length::Px(12.0)));
    assert_eq!(parse_length("12px"), Some(Length::Px(12.0)));
    assert_eq!(parse_length("-4px"), Some(Length::Px(-4.0)));
    assert_eq!(parse_length("50%"), Some(Length::Percent(50.0)));
    assert_eq!(parse_length("12em"), None);
    assert_eq!(parse_length("wide"), None);
}

#[test]
fn test_negative_padding_rejected_negative_margin_allowed() {
    assert!(parse_declaration("padding", &json!(-1)).is_err());
    assert!(parse_declaration("marginLeft", &json!(-8)).is_ok());
}

// ========== declarations ==========

#[test]
fn test_shorthand_expands_to_longhands() {
    let declarations = parse_declaration("padding", &json!("1 2 3")).unwrap();
    assert_eq!(declarations.len(), 4);
    assert!(declarations.contains(&Declaration::Value(Longhand::Padding(
        Edge::Left,
        Length::Px(2.0)
    ))));
}

#[test]
fn test_property_aliases() {
    let style = computed(&[
        ("flexDirection", json!("column")),
        ("justify-content", json!("space-between")),
        ("alignItems", json!("flex-end")),
        ("align-content", json!("spaceAround")),
        ("flexWrap", json!("wrap")),
        ("backgroundColor", json!("#000")),
    ]);
    assert_eq!(style.direction, Direction::Column);
    assert_eq!(style.justify, Justify::SpaceBetween);
    assert_eq!(style.align, Align::End);
    assert_eq!(style.align_content, AlignContent::SpaceAround);
    assert!(style.wrap);
    assert_eq!(style.background, Some(Paint::Solid { color: Color::BLACK }));
}

#[test]
fn test_property_names_round_trip() {
    for property in [Property::Width, Property::FlexGrow, Property::BorderTopLeftRadius] {
        let name = property.to_string();
        assert_eq!(name.parse::<Property>().unwrap(), property);
    }
    assert_eq!(Property::Direction.to_string(), "direction");
    assert!(Property::Color.is_inherited());
    assert!(!Property::Gap.is_inherited());
}

#[test]
fn test_sizes_and_limits() {
    let style = computed(&[
        ("width", json!("auto")),
        ("height", json!("25%")),
        ("minWidth", json!("auto")),
        ("maxWidth", json!(300)),
        ("maxHeight", json!("none")),
        ("flexBasis", json!("40px")),
    ]);
    assert_eq!(style.width, Dimension::Auto);
    assert_eq!(style.height, Dimension::Length(Length::Percent(25.0)));
    assert_eq!(style.min_width, Length::ZERO);
    assert_eq!(style.max_width, Some(Length::Px(300.0)));
    assert_eq!(style.max_height, None);
    assert_eq!(style.flex_basis, Dimension::Length(Length::Px(40.0)));
}

#[test]
fn test_border_radius_forms() {
    let uniform = computed(&[("borderRadius", json!(6))]);
    assert_eq!(uniform.border_radius, Corners {
        top_left: 6.0,
        top_right: 6.0,
        bottom_right: 6.0,
        bottom_left: 6.0,
    });

    let object = computed(&[("borderRadius", json!({"all": 2, "topLeft": 8}))]);
    assert!((object.border_radius.top_left - 8.0).abs() < f32::EPSILON);
    assert!((object.border_radius.bottom_right - 2.0).abs() < f32::EPSILON);
}

#[test]
fn test_misc_values() {
    let style = computed(&[
        ("opacity", json!(1.5)),
        ("overflow", json!("clip")),
        ("fontWeight", json!("bold")),
        ("border", json!("2px solid red")),
        ("alignSelf", json!("center")),
    ]);
    assert!((style.opacity - 1.0).abs() < f32::EPSILON);
    assert_eq!(style.overflow, Overflow::Hidden);
    assert_eq!(style.font_weight, 700);
    assert!((style.border_width - 2.0).abs() < f32::EPSILON);
    assert_eq!(style.used_border_color(), Color::rgb(255, 0, 0));
    assert_eq!(style.align_self, Some(Align::Center));
}

#[test]
fn test_invalid_values() {
    let cases = [
        ("flexGrow", json!(-1)),
        ("fontWeight", json!(0)),
        ("justify", json!("sideways")),
        ("gap", json!("10%")),
        ("padding", json!("1 2 3 4 5")),
        ("padding", json!({"middle": 4})),
        ("width", json!(true)),
        ("background", json!("linear-gradient(red)")),
    ];
    for (name, value) in cases {
        let err = parse_declaration(name, &value).unwrap_err();
        assert_eq!(err.property, name);
    }
}

// ========== backgrounds ==========

#[test]
fn test_linear_gradient_background() {
    let style = computed(&[("background", json!("linear-gradient(to right, #000, #fff 80%)"))]);
    let Some(Paint::LinearGradient(gradient)) = style.background else {
        panic!("expected a gradient");
    };
    assert!((gradient.angle - 90.0).abs() < f32::EPSILON);
    assert_eq!(gradient.stops.len(), 2);
    assert!(gradient.stops[0].offset.abs() < f32::EPSILON);
    assert!((gradient.stops[1].offset - 0.8).abs() < 1e-6);
    assert_eq!(gradient.stops[1].color, Color::WHITE);
}

// ========== stylesheets ==========

#[test]
fn test_stylesheet_from_json_reports_and_continues() {
    let sheet = StyleSheet::from_json(
        r##"{
            "view": {"gap": 4, "color": "nope"},
            "view:hover": {"gap": 8},
            ".card": {"padding": {"all": 2}}
        }"##,
    )
    .unwrap();

    assert_eq!(sheet.rules().len(), 2);
    assert_eq!(sheet.diagnostics().len(), 2);
    assert!(matches!(sheet.diagnostics()[0], Diagnostic::Value(_)));
    assert!(matches!(sheet.diagnostics()[1], Diagnostic::Selector(_)));
    assert_eq!(sheet.rules()[1].source_order, 2);
}

#[test]
fn test_raw_rule_builder_keeps_source_order() {
    let rule = RawRule::new(".a")
        .declare("paddingTop", json!(1))
        .declare("padding", json!(2));
    let sheet = StyleSheet::new([rule]);
    let declarations = &sheet.rules()[0].declarations;
    assert_eq!(declarations.len(), 5);

    // The later shorthand overrides the earlier longhand.
    let mut style = ComputedStyle::default();
    let parent = ComputedStyle::default();
    for declaration in declarations {
        style.apply_declaration(declaration, &parent);
    }
    assert_eq!(style.padding.top, Length::Px(2.0));
}

#[test]
fn test_computed_style_serializes_camel_case() {
    let style = computed(&[("flexGrow", json!(2)), ("width", json!("50%"))]);
    let value = serde_json::to_value(&style).unwrap();
    assert_eq!(value["flexGrow"], json!(2.0));
    assert_eq!(value["direction"], json!("row"));
    assert_eq!(value["color"], json!("#000000"));
    assert!(value.get("extra").is_none());
}
