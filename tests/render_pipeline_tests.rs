use serde_json::{Value, json};
use widget_rs::api::{FieldSeed, RenderHost, TemplateOptions, Widget};
use widget_rs::core::PipelineState;

struct NameWidget;

impl Widget for NameWidget {
    fn observed_fields(&self) -> &[&str] {
        &["name"]
    }

    fn field_snapshot(&self) -> Vec<FieldSeed> {
        vec![FieldSeed::plain("name", json!("World"))]
    }
}

#[test]
fn default_render_is_style_block_plus_evaluated_template() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("configure");

    assert_eq!(
        host.scope().content(),
        "<style>span{color:red}</style>Hello, World!"
    );
}

#[test]
fn watched_field_write_re_renders_automatically() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("configure");

    host.set_property("name", json!("Ada")).expect("set name");
    assert_eq!(
        host.scope().content(),
        "<style>span{color:red}</style>Hello, Ada!"
    );
}

#[test]
fn render_before_configure_logs_and_leaves_scope_untouched() {
    let mut host = RenderHost::new(NameWidget);
    host.run_render_pipeline().expect("recoverable");
    assert!(host.scope().is_empty());
}

#[test]
fn construction_does_not_render() {
    let host = RenderHost::new(NameWidget);
    assert!(host.scope().is_empty());
    assert_eq!(host.state(), PipelineState::Active);
}

#[test]
fn paused_writes_do_not_render_resumed_writes_do() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("configure");

    host.pause_render_pipeline();
    host.set_property("name", json!("Grace")).expect("set");
    assert_eq!(
        host.scope().content(),
        "<style>span{color:red}</style>Hello, World!",
        "paused write must not repaint"
    );

    host.resume_render_pipeline();
    host.set_property("name", json!("Grace")).expect("set");
    assert_eq!(
        host.scope().content(),
        "<style>span{color:red}</style>Hello, Grace!"
    );
}

#[test]
fn pause_and_resume_never_render_by_themselves() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default().with_immediate_render(false),
    )
    .expect("configure");

    host.pause_render_pipeline();
    host.resume_render_pipeline();
    assert!(host.scope().is_empty());
}

#[test]
fn unwatched_field_write_does_not_render() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default().with_watch_for_field_changes(false),
    )
    .expect("configure");
    let after_configure = host.scope().content().to_owned();

    host.set_property("name", json!("Ada")).expect("set");
    assert_eq!(host.scope().content(), after_configure);
    assert_eq!(host.property("name"), Some(&json!("Ada")));
}

#[test]
fn unknown_field_write_creates_plain_slot_without_render() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("configure");
    let after_configure = host.scope().content().to_owned();

    host.set_property("nickname", json!("addie")).expect("set");
    assert_eq!(host.scope().content(), after_configure);
    assert_eq!(host.property("nickname"), Some(&json!("addie")));
    assert!(!host.properties().is_watched("nickname"));
}

#[test]
fn configure_template_overwrites_assets_unconditionally() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template("Hi ${name}", "a{}", TemplateOptions::default())
        .expect("first configure");
    host.configure_template("Bye ${name}", "b{}", TemplateOptions::default())
        .expect("second configure");

    assert_eq!(host.scope().content(), "<style>b{}</style>Bye World");
}

#[test]
fn template_evaluation_failure_renders_empty_markup() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.missing}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("recoverable");

    assert_eq!(host.scope().content(), "<style>span{color:red}</style>");
}

#[test]
fn unparsable_template_renders_empty_markup() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template("broken ${name", "s{}", TemplateOptions::default())
        .expect("recoverable");

    assert_eq!(host.scope().content(), "<style>s{}</style>");
}

#[test]
fn watch_for_field_changes_is_idempotent() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template(
        "Hello, ${this.name}!",
        "span{color:red}",
        TemplateOptions::default(),
    )
    .expect("configure");

    host.watch_for_field_changes();
    host.watch_for_field_changes();
    assert!(host.properties().is_watched("name"));

    host.set_property("name", json!("Ada")).expect("set");
    assert_eq!(
        host.scope().content(),
        "<style>span{color:red}</style>Hello, Ada!"
    );
}

struct ComputedFieldWidget;

impl Widget for ComputedFieldWidget {
    fn observed_fields(&self) -> &[&str] {
        &["label", "derived"]
    }

    fn field_snapshot(&self) -> Vec<FieldSeed> {
        vec![
            FieldSeed::plain("label", json!("plain")),
            FieldSeed::computed("derived", json!("readonly")),
        ]
    }
}

#[test]
fn computed_fields_are_skipped_by_interception() {
    let mut host = RenderHost::new(ComputedFieldWidget);
    host.configure_template("${label}/${derived}", "c{}", TemplateOptions::default())
        .expect("configure");

    assert!(host.properties().is_watched("label"));
    assert!(!host.properties().is_watched("derived"));
    let after_configure = host.scope().content().to_owned();

    host.set_property("derived", json!("poked")).expect("set");
    assert_eq!(host.scope().content(), after_configure);
    assert_eq!(host.property("derived"), Some(&json!("poked")));
}

#[test]
fn into_widget_hands_the_widget_back() {
    let host = RenderHost::new(NameWidget);
    let _widget: NameWidget = host.into_widget();
}

#[test]
fn property_values_can_be_any_json_shape() {
    let mut host = RenderHost::new(NameWidget);
    host.configure_template("Hello, ${this.name}!", "s{}", TemplateOptions::default())
        .expect("configure");

    host.set_property("name", json!({"first": "Ada"}))
        .expect("set structured value");
    assert_eq!(
        host.scope().content(),
        "<style>s{}</style>Hello, {\"first\":\"Ada\"}!"
    );
    assert_eq!(
        host.property("name").and_then(Value::as_object).map(|m| m.len()),
        Some(1)
    );
}
