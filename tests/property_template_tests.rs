use proptest::prelude::*;
use serde_json::{Map, Value, json};
use widget_rs::core::template::CompiledTemplate;

fn lookup<'ctx>(context: &'ctx Map<String, Value>) -> impl Fn(&str) -> Option<&'ctx Value> {
    move |name| context.get(name)
}

proptest! {
    #[test]
    fn dollar_free_literals_round_trip(text in "[a-zA-Z0-9 <>/=.,!-]{0,64}") {
        let template = CompiledTemplate::parse(&text).expect("literal parse");
        let context = Map::new();
        let rendered = template.evaluate(lookup(&context)).expect("literal eval");
        prop_assert_eq!(rendered, text);
    }

    #[test]
    fn single_expression_renders_the_context_value(
        name in "[a-z_][a-z0-9_]{0,12}",
        value in "[a-zA-Z0-9 ]{0,32}"
    ) {
        let source = format!("pre ${{{name}}} post");
        let template = CompiledTemplate::parse(&source).expect("parse");

        let mut context = Map::new();
        context.insert(name, json!(value.clone()));
        let rendered = template.evaluate(lookup(&context)).expect("eval");
        prop_assert_eq!(rendered, format!("pre {value} post"));
    }

    #[test]
    fn this_prefix_never_changes_evaluation(
        name in "[a-z_][a-z0-9_]{0,12}",
        value in 0i64..1_000_000
    ) {
        let bare = CompiledTemplate::parse(&format!("${{{name}}}")).expect("parse bare");
        let prefixed =
            CompiledTemplate::parse(&format!("${{this.{name}}}")).expect("parse prefixed");

        let mut context = Map::new();
        context.insert(name, json!(value));
        prop_assert_eq!(
            bare.evaluate(lookup(&context)).expect("bare eval"),
            prefixed.evaluate(lookup(&context)).expect("prefixed eval")
        );
    }

    #[test]
    fn doubled_dollars_halve_on_render(count in 0usize..8) {
        let source = "$$".repeat(count);
        let template = CompiledTemplate::parse(&source).expect("parse");
        let context = Map::new();
        let rendered = template.evaluate(lookup(&context)).expect("eval");
        prop_assert_eq!(rendered, "$".repeat(count));
    }

    #[test]
    fn parser_never_panics_on_arbitrary_input(source in ".{0,128}") {
        // Parse may fail; it must never panic or loop.
        let _ = CompiledTemplate::parse(&source);
    }
}
