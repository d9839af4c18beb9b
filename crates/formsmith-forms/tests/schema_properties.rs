//! Property-based tests for descriptor compilation
//!
//! These cover the invariants that must hold for every descriptor:
//! one ruleset entry and one default per field in field order, checkbox
//! defaults, and deterministic compilation.

use formsmith_forms::{
	FieldDescriptor, FieldKind, FormDescriptor, NumberConstraints, SelectOption,
	TextConstraints, compile,
};
use proptest::prelude::*;
use serde_json::json;

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
	prop_oneof![
		(proptest::option::of(0usize..5), proptest::option::of(5usize..20)).prop_map(
			|(min, max)| FieldKind::Text(TextConstraints {
				min_length: min,
				max_length: max,
				pattern: None,
			})
		),
		Just(FieldKind::Email(TextConstraints::new())),
		Just(FieldKind::Password(TextConstraints::new().with_pattern("^.+$"))),
		Just(FieldKind::Textarea(TextConstraints::new().with_min_length(10))),
		Just(FieldKind::Date(TextConstraints::new())),
		(proptest::option::of(-10i32..0), proptest::option::of(0i32..10)).prop_map(
			|(min, max)| FieldKind::Number(NumberConstraints {
				min: min.map(f64::from),
				max: max.map(f64::from),
			})
		),
		Just(FieldKind::Select {
			options: vec![SelectOption::new("User", "user"), SelectOption::new("Admin", "admin")],
		}),
		Just(FieldKind::Checkbox),
	]
}

fn descriptor_strategy() -> impl Strategy<Value = FormDescriptor> {
	proptest::collection::hash_set("[a-z]{1,8}", 0..12)
		.prop_flat_map(|names| {
			let names: Vec<String> = names.into_iter().collect();
			let count = names.len();
			(
				Just(names),
				proptest::collection::vec((kind_strategy(), any::<bool>(), any::<bool>()), count),
			)
		})
		.prop_map(|(names, specs)| {
			let fields = names
				.into_iter()
				.zip(specs)
				.map(|(name, (kind, required, seeded))| {
					let mut field = FieldDescriptor::new(name.clone(), name.to_uppercase(), kind);
					field.required = required;
					if seeded && !field.kind.is_checkbox() {
						field.default_value = Some(json!(0));
					}
					field
				})
				.collect();
			FormDescriptor::new(fields)
		})
}

proptest! {
	#[test]
	fn defaults_have_one_entry_per_field(form in descriptor_strategy()) {
		let compiled = compile(&form).unwrap();

		prop_assert_eq!(compiled.defaults.len(), form.fields.len());
		prop_assert_eq!(compiled.ruleset.len(), form.fields.len());
		let rule_names: Vec<&str> = compiled.ruleset.names().collect();
		let field_names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
		prop_assert_eq!(rule_names, field_names);
		for field in &form.fields {
			prop_assert!(compiled.defaults.contains_key(&field.name));
			prop_assert!(compiled.ruleset.contains(&field.name));
		}
	}

	#[test]
	fn checkbox_defaults_to_false(form in descriptor_strategy()) {
		let compiled = compile(&form).unwrap();

		for field in form.fields.iter().filter(|f| f.kind.is_checkbox()) {
			prop_assert_eq!(&compiled.defaults[&field.name], &json!(false));
		}
	}

	#[test]
	fn compilation_is_deterministic(form in descriptor_strategy()) {
		let first = compile(&form).unwrap();
		let second = compile(&form).unwrap();

		prop_assert_eq!(first, second);
	}

	#[test]
	fn required_missing_fields_report_required(form in descriptor_strategy()) {
		let compiled = compile(&form).unwrap();
		let errors = compiled.ruleset.validate(&Default::default());

		for field in &form.fields {
			if field.required {
				let message = errors.message(&field.name);
				prop_assert_eq!(message.as_deref(), Some("Required"));
			} else {
				prop_assert!(!errors.contains(&field.name));
			}
		}
	}
}
