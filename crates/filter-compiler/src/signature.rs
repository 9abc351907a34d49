use filter_syntax::PostfixSequence;
use model::definition::Definitions;
use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical payload behind a structural signature: each filter key mapped
/// to its `(property_ref, operator_code)` pair in sorted order, plus the
/// simplified postfix stream. Filter values never participate, so value
/// changes can never invalidate a cached condition tree.
#[derive(Serialize)]
struct SignaturePayload<'a> {
    filters: BTreeMap<&'a str, (&'a str, &'a str)>,
    postfix: &'a PostfixSequence,
}

/// Compute the structural cache key for one resolution.
pub fn structural_signature(postfix: &PostfixSequence, definitions: &Definitions) -> String {
    let filters = definitions
        .iter()
        .map(|(key, def)| {
            (
                key.as_str(),
                (def.property_ref.as_str(), def.operator_code.as_str()),
            )
        })
        .collect();

    let payload = SignaturePayload { filters, postfix };
    let serialized =
        serde_json::to_string(&payload).expect("signature payload should serialize to JSON");
    format!("{:x}", md5::compute(serialized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_syntax::to_postfix;
    use model::{definition::FilterDefinition, policy::CompilerPolicy};
    use serde_json::json;

    fn defs(entries: &[(&str, &str, &str, serde_json::Value)]) -> Definitions {
        entries
            .iter()
            .map(|(key, prop, op, value)| {
                (
                    key.to_string(),
                    FilterDefinition::new(*prop, *op, value.clone()),
                )
            })
            .collect()
    }

    fn compiled(text: &str) -> PostfixSequence {
        to_postfix(text, &CompilerPolicy::default()).expect("expression should convert")
    }

    #[test]
    fn test_values_do_not_affect_the_signature() {
        let postfix = compiled("f1 & f2");
        let a = defs(&[
            ("f1", "name", "eq", json!("alice")),
            ("f2", "age", "gt", json!(30)),
        ]);
        let b = defs(&[
            ("f1", "name", "eq", json!("bob")),
            ("f2", "age", "gt", json!(65)),
        ]);
        assert_eq!(
            structural_signature(&postfix, &a),
            structural_signature(&postfix, &b)
        );
    }

    #[test]
    fn test_property_and_operator_do_affect_the_signature() {
        let postfix = compiled("f1");
        let a = defs(&[("f1", "name", "eq", json!("alice"))]);
        let b = defs(&[("f1", "name", "neq", json!("alice"))]);
        let c = defs(&[("f1", "email", "eq", json!("alice"))]);
        assert_ne!(
            structural_signature(&postfix, &a),
            structural_signature(&postfix, &b)
        );
        assert_ne!(
            structural_signature(&postfix, &a),
            structural_signature(&postfix, &c)
        );
    }

    #[test]
    fn test_expression_structure_affects_the_signature() {
        let defs = defs(&[
            ("f1", "name", "eq", json!("alice")),
            ("f2", "age", "gt", json!(30)),
        ]);
        assert_ne!(
            structural_signature(&compiled("f1 & f2"), &defs),
            structural_signature(&compiled("f1 | f2"), &defs)
        );
    }

    #[test]
    fn test_signature_is_independent_of_map_iteration_order() {
        let postfix = compiled("f1 & f2 & f3");
        let forward = defs(&[
            ("f1", "a", "eq", json!(1)),
            ("f2", "b", "eq", json!(2)),
            ("f3", "c", "eq", json!(3)),
        ]);
        let reverse = defs(&[
            ("f3", "c", "eq", json!(3)),
            ("f2", "b", "eq", json!(2)),
            ("f1", "a", "eq", json!(1)),
        ]);
        assert_eq!(
            structural_signature(&postfix, &forward),
            structural_signature(&postfix, &reverse)
        );
    }
}
