//! The deep merger: folds an ordered sequence of mapping values into one,
//! later inputs overriding earlier ones.
//!
//! Grounded on `pkg/stack/stack_processor.go`'s repeated `m.Merge([...])`
//! calls — every one of those call sites becomes a `merge_all(&[...])` call
//! here.

use indexmap::IndexMap;

use crate::error::{type_name, CompileError, Result};
use crate::value::Value;

/// Merge a mapping `r` into accumulator mapping `a`, in place, following the
/// typed merge rules: two mappings recurse, two sequences concatenate
/// (`a` then `r`, no de-duplication), anything else is replaced by `r`.
fn merge_into(a: &mut Value, r: &Value, path: &mut Vec<String>) -> Result<()> {
    match (a, r) {
        (Value::Map(am), Value::Map(rm)) => {
            for (k, rv) in rm {
                match am.get_mut(k) {
                    None => {
                        am.insert(k.clone(), rv.clone());
                    }
                    Some(av) => {
                        path.push(k.clone());
                        merge_into(av, rv, path)?;
                        path.pop();
                    }
                }
            }
            Ok(())
        }
        (Value::Seq(aseq), Value::Seq(rseq)) => {
            aseq.extend(rseq.iter().cloned());
            Ok(())
        }
        // A mapping merged with a sequence or scalar (or vice versa) is a
        // type mismatch under strict policy. A scalar on the left merged
        // with *anything* on the right simply replaces, regardless of the
        // right-hand type.
        (a @ Value::Map(_), r) | (a @ Value::Seq(_), r) => Err(CompileError::MergeTypeError {
            path: path.clone(),
            left: type_name(a),
            right: type_name(r),
        }),
        (a, r) => {
            *a = r.clone();
            Ok(())
        }
    }
}

/// Fold `values` from an empty mapping, left to right. Each element must be
/// a mapping; non-mapping top-level inputs are a contract violation.
pub fn merge_all(values: &[Value]) -> Result<Value> {
    let mut acc = Value::Map(IndexMap::new());
    for v in values {
        debug_assert!(
            matches!(v, Value::Map(_)),
            "merge_all inputs must be mappings"
        );
        let mut path = Vec::new();
        merge_into(&mut acc, v, &mut path)?;
    }
    Ok(acc)
}

/// Convenience wrapper for the common two-value merge used throughout the
/// stack processor (`merge(global, type)`, `merge(global, base, self)`, ...).
pub fn merge2(a: &Value, b: &Value) -> Result<Value> {
    merge_all(&[a.clone(), b.clone()])
}

pub fn merge3(a: &Value, b: &Value, c: &Value) -> Result<Value> {
    merge_all(&[a.clone(), b.clone(), c.clone()])
}
