use serde_json::Value;

use super::render_scalar;

/// Print just the key answer value from the output.
///
/// The headline number of a summary is the installment, of a prepayment the
/// interest saved; fall back to the first scalar field otherwise.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["payment", "interest_saved", "new_payment", "outstanding_balance"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", render_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_array()) {
            println!("{}: {}", key, render_scalar(val));
            return;
        }
    }

    println!("{}", render_scalar(result_obj));
}
