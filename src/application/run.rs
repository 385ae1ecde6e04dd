use crate::domain::configuration::StoredConfiguration;
use crate::domain::function::{FunctionRunResult, HideOperation, Operation, RunInput};
use crate::error::Result;

/// Evaluates the "hide payment method" rule for one checkout.
///
/// Handles and method names are matched by substring containment against the
/// configured strings, not against the parsed comma-separated list. Malformed
/// configuration JSON and a `null` configuration are returned as errors.
pub fn run(input: &RunInput) -> Result<FunctionRunResult> {
    let stored = StoredConfiguration::parse(input.configuration_value().unwrap_or("{}"))?;
    let Some(configuration) = stored.complete() else {
        return Ok(FunctionRunResult::no_changes());
    };

    let has_matching_product = input.cart.lines.iter().any(|line| {
        line.merchandise
            .product_handle()
            .is_some_and(|handle| configuration.product_handles.contains(handle))
    });
    if !has_matching_product {
        tracing::warn!("Cart does not contain a product with a matching handle");
        return Ok(FunctionRunResult::no_changes());
    }

    let Some(method) = input
        .payment_methods
        .iter()
        .find(|method| method.name.contains(&configuration.payment_method_name))
    else {
        return Ok(FunctionRunResult::no_changes());
    };

    Ok(FunctionRunResult {
        operations: vec![Operation::Hide(HideOperation {
            payment_method_id: method.id.clone(),
        })],
    })
}
