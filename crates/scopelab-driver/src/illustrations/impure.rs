use scopelab_common::ScopeError;
use scopelab_runtime::Binding;

/// Sum of `a` and whatever `external` holds when the call happens.
///
/// The external variable is handed in as a [`Binding`] so the dependency is
/// visible in the signature. Fails only if the binding does not hold a
/// number.
pub fn impure_sum(external: &Binding, a: f64) -> Result<f64, ScopeError> {
    Ok(a + external.number("b")?)
}
