use smol_str::SmolStr;

/// Build a greeter that owns `state`.
///
/// The state is moved into the returned closure; the opaque return type
/// offers no way to reach it other than calling the closure.
pub fn encapsulate(state: impl Into<SmolStr>) -> impl Fn() -> String {
    let state = state.into();
    move || format!("Hello {state}")
}

/// The classic example: encloses `"Data"`.
pub fn outer() -> impl Fn() -> String {
    encapsulate("Data")
}
