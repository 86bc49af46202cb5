use scopelab_runtime::Host;
use smol_str::SmolStr;
use std::rc::Rc;

/// Build a deferred action that alerts `Message is <message>` when called.
///
/// The message is captured by value, so closures from separate calls never
/// share it.
pub fn alert_function(message: &str, host: Rc<dyn Host>) -> impl Fn() {
    let message = SmolStr::new(message);
    move || host.alert(&format!("Message is {message}"))
}
