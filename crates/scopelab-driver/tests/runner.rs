//! End-to-end runs of the illustrations against a recording host.

use scopelab_driver::{DemoConfig, DriverError, Illustration, Report, Runner};
use scopelab_runtime::{BindingPolicy, Host, HostEvent, RecordingHost};
use std::rc::Rc;

fn run_with(config: DemoConfig, selection: &[Illustration]) -> (Report, Rc<RecordingHost>) {
    let recording = Rc::new(RecordingHost::new());
    let host: Rc<dyn Host> = recording.clone();
    let report = Runner::new(config, host).run(selection).unwrap();
    (report, recording)
}

#[test]
fn test_default_transcript() {
    let (_, host) = run_with(DemoConfig::default(), &[]);

    insta::assert_snapshot!(host.transcript(), @r"
    pure_sum(1, 2) = 3
    impure_sum(1) = 4 with b = 3
    impure_sum(1) = 11 with b = 10
    inner() = Hello Data
    [alert] Message is Hi mom
    var i = 3
    var i = 3
    var i = 3
    let i = 0
    let i = 1
    let i = 2
    ");
}

#[test]
fn test_default_report() {
    let (report, _) = run_with(DemoConfig::default(), &[]);

    assert_eq!(report.ran, Illustration::ALL.to_vec());
    assert_eq!(report.pure, Some(3.0));
    assert_eq!(report.impure, vec![4.0, 11.0]);
    assert_eq!(report.greeting.as_deref(), Some("Hello Data"));
    assert_eq!(report.alerts_raised, 1);
    assert_eq!(
        report.deferred,
        vec![
            (BindingPolicy::Shared, vec![3.0, 3.0, 3.0]),
            (BindingPolicy::Fresh, vec![0.0, 1.0, 2.0]),
        ]
    );
    assert_eq!(report.timers_run, 6);
}

#[test]
fn test_selection_keeps_script_order() {
    let (report, host) = run_with(
        DemoConfig::default(),
        &[Illustration::Deferred, Illustration::Pure],
    );

    assert_eq!(report.ran, vec![Illustration::Pure, Illustration::Deferred]);
    assert_eq!(host.logs()[0], "pure_sum(1, 2) = 3");
    assert!(report.greeting.is_none());
    assert!(host.alerts().is_empty());
}

#[test]
fn test_deferred_output_follows_all_synchronous_output() {
    let mut config = DemoConfig::default();
    config.factory.messages = vec!["Hi mom".into(), "Hi dad".into()];
    let (_, host) = run_with(config, &[]);

    let events = host.events();
    let last_alert = events
        .iter()
        .rposition(|e| matches!(e, HostEvent::Alert(_)))
        .unwrap();
    let first_logger = events
        .iter()
        .position(|e| matches!(e, HostEvent::Log(line) if line.contains(" i = ")))
        .unwrap();

    assert!(last_alert < first_logger);
    assert_eq!(host.alerts(), vec!["Message is Hi mom", "Message is Hi dad"]);
}

#[test]
fn test_custom_config() {
    let config = DemoConfig::parse(
        r#"
[pure]
a = 0.5
b = 0.25

[impure]
external = 1
argument = 2
reassignments = [5, -2]

[encapsulation]
state = "Secret"

[deferred]
iterations = 2
delay_ms = 0
policies = ["fresh"]
"#,
    )
    .unwrap();
    let (report, host) = run_with(config, &[]);

    assert_eq!(report.pure, Some(0.75));
    assert_eq!(report.impure, vec![3.0, 7.0, 0.0]);
    assert_eq!(report.greeting.as_deref(), Some("Hello Secret"));
    assert_eq!(report.deferred, vec![(BindingPolicy::Fresh, vec![0.0, 1.0])]);
    assert_eq!(host.logs()[0], "pure_sum(0.5, 0.25) = 0.75");
}

#[test]
fn test_invalid_config_is_rejected_before_running() {
    let mut config = DemoConfig::default();
    config.deferred.policies.clear();

    let recording = Rc::new(RecordingHost::new());
    let host: Rc<dyn Host> = recording.clone();
    let err = Runner::new(config, host).run_all().unwrap_err();

    assert!(matches!(err, DriverError::Validation(_)));
    assert!(recording.events().is_empty());
}
