use avremote_core::receiver::ReceiverPlugin;
use avremote_core::receiver_contract::{run_receiver_contract, ReceiverContractExpectations};
use avremote_plugin::LogRelay;
use demo_receiver::{DemoReceiver, Preferences, PLUGIN_UNIQUE_ID};

fn scratch_plugin() -> DemoReceiver {
    DemoReceiver::new(Preferences::in_memory(), LogRelay::disconnected())
}

#[test]
fn demo_receiver_passes_the_contract_suite() {
    let plugin = scratch_plugin();
    plugin.connect_to_host("mc-1", "Living room", "10.0.0.2");

    let expectations = ReceiverContractExpectations {
        plugin_unique_id: PLUGIN_UNIQUE_ID.into(),
        restore_payload: r#"{"host_ip_mc-1":"192.168.1.20","settings_version":"3"}"#.into(),
        restore_version: 3,
    };

    let result = run_receiver_contract(&plugin, &expectations);
    assert!(result.is_ok(), "expected contract to pass: {result:?}");
}

#[test]
fn restore_applies_the_backed_up_receiver_address() {
    let plugin = scratch_plugin();
    plugin.connect_to_host("mc-1", "Living room", "10.0.0.2");
    assert!(plugin.restore_settings(r#"{"host_ip_mc-1":"192.168.1.20"}"#, 5));
    assert_eq!(plugin.settings_version(), 5);
    assert!(plugin.settings().contains("192.168.1.20"));
}
