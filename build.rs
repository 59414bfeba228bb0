use esp_config::{ConfigOption, DisplayHint, Stability, Value, generate_config};

fn main() {
    // emit config
    generate_config(
        "esp32-adc",
        &[ConfigOption {
            name: "default-device-path".to_string(),
            description: "Device path used by `board::initialize_default` when registering \
            the ADC with the driver framework."
                .to_string(),
            default_value: Value::String(String::from("/dev/adc0")),
            constraint: None,
            stability: Stability::Stable("0.1.0".to_string()),
            active: true,
            display_hint: DisplayHint::None,
        }],
        true,
        true,
    );
}
